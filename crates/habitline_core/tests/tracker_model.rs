use habitline_core::{Schedule, Tracker, WeekDay};
use uuid::Uuid;

#[test]
fn tracker_serializes_with_stable_field_names() {
    let tracker = Tracker::with_id(
        Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap(),
        "Run",
        "#FD4C49",
        "🏃",
        Schedule::from_days([WeekDay::Monday, WeekDay::Friday]),
    );

    let json = serde_json::to_value(&tracker).unwrap();
    assert_eq!(json["id"], "00000000-0000-4000-8000-000000000001");
    assert_eq!(json["name"], "Run");
    assert_eq!(json["emoji"], "🏃");
    assert_eq!(json["is_pinned"], false);
    assert_eq!(json["schedule"]["days"][0], "monday");
}

#[test]
fn tracker_json_round_trip_preserves_value() {
    let mut tracker = Tracker::new("Read", "#8D72E3", "📚", Schedule::from_days([WeekDay::Sunday]));
    tracker.pin("Leisure");

    let json = serde_json::to_string(&tracker).unwrap();
    let back: Tracker = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tracker);
}
