use habitline_core::db::open_db_in_memory;
use habitline_core::{
    CategoryRepository, DecodeError, RepoError, Schedule, SqliteCategoryRepository,
    SqliteRecordRepository, SqliteTrackerRepository, Tracker, TrackerRepository, TrackerStore,
    WeekDay,
};
use rusqlite::Connection;
use uuid::Uuid;

fn store(conn: &Connection) -> TrackerStore<
    SqliteTrackerRepository<'_>,
    SqliteCategoryRepository<'_>,
    SqliteRecordRepository<'_>,
> {
    TrackerStore::try_new(
        SqliteTrackerRepository::try_new(conn).unwrap(),
        SqliteCategoryRepository::try_new(conn).unwrap(),
        SqliteRecordRepository::try_new(conn).unwrap(),
    )
    .unwrap()
}

#[test]
fn add_then_fetch_reproduces_tracker_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store(&conn);

    let tracker = Tracker::new(
        "Morning run",
        "#3772FF",
        "🏃",
        Schedule::from_days([WeekDay::Monday, WeekDay::Wednesday, WeekDay::Friday]),
    );
    store.add(&tracker, None).unwrap();

    let fetched = store.current_trackers();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, tracker.id);
    assert_eq!(fetched[0].name, "Morning run");
    assert_eq!(fetched[0].emoji, "🏃");
    assert_eq!(fetched[0].schedule, tracker.schedule);
}

#[test]
fn add_to_category_resolves_category_name() {
    let conn = open_db_in_memory().unwrap();
    SqliteCategoryRepository::try_new(&conn)
        .unwrap()
        .ensure("Sport")
        .unwrap();
    let mut store = store(&conn);

    let tracker = Tracker::new(
        "Run",
        "#FD4C49",
        "🏃",
        Schedule::from_days([WeekDay::Monday, WeekDay::Wednesday, WeekDay::Friday]),
    );
    store.add(&tracker, Some("Sport")).unwrap();

    assert_eq!(store.category_name_for(tracker.id), "Sport");
}

#[test]
fn unknown_category_leaves_tracker_uncategorized() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store(&conn);

    let tracker = Tracker::new("Stretch", "#7994F5", "🧘", Schedule::empty());
    store.add(&tracker, Some("No such category")).unwrap();

    assert_eq!(store.category_name_for(tracker.id), "");
}

#[test]
fn category_name_for_unknown_tracker_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);

    assert_eq!(store.category_name_for(Uuid::new_v4()), "");
}

#[test]
fn adding_n_trackers_lists_them_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store(&conn);

    let names = ["first", "second", "third", "fourth"];
    let mut ids = Vec::new();
    for name in names {
        let tracker = Tracker::new(name, "#FF674D", "🔥", Schedule::daily());
        ids.push(tracker.id);
        store.add(&tracker, None).unwrap();
    }

    let listed = store.current_trackers();
    assert_eq!(listed.len(), names.len());
    for (position, tracker) in listed.iter().enumerate() {
        assert_eq!(tracker.id, ids[position]);
        assert_eq!(tracker.name, names[position]);
    }
}

#[test]
fn update_overwrites_fields_and_recategorizes() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    categories.ensure("Sport").unwrap();
    categories.ensure("Health").unwrap();
    let mut store = store(&conn);

    let mut tracker = Tracker::new("Run", "#FD4C49", "🏃", Schedule::empty());
    store.add(&tracker, Some("Sport")).unwrap();

    tracker.name = "Evening run".to_string();
    tracker.schedule = Schedule::from_days([WeekDay::Tuesday, WeekDay::Thursday]);
    store.update(&tracker, Some("Health")).unwrap();

    let fetched = &store.current_trackers()[0];
    assert_eq!(fetched.name, "Evening run");
    assert_eq!(
        fetched.schedule.days(),
        &[WeekDay::Tuesday, WeekDay::Thursday]
    );
    assert_eq!(store.category_name_for(tracker.id), "Health");
}

#[test]
fn update_of_absent_tracker_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store(&conn);

    let ghost = Tracker::new("Ghost", "#2FD058", "👻", Schedule::empty());
    store.update(&ghost, None).unwrap();

    assert!(store.current_trackers().is_empty());
}

#[test]
fn delete_of_absent_tracker_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store(&conn);

    let tracker = Tracker::new("Keep me", "#FF99CC", "🌸", Schedule::empty());
    store.add(&tracker, None).unwrap();

    store.delete(Uuid::new_v4());

    assert_eq!(store.current_trackers().len(), 1);
    assert_eq!(store.current_trackers()[0].id, tracker.id);
}

#[test]
fn pin_state_survives_persistence() {
    let conn = open_db_in_memory().unwrap();
    SqliteCategoryRepository::try_new(&conn)
        .unwrap()
        .ensure("Leisure")
        .unwrap();
    let mut store = store(&conn);

    let mut tracker = Tracker::new("Read", "#8D72E3", "📚", Schedule::empty());
    store.add(&tracker, Some("Leisure")).unwrap();

    tracker.pin("Leisure");
    store.update(&tracker, None).unwrap();

    let fetched = &store.current_trackers()[0];
    assert!(fetched.is_pinned);
    assert_eq!(fetched.pinned_from.as_deref(), Some("Leisure"));
}

#[test]
fn get_rejects_row_with_corrupt_schedule() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrackerRepository::try_new(&conn).unwrap();

    let tracker = Tracker::new("Good", "#35347C", "🎯", Schedule::empty());
    repo.insert(&tracker, None).unwrap();
    conn.execute(
        "UPDATE trackers SET schedule = 'Monday,Funday' WHERE uuid = ?1;",
        [tracker.id.to_string()],
    )
    .unwrap();

    let err = repo.get(tracker.id).unwrap_err();
    match err {
        RepoError::Decode(DecodeError::InvalidSchedule(token)) => {
            assert_eq!(token.0, "Funday");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn list_skips_undecodable_rows_instead_of_failing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrackerRepository::try_new(&conn).unwrap();

    let good = Tracker::new("Good", "#35347C", "🎯", Schedule::empty());
    let bad = Tracker::new("Bad", "#E66DD4", "💥", Schedule::empty());
    repo.insert(&good, None).unwrap();
    repo.insert(&bad, None).unwrap();
    conn.execute(
        "UPDATE trackers SET schedule = 'Whenever' WHERE uuid = ?1;",
        [bad.id.to_string()],
    )
    .unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, good.id);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteTrackerRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}
