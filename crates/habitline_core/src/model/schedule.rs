//! Weekly recurrence schedule model.
//!
//! # Responsibility
//! - Define the 7-day `WeekDay` enumeration and the `Schedule` day set.
//! - Own the comma-separated textual encoding used at the storage boundary.
//!
//! # Invariants
//! - A `Schedule` holds each weekday at most once, in Monday-first order.
//! - The textual encoding exists only on the persistence boundary; decode is
//!   strict and rejects unrecognized tokens instead of masking them.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Day of week a tracker can recur on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    /// All days in Monday-first order.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    /// Storage token for this day.
    pub fn as_token(self) -> &'static str {
        match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        }
    }

    /// Parses one storage token.
    pub fn from_token(token: &str) -> Option<WeekDay> {
        match token {
            "Monday" => Some(WeekDay::Monday),
            "Tuesday" => Some(WeekDay::Tuesday),
            "Wednesday" => Some(WeekDay::Wednesday),
            "Thursday" => Some(WeekDay::Thursday),
            "Friday" => Some(WeekDay::Friday),
            "Saturday" => Some(WeekDay::Saturday),
            "Sunday" => Some(WeekDay::Sunday),
            _ => None,
        }
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => WeekDay::Monday,
            chrono::Weekday::Tue => WeekDay::Tuesday,
            chrono::Weekday::Wed => WeekDay::Wednesday,
            chrono::Weekday::Thu => WeekDay::Thursday,
            chrono::Weekday::Fri => WeekDay::Friday,
            chrono::Weekday::Sat => WeekDay::Saturday,
            chrono::Weekday::Sun => WeekDay::Sunday,
        }
    }
}

/// Error raised when a persisted schedule string cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWeekdayToken(pub String);

impl Display for UnknownWeekdayToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown weekday token `{}` in schedule encoding", self.0)
    }
}

impl Error for UnknownWeekdayToken {}

/// Set of weekdays a tracker recurs on.
///
/// An empty schedule means a single-occurrence tracker. Days are kept
/// deduplicated and in Monday-first order regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    days: Vec<WeekDay>,
}

impl Schedule {
    /// Creates an empty schedule (single-occurrence tracker).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a schedule from any day collection, deduplicating and sorting.
    pub fn from_days(days: impl IntoIterator<Item = WeekDay>) -> Self {
        let mut days: Vec<WeekDay> = days.into_iter().collect();
        days.sort();
        days.dedup();
        Self { days }
    }

    /// Creates a schedule covering every day of the week.
    pub fn daily() -> Self {
        Self::from_days(WeekDay::ALL)
    }

    /// Days in Monday-first order.
    pub fn days(&self) -> &[WeekDay] {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether the schedule includes the given day.
    pub fn contains(&self, day: WeekDay) -> bool {
        self.days.binary_search(&day).is_ok()
    }

    /// Whether a tracker with this schedule is due on the given calendar date.
    pub fn is_due_on(&self, date: chrono::NaiveDate) -> bool {
        use chrono::Datelike;
        self.contains(WeekDay::from(date.weekday()))
    }

    /// Encodes the schedule as the comma-separated storage string.
    ///
    /// The empty schedule encodes as the empty string.
    pub fn encode(&self) -> String {
        let tokens: Vec<&str> = self.days.iter().map(|day| day.as_token()).collect();
        tokens.join(",")
    }

    /// Decodes the comma-separated storage string.
    ///
    /// Strict by contract: any token that is not one of the 7 day names fails
    /// the whole decode with the offending token. The empty string decodes to
    /// the empty schedule.
    pub fn decode(encoded: &str) -> Result<Self, UnknownWeekdayToken> {
        if encoded.is_empty() {
            return Ok(Self::empty());
        }

        let mut days = Vec::new();
        for token in encoded.split(',') {
            let day = WeekDay::from_token(token)
                .ok_or_else(|| UnknownWeekdayToken(token.to_string()))?;
            days.push(day);
        }

        Ok(Self::from_days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::{Schedule, UnknownWeekdayToken, WeekDay};
    use chrono::NaiveDate;

    #[test]
    fn encode_joins_tokens_in_week_order() {
        let schedule = Schedule::from_days([WeekDay::Friday, WeekDay::Monday, WeekDay::Wednesday]);
        assert_eq!(schedule.encode(), "Monday,Wednesday,Friday");
    }

    #[test]
    fn decode_accepts_known_tokens() {
        let schedule = Schedule::decode("Monday,Wednesday,Friday").unwrap();
        assert_eq!(
            schedule.days(),
            &[WeekDay::Monday, WeekDay::Wednesday, WeekDay::Friday]
        );
    }

    #[test]
    fn empty_schedule_round_trips_as_empty_string() {
        assert_eq!(Schedule::empty().encode(), "");
        assert_eq!(Schedule::decode("").unwrap(), Schedule::empty());
    }

    #[test]
    fn decode_rejects_unknown_token() {
        let err = Schedule::decode("Monday,Mondday").unwrap_err();
        assert_eq!(err, UnknownWeekdayToken("Mondday".to_string()));
    }

    #[test]
    fn duplicate_days_collapse_to_one() {
        let schedule = Schedule::from_days([WeekDay::Monday, WeekDay::Monday, WeekDay::Sunday]);
        assert_eq!(schedule.days(), &[WeekDay::Monday, WeekDay::Sunday]);
        assert_eq!(Schedule::decode("Monday,Monday").unwrap().days(), &[WeekDay::Monday]);
    }

    #[test]
    fn is_due_on_matches_calendar_weekday() {
        let schedule = Schedule::from_days([WeekDay::Monday, WeekDay::Friday]);
        // 2024-01-01 is a Monday.
        assert!(schedule.is_due_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!schedule.is_due_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }

    #[test]
    fn full_week_round_trip() {
        let daily = Schedule::daily();
        assert_eq!(Schedule::decode(&daily.encode()).unwrap(), daily);
    }
}
