//! Weekly calendar primitives.
//!
//! Defines school days, meeting times, and the fixed candidate blocks
//! from which meetings are built.
//!
//! # Time Model
//! Meetings recur weekly. A [`MeetingTime`] is a half-open interval
//! `[start, end)` on one [`SchoolDay`]. Touching intervals (one ends when
//! the other starts) do not overlap.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A teaching day. Weekends are never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchoolDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl SchoolDay {
    /// All school days in week order.
    pub const ALL: [SchoolDay; 5] = [
        SchoolDay::Monday,
        SchoolDay::Tuesday,
        SchoolDay::Wednesday,
        SchoolDay::Thursday,
        SchoolDay::Friday,
    ];

    /// Uppercase name, e.g. `"MONDAY"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolDay::Monday => "MONDAY",
            SchoolDay::Tuesday => "TUESDAY",
            SchoolDay::Wednesday => "WEDNESDAY",
            SchoolDay::Thursday => "THURSDAY",
            SchoolDay::Friday => "FRIDAY",
        }
    }
}

impl fmt::Display for SchoolDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a day name is not a school day.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a school day: {0}")]
pub struct ParseDayError(pub String);

impl FromStr for SchoolDay {
    type Err = ParseDayError;

    /// Parses a day name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchoolDay::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDayError(s.to_string()))
    }
}

/// One weekly occurrence: a day and a half-open time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeetingTime {
    pub day: SchoolDay,
    /// Interval start (inclusive).
    pub start: NaiveTime,
    /// Interval end (exclusive).
    pub end: NaiveTime,
}

impl MeetingTime {
    /// Creates a meeting time.
    pub fn new(day: SchoolDay, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    /// Creates a meeting time on whole hours, e.g. `at_hours(Monday, 9, 11)`.
    pub fn at_hours(day: SchoolDay, start_hour: u8, end_hour: u8) -> Self {
        Self::new(day, hour_mark(start_hour), hour_mark(end_hour))
    }

    /// Parses `"HH:MM"` start and end strings.
    pub fn parse(day: SchoolDay, start: &str, end: &str) -> Option<Self> {
        let start = NaiveTime::parse_from_str(start, "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end, "%H:%M").ok()?;
        Some(Self::new(day, start, end))
    }

    /// Length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Length in hours (fractional).
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    /// Whether two meetings share a day and strictly overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && self.end > other.start
    }
}

impl AsRef<MeetingTime> for MeetingTime {
    fn as_ref(&self) -> &MeetingTime {
        self
    }
}

impl fmt::Display for MeetingTime {
    /// Formats as `MONDAY 9AM-11AM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            clock_label(self.start),
            clock_label(self.end)
        )
    }
}

/// Whether any meeting in `a` overlaps any meeting in `b`.
///
/// Both generation checks and enrollment checks go through this function.
/// Empty inputs never conflict, and the relation is symmetric.
pub fn conflicts<A, B>(a: &[A], b: &[B]) -> bool
where
    A: AsRef<MeetingTime>,
    B: AsRef<MeetingTime>,
{
    a.iter()
        .any(|x| b.iter().any(|y| x.as_ref().overlaps(y.as_ref())))
}

/// A fixed candidate time span, on whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl TimeBlock {
    /// Creates a block `[start_hour, end_hour)`.
    pub const fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Duration in hours.
    #[inline]
    pub fn duration(&self) -> u8 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    /// Hour marks this block spans (one per hour, by start).
    pub fn marks(&self) -> impl Iterator<Item = u8> {
        self.start_hour..self.end_hour
    }

    /// This block placed on a day.
    pub fn on(&self, day: SchoolDay) -> MeetingTime {
        MeetingTime::at_hours(day, self.start_hour, self.end_hour)
    }
}

fn hour_mark(hour: u8) -> NaiveTime {
    NaiveTime::default() + Duration::hours(i64::from(hour))
}

fn clock_label(t: NaiveTime) -> String {
    if t.minute() == 0 {
        t.format("%-I%p").to_string()
    } else {
        t.format("%-I:%M%p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parse_ignores_case() {
        assert_eq!("monday".parse::<SchoolDay>(), Ok(SchoolDay::Monday));
        assert_eq!("FRIDAY".parse::<SchoolDay>(), Ok(SchoolDay::Friday));
        assert_eq!(" Wednesday ".parse::<SchoolDay>(), Ok(SchoolDay::Wednesday));
        assert!("saturday".parse::<SchoolDay>().is_err());
    }

    #[test]
    fn test_meeting_overlap() {
        let a = MeetingTime::at_hours(SchoolDay::Monday, 9, 11);
        let b = MeetingTime::at_hours(SchoolDay::Monday, 10, 12);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = MeetingTime::at_hours(SchoolDay::Monday, 11, 12); // touching
        assert!(!a.overlaps(&c));

        let d = MeetingTime::at_hours(SchoolDay::Tuesday, 9, 11);
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_conflicts_empty() {
        let x = vec![MeetingTime::at_hours(SchoolDay::Monday, 9, 11)];
        let empty: Vec<MeetingTime> = Vec::new();
        assert!(!conflicts(&empty, &x));
        assert!(!conflicts(&x, &empty));
        assert!(!conflicts(&empty, &empty));
    }

    #[test]
    fn test_conflicts_symmetric() {
        let a = vec![
            MeetingTime::at_hours(SchoolDay::Monday, 9, 11),
            MeetingTime::at_hours(SchoolDay::Thursday, 13, 15),
        ];
        let b = vec![MeetingTime::at_hours(SchoolDay::Thursday, 14, 16)];
        let c = vec![MeetingTime::at_hours(SchoolDay::Thursday, 15, 17)];
        assert!(conflicts(&a, &b));
        assert!(conflicts(&b, &a));
        assert!(!conflicts(&a, &c));
        assert!(!conflicts(&c, &a));
    }

    #[test]
    fn test_parse_and_duration() {
        let m = MeetingTime::parse(SchoolDay::Friday, "13:00", "15:30").unwrap();
        assert_eq!(m.duration_minutes(), 150);
        assert!((m.duration_hours() - 2.5).abs() < 1e-10);
        assert!(MeetingTime::parse(SchoolDay::Friday, "1pm", "15:30").is_none());
    }

    #[test]
    fn test_display() {
        let m = MeetingTime::at_hours(SchoolDay::Monday, 9, 11);
        assert_eq!(m.to_string(), "MONDAY 9AM-11AM");

        let pm = MeetingTime::parse(SchoolDay::Tuesday, "12:00", "13:30").unwrap();
        assert_eq!(pm.to_string(), "TUESDAY 12PM-1:30PM");
    }

    #[test]
    fn test_block_marks() {
        let b = TimeBlock::new(9, 11);
        assert_eq!(b.duration(), 2);
        assert_eq!(b.marks().collect::<Vec<_>>(), vec![9, 10]);
        assert_eq!(b.on(SchoolDay::Monday), MeetingTime::at_hours(SchoolDay::Monday, 9, 11));
    }
}
