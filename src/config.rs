//! Scheduler configuration.
//!
//! Defaults reproduce the standard school week: Monday to Friday, hour
//! marks 9–11 and 13–16 (no slot at noon), the four fixed blocks
//! 9–11, 11–12, 13–15, 15–17, and a 4-hour daily teaching cap.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{SchoolDay, TimeBlock};
use crate::scheduler::PlacementPolicy;

/// Default daily teaching cap (hours).
pub const DEFAULT_DAILY_HOUR_CAP: u8 = 4;
/// Default weekly scheduler round budget.
pub const DEFAULT_MAX_ROUNDS: u32 = 100;
/// Default upper bound on section capacity.
pub const DEFAULT_SECTION_CAPACITY: u32 = 10;
/// Default weekly hours for courses that declare none.
pub const DEFAULT_WEEKLY_HOURS: u8 = 3;
/// Default per-semester course load limit.
pub const DEFAULT_MAX_COURSES_PER_SEMESTER: usize = 5;

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no schedulable days configured")]
    NoDays,
    #[error("round budget must be positive")]
    ZeroRounds,
    #[error("placement top-k must be positive")]
    ZeroTopK,
    #[error("block {start}-{end} spans hours outside the availability marks")]
    BlockOutsideMarks { start: u8, end: u8 },
}

/// Tunable parameters for generation and enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Schedulable days, in rotation order.
    pub days: Vec<SchoolDay>,
    /// Morning hour marks.
    pub morning_marks: Vec<u8>,
    /// Afternoon hour marks.
    pub afternoon_marks: Vec<u8>,
    /// Placeable block catalog.
    pub blocks: Vec<TimeBlock>,
    /// Maximum teaching hours per teacher per day.
    pub daily_hour_cap: u8,
    /// Rounds the weekly scheduler may spend on one course.
    pub max_rounds: u32,
    /// How a block is chosen among the eligible ones.
    pub placement: PlacementPolicy,
    /// Section capacity never exceeds this; also used when room capacity is unknown.
    pub section_capacity_cap: u32,
    /// Weekly hours for courses without a requirement.
    pub default_weekly_hours: u8,
    /// Enrollment load limit per student per semester.
    pub max_courses_per_semester: usize,
    /// Let a teacher's declared daily limit tighten the cap.
    pub respect_teacher_daily_limit: bool,
    /// Generation deadline in milliseconds. `None` = unbounded.
    pub deadline_ms: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            days: SchoolDay::ALL.to_vec(),
            morning_marks: vec![9, 10, 11],
            afternoon_marks: vec![13, 14, 15, 16],
            blocks: vec![
                TimeBlock::new(9, 11),
                TimeBlock::new(11, 12),
                TimeBlock::new(13, 15),
                TimeBlock::new(15, 17),
            ],
            daily_hour_cap: DEFAULT_DAILY_HOUR_CAP,
            max_rounds: DEFAULT_MAX_ROUNDS,
            placement: PlacementPolicy::default(),
            section_capacity_cap: DEFAULT_SECTION_CAPACITY,
            default_weekly_hours: DEFAULT_WEEKLY_HOURS,
            max_courses_per_semester: DEFAULT_MAX_COURSES_PER_SEMESTER,
            respect_teacher_daily_limit: false,
            deadline_ms: None,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block placement policy.
    pub fn with_placement(mut self, placement: PlacementPolicy) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the weekly scheduler round budget.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Sets the daily teaching cap.
    pub fn with_daily_hour_cap(mut self, hours: u8) -> Self {
        self.daily_hour_cap = hours;
        self
    }

    /// Sets the schedulable days.
    pub fn with_days(mut self, days: Vec<SchoolDay>) -> Self {
        self.days = days;
        self
    }

    /// Sets the enrollment load limit.
    pub fn with_max_courses_per_semester(mut self, max: usize) -> Self {
        self.max_courses_per_semester = max;
        self
    }

    /// Honours teachers' declared daily limits.
    pub fn with_teacher_daily_limits(mut self, respect: bool) -> Self {
        self.respect_teacher_daily_limit = respect;
        self
    }

    /// Sets a generation deadline, rounded up to whole milliseconds.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        let partial = deadline.subsec_nanos() % 1_000_000 != 0;
        let ms = deadline.as_millis() + u128::from(partial);
        self.deadline_ms = Some(u64::try_from(ms).unwrap_or(u64::MAX));
        self
    }

    /// Generation deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// All hour marks, morning then afternoon.
    pub fn hour_marks(&self) -> impl Iterator<Item = u8> + '_ {
        self.morning_marks
            .iter()
            .chain(self.afternoon_marks.iter())
            .copied()
    }

    /// Checks the configuration for unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days.is_empty() {
            return Err(ConfigError::NoDays);
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if let PlacementPolicy::LongestTopK(0) = self.placement {
            return Err(ConfigError::ZeroTopK);
        }
        let marks: Vec<u8> = self.hour_marks().collect();
        for b in &self.blocks {
            if b.duration() == 0 || b.marks().any(|h| !marks.contains(&h)) {
                return Err(ConfigError::BlockOutsideMarks {
                    start: b.start_hour,
                    end: b.end_hour,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let c = SchedulerConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.days.len(), 5);
        assert_eq!(c.hour_marks().collect::<Vec<_>>(), vec![9, 10, 11, 13, 14, 15, 16]);
        assert_eq!(c.daily_hour_cap, 4);
        assert_eq!(c.max_rounds, 100);
        assert_eq!(c.placement, PlacementPolicy::LongestTopK(3));
        assert!(c.deadline().is_none());
    }

    #[test]
    fn test_builder() {
        let c = SchedulerConfig::new()
            .with_placement(PlacementPolicy::LongestEarliest)
            .with_max_rounds(10)
            .with_daily_hour_cap(3)
            .with_max_courses_per_semester(6)
            .with_teacher_daily_limits(true)
            .with_deadline(Duration::from_millis(250));

        assert_eq!(c.placement, PlacementPolicy::LongestEarliest);
        assert_eq!(c.max_rounds, 10);
        assert_eq!(c.daily_hour_cap, 3);
        assert_eq!(c.max_courses_per_semester, 6);
        assert!(c.respect_teacher_daily_limit);
        assert_eq!(c.deadline(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_deadline_rounds_up() {
        let sub_ms = SchedulerConfig::new().with_deadline(Duration::from_micros(300));
        assert_eq!(sub_ms.deadline(), Some(Duration::from_millis(1)));

        let fractional = SchedulerConfig::new().with_deadline(Duration::from_micros(2_500));
        assert_eq!(fractional.deadline_ms, Some(3));

        assert_eq!(SchedulerConfig::new().with_deadline(Duration::ZERO).deadline_ms, Some(0));
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(
            SchedulerConfig::new().with_days(vec![]).validate(),
            Err(ConfigError::NoDays)
        );
        assert_eq!(
            SchedulerConfig::new().with_max_rounds(0).validate(),
            Err(ConfigError::ZeroRounds)
        );
        assert_eq!(
            SchedulerConfig::new()
                .with_placement(PlacementPolicy::LongestTopK(0))
                .validate(),
            Err(ConfigError::ZeroTopK)
        );

        let mut lunch = SchedulerConfig::new();
        lunch.blocks.push(TimeBlock::new(11, 13)); // crosses the noon gap
        assert_eq!(
            lunch.validate(),
            Err(ConfigError::BlockOutsideMarks { start: 11, end: 13 })
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{ "max_rounds": 20, "days": ["MONDAY", "WEDNESDAY"], "deadline_ms": 500 }"#;
        let c: SchedulerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.max_rounds, 20);
        assert_eq!(c.days, vec![SchoolDay::Monday, SchoolDay::Wednesday]);
        assert_eq!(c.deadline(), Some(Duration::from_millis(500)));
        // Unspecified fields keep their defaults
        assert_eq!(c.daily_hour_cap, DEFAULT_DAILY_HOUR_CAP);
        assert_eq!(c.blocks.len(), 4);
    }
}
