//! Master schedule generation and utilization metrics.
//!
//! # Algorithm
//!
//! [`MasterScheduleGenerator`] walks the semester's courses in catalog
//! order. For each one, [`ResourceAssigner`] picks the least-booked
//! qualified teacher and a suitable room, then [`WeeklyBlockScheduler`]
//! places the course's weekly hours into fixed blocks. One
//! [`AvailabilityBook`] is shared across all courses of a run, so earlier
//! courses constrain later ones. The result is greedy and order-dependent,
//! and no teacher or room is ever double-booked.
//!
//! # Utilization
//!
//! [`UtilizationReport`] summarizes teacher and room load over the
//! persisted schedule.

mod assigner;
mod availability;
mod generator;
mod offering;
mod utilization;
mod weekly;

pub use assigner::ResourceAssigner;
pub use availability::{AvailabilityBook, AvailabilityGrid, DailyHours};
pub use generator::{Deadline, MasterScheduleGenerator, SchedulePlan};
pub use offering::CourseOfferingResolver;
pub use utilization::{RoomUsage, TeacherLoad, UtilizationReport, TEACHING_WEEK_HOURS};
pub use weekly::{Placement, PlacementPolicy, PlacementRequest, WeeklyBlockScheduler};
