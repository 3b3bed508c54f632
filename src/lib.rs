//! School timetabling engine.
//!
//! Generates a semester's master schedule (course sections with weekly
//! meeting times, a teacher and a classroom each) and answers enrollment
//! questions against it: which sections a student may take, and whether a
//! specific enrollment is valid.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Teacher`, `Classroom`, `Section`,
//!   `Meeting`, `MeetingTime`, `Student`, history and enrollment records
//! - **`store`**: `ScheduleStore` persistence interface and `MemoryStore`
//! - **`scheduler`**: Greedy generation: offering resolution, resource
//!   assignment, availability tracking, weekly block placement, utilization
//! - **`eligibility`**: Prerequisite chains, eligible sections, enrollment rules
//! - **`validation`**: Catalog integrity checks (duplicate IDs, dangling
//!   references, prerequisite cycles)
//! - **`service`**: `TimetableService`, the concurrency-safe front end
//! - **`config`**: `SchedulerConfig`
//! - **`error`**: `TimetableError` and enrollment `Rejection`s
//!
//! # Architecture
//!
//! Generation is a single greedy pass per semester. Each course takes the
//! least-loaded eligible teacher and room, then the weekly scheduler places
//! blocks day by day until the course's weekly hours are met or the round
//! budget runs out. Shortfalls are warnings, not errors. The result is
//! planned first and committed in one step, replacing the semester's
//! previous sections.
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Classroom, Course, Semester, Teacher};
//! use u_timetable::{MemoryStore, TimetableService};
//!
//! let store = MemoryStore::new()
//!     .with_semester(Semester::new(1, 1))
//!     .with_course(Course::new(1).with_weekly_hours(3).with_semester_order(1))
//!     .with_teacher(Teacher::new(1))
//!     .with_classroom(Classroom::new(1).with_capacity(25));
//!
//! let service = TimetableService::new(store);
//! let schedule = service.generate_master_schedule(1).unwrap();
//! assert_eq!(schedule.section_count(), 1);
//! assert_eq!(schedule.sections[0].capacity, 10);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - de Werra (1985), "An introduction to timetabling"

pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{ConfigError, SchedulerConfig};
pub use eligibility::{
    CourseScheduleView, EligibleSections, EnrollmentRequest, MasterScheduleView, SectionDetail,
};
pub use error::{ErrorCategory, Rejection, Result, TimetableError};
pub use models::GeneratedSchedule;
pub use scheduler::{PlacementPolicy, UtilizationReport};
pub use service::TimetableService;
pub use store::{MemoryStore, ScheduleStore};
