//! Timetabling domain models.
//!
//! Catalog records (courses, teachers, rooms, semesters, students) are read
//! from a [`ScheduleStore`](crate::store::ScheduleStore). Sections and
//! meetings are produced by the generator.
//!
//! # Domain Mappings
//!
//! | u-timetable | General scheduling |
//! |-------------|--------------------|
//! | Course | Task |
//! | Section | Task instance bound to resources |
//! | Meeting | Assignment (resource × time) |
//! | Teacher / Classroom | Resource |
//! | TimeBlock | Candidate time window |

mod calendar;
mod course;
mod resource;
mod schedule;
mod student;

pub use calendar::{conflicts, MeetingTime, ParseDayError, SchoolDay, TimeBlock};
pub use course::{Course, Semester, Specialization};
pub use resource::{Classroom, Teacher};
pub use schedule::{
    GeneratedSchedule, GenerationWarning, Meeting, PlannedSection, Section, WarningKind,
};
pub use student::{HistoryStatus, Student, StudentCourseHistory, StudentEnrollment};

/// Course identifier.
pub type CourseId = u32;
/// Teacher identifier.
pub type TeacherId = u32;
/// Classroom identifier.
pub type RoomId = u32;
/// Room type identifier.
pub type RoomTypeId = u32;
/// Specialization identifier.
pub type SpecializationId = u32;
/// Semester identifier.
pub type SemesterId = u32;
/// Section identifier.
pub type SectionId = u32;
/// Student identifier.
pub type StudentId = u32;
