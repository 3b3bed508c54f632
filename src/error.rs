//! Error types.
//!
//! Faults fall into four categories (see [`ErrorCategory`]):
//! - **NotFound**: a referenced semester, student, or course does not exist.
//! - **Rejection**: an enrollment rule was violated ([`Rejection`]).
//! - **Invariant**: the catalog or configuration is malformed.
//! - **Aborted**: generation ran past its deadline and was rolled back.
//!
//! Exhausted resources during generation (no teacher, no room, round budget
//! spent) are not errors. They are reported as
//! [`GenerationWarning`](crate::models::GenerationWarning)s.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::{CourseId, SemesterId, StudentId};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Top-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    #[error("semester not found: {0}")]
    SemesterNotFound(SemesterId),

    #[error("student not found: {0}")]
    StudentNotFound(StudentId),

    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    #[error("prerequisite cycle detected at course {course_id}")]
    CycleDetected { course_id: CourseId },

    #[error("generation exceeded its deadline of {limit_ms} ms")]
    DeadlineExceeded { limit_ms: u64 },

    #[error("enrollment rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Reason an enrollment was refused.
///
/// Checks run in a fixed order and the first violation wins:
/// prior pass, duplicate enrollment, capacity, max load, prerequisite,
/// time conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("no section offered for this course in the selected semester")]
    NoSectionOffered,

    #[error("student already passed this course")]
    AlreadyPassed,

    #[error("student already enrolled in this course this semester")]
    AlreadyEnrolled,

    #[error("section is full")]
    SectionFull,

    #[error("student reached the maximum number of courses for this semester")]
    MaxLoadReached,

    #[error("prerequisites not satisfied")]
    PrerequisiteUnmet,

    #[error("time conflict with existing schedule")]
    TimeConflict,
}

/// Coarse classification of [`TimetableError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Rejection,
    Invariant,
    Aborted,
}

impl TimetableError {
    /// Classifies the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SemesterNotFound(_) | Self::StudentNotFound(_) | Self::CourseNotFound(_) => {
                ErrorCategory::NotFound
            }
            Self::Rejected(_) => ErrorCategory::Rejection,
            Self::CycleDetected { .. } | Self::Config(_) => ErrorCategory::Invariant,
            Self::DeadlineExceeded { .. } => ErrorCategory::Aborted,
        }
    }

    /// The rejection reason, if this is an enrollment rejection.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(r) => Some(*r),
            _ => None,
        }
    }
}
