//! Student eligibility and enrollment validation.
//!
//! [`EligibilityEngine`] answers which sections a student may take in a
//! semester and whether a specific enrollment request is valid. Both paths
//! share [`PrerequisiteResolver`] and the meeting conflict test in
//! [`crate::models::conflicts`].

mod detail;
mod engine;
mod prerequisite;

pub use detail::{
    CourseScheduleView, EligibleSections, EnrollmentRequest, MasterScheduleView, SectionDetail,
    StudentSummary,
};
pub use engine::EligibilityEngine;
pub use prerequisite::PrerequisiteResolver;
