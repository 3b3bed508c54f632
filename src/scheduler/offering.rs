//! Semester course offerings.
//!
//! A course is offered in a semester when its `semester_order` equals the
//! semester's `order_in_year`. Two unset values also match.

use tracing::info;

use crate::error::{Result, TimetableError};
use crate::models::{Course, SemesterId};
use crate::store::ScheduleStore;

/// Resolves which courses a semester offers and clears prior output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseOfferingResolver;

impl CourseOfferingResolver {
    /// Courses offered in a semester, in catalog order.
    ///
    /// # Errors
    /// [`TimetableError::SemesterNotFound`] if the semester does not exist.
    pub fn courses_for_semester<S: ScheduleStore + ?Sized>(
        store: &S,
        semester_id: SemesterId,
    ) -> Result<Vec<Course>> {
        let semester = store
            .semester(semester_id)
            .ok_or(TimetableError::SemesterNotFound(semester_id))?;

        Ok(store
            .courses()
            .into_iter()
            .filter(|c| c.semester_order == semester.order_in_year)
            .collect())
    }

    /// Removes every section and meeting previously generated for a
    /// semester. Returns the number of sections removed.
    pub fn clear_generated<S: ScheduleStore + ?Sized>(
        store: &mut S,
        semester_id: SemesterId,
    ) -> usize {
        let removed = store.delete_sections_for_semester(semester_id);
        if removed > 0 {
            info!(semester_id, removed, "cleared previous sections");
        }
        removed
    }
}
