//! Prerequisite chain resolution.
//!
//! Each course names at most one direct prerequisite, so the prerequisites
//! of a course form a linear chain. A student satisfies a course's
//! prerequisites when they have passed every course along that chain.
//!
//! The walk keeps a visited set. A malformed catalog whose chain loops back
//! on itself fails with [`TimetableError::CycleDetected`] instead of
//! walking forever.

use std::collections::HashSet;

use tracing::error;

use crate::error::{Result, TimetableError};
use crate::models::{CourseId, StudentId};
use crate::store::ScheduleStore;

/// Walks prerequisite chains against a student's passed-course history.
#[derive(Debug, Clone, Copy)]
pub struct PrerequisiteResolver<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: ScheduleStore + ?Sized> PrerequisiteResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Prerequisites of `course_id`, nearest first.
    ///
    /// A prerequisite that is missing from the catalog ends the chain.
    ///
    /// # Errors
    /// [`TimetableError::CycleDetected`] if the chain revisits a course.
    pub fn chain(&self, course_id: CourseId) -> Result<Vec<CourseId>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::from([course_id]);
        let mut current = self.store.course(course_id);

        while let Some(prereq) = current.as_ref().and_then(|c| c.prerequisite_id) {
            if !visited.insert(prereq) {
                error!(course_id, at = prereq, "prerequisite cycle detected");
                return Err(TimetableError::CycleDetected { course_id: prereq });
            }
            chain.push(prereq);
            current = self.store.course(prereq);
        }

        Ok(chain)
    }

    /// Whether the student has passed every prerequisite of the course.
    ///
    /// An unknown course is never satisfied.
    pub fn satisfied(&self, student_id: StudentId, course_id: CourseId) -> Result<bool> {
        if self.store.course(course_id).is_none() {
            return Ok(false);
        }
        let chain = self.chain(course_id)?;
        if chain.is_empty() {
            return Ok(true);
        }

        let passed: HashSet<CourseId> = self
            .store
            .history_for_student(student_id)
            .into_iter()
            .filter(|h| h.is_passed())
            .map(|h| h.course_id)
            .collect();
        Ok(chain.iter().all(|c| passed.contains(c)))
    }
}
