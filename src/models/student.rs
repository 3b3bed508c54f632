//! Student records: identity, enrollments, and course history.
//!
//! These are read-only inputs for eligibility checks. Only the enrollment
//! write path ([`TimetableService::enroll`](crate::service::TimetableService::enroll))
//! creates new [`StudentEnrollment`]s.

use serde::{Deserialize, Serialize};

use super::{CourseId, SectionId, SemesterId, StudentId};

/// A student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade_level: Option<u8>,
}

impl Student {
    pub fn new(id: StudentId) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            grade_level: None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_grade_level(mut self, grade: u8) -> Self {
        self.grade_level = Some(grade);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Outcome of a past course attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Passed,
    Failed,
}

/// One past attempt at a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentCourseHistory {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub semester_id: SemesterId,
    pub status: HistoryStatus,
}

impl StudentCourseHistory {
    pub fn passed(student_id: StudentId, course_id: CourseId, semester_id: SemesterId) -> Self {
        Self {
            student_id,
            course_id,
            semester_id,
            status: HistoryStatus::Passed,
        }
    }

    pub fn failed(student_id: StudentId, course_id: CourseId, semester_id: SemesterId) -> Self {
        Self {
            status: HistoryStatus::Failed,
            ..Self::passed(student_id, course_id, semester_id)
        }
    }

    #[inline]
    pub fn is_passed(&self) -> bool {
        self.status == HistoryStatus::Passed
    }
}

/// A seat held by a student in a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEnrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub semester_id: SemesterId,
    pub section_id: SectionId,
}
