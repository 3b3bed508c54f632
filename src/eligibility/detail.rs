//! Request and view types for eligibility queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::models::{CourseId, Meeting, SectionId, SemesterId, Student, StudentId};

/// An enrollment attempt. Every field is required; missing ones are
/// rejected with [`Rejection::MissingField`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub student_id: Option<StudentId>,
    pub course_id: Option<CourseId>,
    pub semester_id: Option<SemesterId>,
}

impl EnrollmentRequest {
    /// A request with every field set.
    pub fn new(student_id: StudentId, course_id: CourseId, semester_id: SemesterId) -> Self {
        Self {
            student_id: Some(student_id),
            course_id: Some(course_id),
            semester_id: Some(semester_id),
        }
    }

    /// The three IDs, or the first missing field.
    pub fn require(&self) -> Result<(StudentId, CourseId, SemesterId), Rejection> {
        let student = self.student_id.ok_or(Rejection::MissingField("studentId"))?;
        let course = self.course_id.ok_or(Rejection::MissingField("courseId"))?;
        let semester = self.semester_id.ok_or(Rejection::MissingField("semesterId"))?;
        Ok((student, course, semester))
    }
}

/// Identity of the student an eligibility answer is about.
///
/// The optional fields are `None` when the student is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: StudentId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub grade_level: Option<u8>,
}

impl StudentSummary {
    pub fn new(id: StudentId, student: Option<&Student>) -> Self {
        match student {
            Some(s) => Self {
                id,
                name: Some(s.full_name()),
                email: Some(s.email.clone()),
                grade_level: s.grade_level,
            },
            None => Self {
                id,
                name: None,
                email: None,
                grade_level: None,
            },
        }
    }

    /// Whether the student exists in the catalog.
    pub fn is_known(&self) -> bool {
        self.name.is_some()
    }
}

/// Display-ready view of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDetail {
    pub section_id: SectionId,
    pub course_id: CourseId,
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub teacher_name: Option<String>,
    pub teacher_email: Option<String>,
    pub room_name: Option<String>,
    /// Sorted by day, then start.
    pub meetings: Vec<Meeting>,
    pub enrolled: usize,
    pub capacity: u32,
    pub seats_available: u32,
}

impl SectionDetail {
    /// `"MATH101 - Algebra I"`, with placeholders for a missing course.
    pub fn course_label(&self) -> String {
        format!(
            "{} - {}",
            self.course_code.as_deref().unwrap_or("UNKNOWN"),
            self.course_name.as_deref().unwrap_or("Unknown")
        )
    }

    /// Meeting lines such as `"MONDAY 9AM-11AM"`.
    pub fn schedule_lines(&self) -> Vec<String> {
        self.meetings.iter().map(ToString::to_string).collect()
    }

    /// `"3 (7 spots available)"` or `"10 (capacity full)"`.
    pub fn seats_label(&self) -> String {
        if self.seats_available == 0 {
            format!("{} (capacity full)", self.enrolled)
        } else {
            format!("{} ({} spots available)", self.enrolled, self.seats_available)
        }
    }

    pub fn is_full(&self) -> bool {
        self.seats_available == 0
    }
}

/// Answer to an eligible-sections query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleSections {
    pub student: StudentSummary,
    pub sections: Vec<SectionDetail>,
}

impl EligibleSections {
    pub fn message(&self) -> &'static str {
        if self.sections.is_empty() {
            "No eligible sections available for this student."
        } else {
            "Eligible sections found."
        }
    }

    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.section_id).collect()
    }
}

/// A semester's persisted sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterScheduleView {
    pub semester_id: SemesterId,
    /// `"Fall 2025"`, see [`Semester::label`](crate::models::Semester::label).
    pub semester: String,
    /// Ascending by section ID.
    pub sections: Vec<SectionDetail>,
}

/// A semester's sections grouped by course code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseScheduleView {
    pub semester_id: SemesterId,
    /// Keyed by course code; `"UNKNOWN"` when the course is missing.
    pub courses: BTreeMap<String, Vec<SectionDetail>>,
}

impl CourseScheduleView {
    pub fn sections_for(&self, course_code: &str) -> &[SectionDetail] {
        self.courses.get(course_code).map(Vec::as_slice).unwrap_or_default()
    }
}
