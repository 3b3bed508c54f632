//! Course catalog records.

use serde::{Deserialize, Serialize};

use super::{CourseId, RoomTypeId, SemesterId, SpecializationId};

/// A course in the catalog.
///
/// A course has at most one direct prerequisite, so prerequisites form
/// chains rather than general graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Short code, e.g. `"MATH101"`.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Weekly contact hours. `None` = use the configured default.
    pub weekly_hours: Option<u8>,
    /// Subject specialization (matches teachers and room types).
    pub specialization_id: Option<SpecializationId>,
    /// Direct prerequisite.
    pub prerequisite_id: Option<CourseId>,
    /// Which semester slot of the program this course is offered in.
    pub semester_order: Option<u8>,
}

impl Course {
    /// Creates a course with the given ID.
    pub fn new(id: CourseId) -> Self {
        Self {
            id,
            code: String::new(),
            name: String::new(),
            weekly_hours: None,
            specialization_id: None,
            prerequisite_id: None,
            semester_order: None,
        }
    }

    /// Sets code and name.
    pub fn with_title(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.code = code.into();
        self.name = name.into();
        self
    }

    /// Sets weekly contact hours.
    pub fn with_weekly_hours(mut self, hours: u8) -> Self {
        self.weekly_hours = Some(hours);
        self
    }

    /// Sets the specialization.
    pub fn with_specialization(mut self, id: SpecializationId) -> Self {
        self.specialization_id = Some(id);
        self
    }

    /// Sets the direct prerequisite.
    pub fn with_prerequisite(mut self, id: CourseId) -> Self {
        self.prerequisite_id = Some(id);
        self
    }

    /// Sets the semester slot.
    pub fn with_semester_order(mut self, order: u8) -> Self {
        self.semester_order = Some(order);
        self
    }

    /// Weekly hours, falling back to `default` when unset.
    pub fn weekly_hours_or(&self, default: u8) -> u8 {
        self.weekly_hours.unwrap_or(default)
    }
}

/// A subject specialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: SpecializationId,
    pub name: String,
    /// Room type a course of this specialization needs.
    pub room_type_id: Option<RoomTypeId>,
}

impl Specialization {
    pub fn new(id: SpecializationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            room_type_id: None,
        }
    }

    pub fn with_room_type(mut self, room_type_id: RoomTypeId) -> Self {
        self.room_type_id = Some(room_type_id);
        self
    }
}

/// An academic semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: SemesterId,
    pub name: String,
    pub year: Option<i32>,
    /// Position within the academic year; matched against
    /// [`Course::semester_order`].
    pub order_in_year: Option<u8>,
}

impl Semester {
    pub fn new(id: SemesterId, order_in_year: u8) -> Self {
        Self {
            id,
            name: String::new(),
            year: None,
            order_in_year: Some(order_in_year),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, year: i32) -> Self {
        self.name = name.into();
        self.year = Some(year);
        self
    }

    /// `"Fall 2025"`, or whichever parts are known.
    pub fn label(&self) -> String {
        match self.year {
            Some(y) => format!("{} {}", self.name, y).trim().to_string(),
            None => self.name.clone(),
        }
    }
}
