//! Teaching resources: teachers and classrooms.
//!
//! Both are assigned to sections by the
//! [`ResourceAssigner`](crate::scheduler::ResourceAssigner). A teacher is
//! matched by specialization, a classroom by room type.

use serde::{Deserialize, Serialize};

use super::{RoomId, RoomTypeId, SpecializationId, TeacherId};

/// A teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Subject specialization.
    pub specialization_id: Option<SpecializationId>,
    /// Declared daily teaching limit. Only honoured when
    /// [`SchedulerConfig::respect_teacher_daily_limit`](crate::config::SchedulerConfig)
    /// is set, and never above the global daily cap.
    pub max_daily_hours: Option<u8>,
}

impl Teacher {
    /// Creates a teacher with the given ID.
    pub fn new(id: TeacherId) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            specialization_id: None,
            max_daily_hours: None,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the specialization.
    pub fn with_specialization(mut self, id: SpecializationId) -> Self {
        self.specialization_id = Some(id);
        self
    }

    /// Sets the declared daily limit.
    pub fn with_max_daily_hours(mut self, hours: u8) -> Self {
        self.max_daily_hours = Some(hours);
        self
    }

    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A classroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique room identifier.
    pub id: RoomId,
    pub name: String,
    /// Room classification (lab, gym, lecture hall...).
    pub room_type_id: Option<RoomTypeId>,
    /// Seats. `None` = unknown.
    pub capacity: Option<u32>,
}

impl Classroom {
    /// Creates a classroom with the given ID.
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            name: String::new(),
            room_type_id: None,
            capacity: None,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room type.
    pub fn with_room_type(mut self, id: RoomTypeId) -> Self {
        self.room_type_id = Some(id);
        self
    }

    /// Sets the seat count.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Section capacity offered by this room: `min(capacity, cap)`,
    /// or `cap` when the room's capacity is unknown.
    pub fn section_capacity(&self, cap: u32) -> u32 {
        self.capacity.map_or(cap, |c| c.min(cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new(3)
            .with_name("Ada", "Lovelace")
            .with_email("ada@example.edu")
            .with_specialization(1)
            .with_max_daily_hours(6);

        assert_eq!(t.id, 3);
        assert_eq!(t.full_name(), "Ada Lovelace");
        assert_eq!(t.email, "ada@example.edu");
        assert_eq!(t.specialization_id, Some(1));
        assert_eq!(t.max_daily_hours, Some(6));
    }

    #[test]
    fn test_section_capacity() {
        assert_eq!(Classroom::new(1).with_capacity(30).section_capacity(10), 10);
        assert_eq!(Classroom::new(1).with_capacity(6).section_capacity(10), 6);
        assert_eq!(Classroom::new(1).section_capacity(10), 10);
    }
}
