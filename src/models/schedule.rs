//! Generated schedule model.
//!
//! A generation run plans one [`PlannedSection`] per offered course, then
//! commits them to the store, which assigns IDs and yields persisted
//! [`Section`]s and [`Meeting`]s. Courses that could not be fully placed
//! produce [`GenerationWarning`]s rather than errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CourseId, MeetingTime, RoomId, SectionId, SemesterId, TeacherId};

/// A section not yet committed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSection {
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    /// Seat limit.
    pub capacity: u32,
    /// Weekly hours the course asks for.
    pub required_hours: u8,
    /// Placed weekly meetings.
    pub meetings: Vec<MeetingTime>,
}

impl PlannedSection {
    /// Sum of meeting lengths in whole hours.
    pub fn scheduled_hours(&self) -> u32 {
        let minutes: i64 = self.meetings.iter().map(|m| m.duration_minutes()).sum();
        (minutes / 60) as u32
    }

    /// Whether every required hour was placed.
    pub fn is_fully_scheduled(&self) -> bool {
        self.scheduled_hours() >= u32::from(self.required_hours)
    }
}

/// A persisted section: one offering of a course in a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub semester_id: SemesterId,
    pub capacity: u32,
}

/// A persisted weekly meeting of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub section_id: SectionId,
    pub time: MeetingTime,
}

impl Meeting {
    pub fn new(section_id: SectionId, time: MeetingTime) -> Self {
        Self { section_id, time }
    }
}

impl AsRef<MeetingTime> for Meeting {
    fn as_ref(&self) -> &MeetingTime {
        &self.time
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.time, f)
    }
}

/// A course that generation could not fully serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationWarning {
    pub kind: WarningKind,
    pub course_id: CourseId,
    /// Human-readable description.
    pub message: String,
}

/// Classification of generation warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// No teacher exists; the course was skipped.
    NoTeacher,
    /// No classroom exists; the course was skipped.
    NoRoom,
    /// The round budget ran out with hours left unplaced.
    UnderScheduled { scheduled_hours: u32, required_hours: u8 },
}

impl GenerationWarning {
    /// Course skipped because no teacher was available.
    pub fn no_teacher(course_id: CourseId) -> Self {
        Self {
            kind: WarningKind::NoTeacher,
            course_id,
            message: format!("course {course_id} skipped: no teacher available"),
        }
    }

    /// Course skipped because no room was available.
    pub fn no_room(course_id: CourseId) -> Self {
        Self {
            kind: WarningKind::NoRoom,
            course_id,
            message: format!("course {course_id} skipped: no classroom available"),
        }
    }

    /// Course placed with fewer hours than required.
    pub fn under_scheduled(course_id: CourseId, scheduled_hours: u32, required_hours: u8) -> Self {
        Self {
            kind: WarningKind::UnderScheduled {
                scheduled_hours,
                required_hours,
            },
            course_id,
            message: format!(
                "course {course_id} under-scheduled: {scheduled_hours} of {required_hours} weekly hours placed"
            ),
        }
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub semester_id: SemesterId,
    /// Sections created, in course catalog order.
    pub sections: Vec<Section>,
    /// Meetings of all created sections.
    pub meetings: Vec<Meeting>,
    /// Courses that were skipped or under-scheduled.
    pub warnings: Vec<GenerationWarning>,
}

impl GeneratedSchedule {
    /// Creates an empty result for a semester.
    pub fn new(semester_id: SemesterId) -> Self {
        Self {
            semester_id,
            ..Self::default()
        }
    }

    /// Whether every offered course was fully scheduled.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of sections created.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Finds the section created for a course.
    pub fn section_for_course(&self, course_id: CourseId) -> Option<&Section> {
        self.sections.iter().find(|s| s.course_id == course_id)
    }

    /// Meetings of one section.
    pub fn meetings_for_section(&self, section_id: SectionId) -> Vec<&Meeting> {
        self.meetings
            .iter()
            .filter(|m| m.section_id == section_id)
            .collect()
    }

    /// Meetings taught by one teacher.
    pub fn meetings_for_teacher(&self, teacher_id: TeacherId) -> Vec<&Meeting> {
        self.meetings_where(|s| s.teacher_id == teacher_id)
    }

    /// Meetings held in one room.
    pub fn meetings_for_room(&self, room_id: RoomId) -> Vec<&Meeting> {
        self.meetings_where(|s| s.room_id == room_id)
    }

    /// Placed weekly hours of one section.
    pub fn scheduled_hours(&self, section_id: SectionId) -> u32 {
        let minutes: i64 = self
            .meetings_for_section(section_id)
            .iter()
            .map(|m| m.time.duration_minutes())
            .sum();
        (minutes / 60) as u32
    }

    fn meetings_where(&self, pred: impl Fn(&Section) -> bool) -> Vec<&Meeting> {
        let ids: Vec<SectionId> = self
            .sections
            .iter()
            .filter(|s| pred(s))
            .map(|s| s.id)
            .collect();
        self.meetings
            .iter()
            .filter(|m| ids.contains(&m.section_id))
            .collect()
    }
}
