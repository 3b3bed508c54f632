//! Teacher and room selection.
//!
//! # Rules
//!
//! - **Teacher**: prefer teachers whose specialization equals the course's.
//!   A course without one prefers teachers without one. When nobody
//!   matches, every teacher is a candidate.
//! - **Room**: when the course's specialization names a room type, prefer
//!   rooms of that type; fall back to every room when none match.
//! - Among candidates, pick the one with the most remaining free hour
//!   marks in the current run. Ties go to the lowest ID.

use std::cmp::Reverse;

use super::availability::AvailabilityBook;
use crate::models::{Classroom, Course, Specialization, Teacher};

/// Picks the teacher and room for each course from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ResourceAssigner<'a> {
    teachers: &'a [Teacher],
    rooms: &'a [Classroom],
}

impl<'a> ResourceAssigner<'a> {
    pub fn new(teachers: &'a [Teacher], rooms: &'a [Classroom]) -> Self {
        Self { teachers, rooms }
    }

    /// The least-booked qualified teacher, or `None` if there are no teachers.
    pub fn pick_teacher(&self, course: &Course, book: &AvailabilityBook) -> Option<&'a Teacher> {
        let specialists: Vec<&Teacher> = self
            .teachers
            .iter()
            .filter(|t| t.specialization_id == course.specialization_id)
            .collect();
        let candidates = if specialists.is_empty() {
            self.teachers.iter().collect()
        } else {
            specialists
        };

        candidates
            .into_iter()
            .min_by_key(|t| (Reverse(book.teacher_free_total(t.id)), t.id))
    }

    /// The least-booked suitable room, or `None` if there are no rooms.
    pub fn pick_room(
        &self,
        specialization: Option<&Specialization>,
        book: &AvailabilityBook,
    ) -> Option<&'a Classroom> {
        let typed: Vec<&Classroom> = match specialization.and_then(|s| s.room_type_id) {
            Some(room_type) => self
                .rooms
                .iter()
                .filter(|r| r.room_type_id == Some(room_type))
                .collect(),
            None => Vec::new(),
        };
        let candidates = if typed.is_empty() {
            self.rooms.iter().collect()
        } else {
            typed
        };

        candidates
            .into_iter()
            .min_by_key(|r| (Reverse(book.room_free_total(r.id)), r.id))
    }
}
