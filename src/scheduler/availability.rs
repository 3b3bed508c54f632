//! Weekly availability tracking for one generation run.
//!
//! Each teacher and each room gets an [`AvailabilityGrid`]: for every day,
//! the set of hour marks still free. A mark `h` present on a day means the
//! hour `[h, h+1)` is unbooked. [`DailyHours`] tracks how many hours each
//! teacher already teaches per day.
//!
//! Grids are never persisted. [`AvailabilityBook::fresh`] builds a
//! fully-free book at the start of every run, and the generator threads
//! that one book through all course placements so earlier courses
//! constrain later ones.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::SchedulerConfig;
use crate::models::{Classroom, RoomId, SchoolDay, Teacher, TeacherId, TimeBlock};

/// Free hour marks per day for one teacher or room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityGrid {
    slots: BTreeMap<SchoolDay, BTreeSet<u8>>,
}

impl AvailabilityGrid {
    /// A grid with every mark free on every day.
    pub fn full(days: &[SchoolDay], morning: &[u8], afternoon: &[u8]) -> Self {
        let marks: BTreeSet<u8> = morning.iter().chain(afternoon.iter()).copied().collect();
        Self {
            slots: days.iter().map(|&d| (d, marks.clone())).collect(),
        }
    }

    /// A full grid for the configured week.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::full(&config.days, &config.morning_marks, &config.afternoon_marks)
    }

    /// Whether every mark of `block` is free on `day`.
    pub fn is_block_free(&self, day: SchoolDay, block: &TimeBlock) -> bool {
        match self.slots.get(&day) {
            Some(free) => block.marks().all(|h| free.contains(&h)),
            None => false,
        }
    }

    /// Books every mark of `block` on `day`.
    ///
    /// The block must be free; reserving a booked block is a caller bug.
    pub fn reserve(&mut self, day: SchoolDay, block: &TimeBlock) {
        debug_assert!(
            self.is_block_free(day, block),
            "double booking {day} {}-{}",
            block.start_hour,
            block.end_hour
        );
        if let Some(free) = self.slots.get_mut(&day) {
            for h in block.marks() {
                free.remove(&h);
            }
        }
    }

    /// Free marks on one day, ascending.
    pub fn free_marks(&self, day: SchoolDay) -> Vec<u8> {
        self.slots
            .get(&day)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Free marks summed over all days.
    pub fn total_free(&self) -> usize {
        self.slots.values().map(BTreeSet::len).sum()
    }
}

/// Teaching hours committed per teacher per day in the current run.
#[derive(Debug, Clone, Default)]
pub struct DailyHours {
    hours: HashMap<TeacherId, BTreeMap<SchoolDay, u8>>,
}

impl DailyHours {
    /// All-zero tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hours already taught by `teacher_id` on `day`.
    pub fn get(&self, teacher_id: TeacherId, day: SchoolDay) -> u8 {
        self.hours
            .get(&teacher_id)
            .and_then(|d| d.get(&day))
            .copied()
            .unwrap_or(0)
    }

    /// Adds hours for a teacher on a day.
    pub fn add(&mut self, teacher_id: TeacherId, day: SchoolDay, hours: u8) {
        *self
            .hours
            .entry(teacher_id)
            .or_default()
            .entry(day)
            .or_insert(0) += hours;
    }
}

/// All availability state for one generation run.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityBook {
    teachers: HashMap<TeacherId, AvailabilityGrid>,
    rooms: HashMap<RoomId, AvailabilityGrid>,
    daily: DailyHours,
}

impl AvailabilityBook {
    /// Full availability for every teacher and room, zero daily hours.
    pub fn fresh(teachers: &[Teacher], rooms: &[Classroom], config: &SchedulerConfig) -> Self {
        let full = AvailabilityGrid::from_config(config);
        Self {
            teachers: teachers.iter().map(|t| (t.id, full.clone())).collect(),
            rooms: rooms.iter().map(|r| (r.id, full.clone())).collect(),
            daily: DailyHours::new(),
        }
    }

    pub fn teacher_grid(&self, teacher_id: TeacherId) -> Option<&AvailabilityGrid> {
        self.teachers.get(&teacher_id)
    }

    pub fn room_grid(&self, room_id: RoomId) -> Option<&AvailabilityGrid> {
        self.rooms.get(&room_id)
    }

    /// Remaining free marks of a teacher (0 if unknown).
    pub fn teacher_free_total(&self, teacher_id: TeacherId) -> usize {
        self.teacher_grid(teacher_id)
            .map_or(0, AvailabilityGrid::total_free)
    }

    /// Remaining free marks of a room (0 if unknown).
    pub fn room_free_total(&self, room_id: RoomId) -> usize {
        self.room_grid(room_id).map_or(0, AvailabilityGrid::total_free)
    }

    /// Hours taught by a teacher on a day so far.
    pub fn daily_hours(&self, teacher_id: TeacherId, day: SchoolDay) -> u8 {
        self.daily.get(teacher_id, day)
    }

    /// Whether `block` is free on `day` for both the teacher and the room.
    pub fn is_free(
        &self,
        teacher_id: TeacherId,
        room_id: RoomId,
        day: SchoolDay,
        block: &TimeBlock,
    ) -> bool {
        let teacher_free = self
            .teacher_grid(teacher_id)
            .is_some_and(|g| g.is_block_free(day, block));
        let room_free = self
            .room_grid(room_id)
            .is_some_and(|g| g.is_block_free(day, block));
        teacher_free && room_free
    }

    /// Books `block` on `day` for the teacher and the room and adds its
    /// hours to the teacher's daily load.
    pub fn reserve(
        &mut self,
        teacher_id: TeacherId,
        room_id: RoomId,
        day: SchoolDay,
        block: &TimeBlock,
    ) {
        if let Some(g) = self.teachers.get_mut(&teacher_id) {
            g.reserve(day, block);
        }
        if let Some(g) = self.rooms.get_mut(&room_id) {
            g.reserve(day, block);
        }
        self.daily.add(teacher_id, day, block.duration());
    }
}
