//! Resource utilization metrics.
//!
//! Computes per-teacher and per-room load from persisted sections and
//! meetings. [`UtilizationReport::calculate_for_semester`] covers one term;
//! [`UtilizationReport::calculate`] rolls up every term, so its daily loads
//! and overlap counts add meetings from different semesters together.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weekly hours | Sum of meeting lengths |
//! | Utilization % | weekly hours / 35 * 100, two decimals |
//! | Daily load | Hours per school day |
//! | Overlap count (rooms) | Pairs of meetings in the room that overlap |

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{conflicts, Meeting, RoomId, SchoolDay, Section, SemesterId, TeacherId};
use crate::store::ScheduleStore;

/// Teaching hours available in a week (7 marks × 5 days).
pub const TEACHING_WEEK_HOURS: f64 = 35.0;

/// Workload of one teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherLoad {
    pub teacher_id: TeacherId,
    pub teacher_name: String,
    pub sections_assigned: usize,
    pub weekly_hours: f64,
    pub utilization_percent: f64,
    /// Hours per day, every school day present.
    pub daily_load: BTreeMap<SchoolDay, f64>,
}

/// Usage of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomUsage {
    pub room_id: RoomId,
    pub room_name: String,
    pub sections_assigned: usize,
    pub weekly_hours: f64,
    pub utilization_percent: f64,
    pub daily_load: BTreeMap<SchoolDay, f64>,
    /// Pairs of overlapping meetings. Zero for generated schedules.
    pub overlap_count: usize,
}

/// Utilization of every teacher and room in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    /// In teacher catalog order.
    pub teachers: Vec<TeacherLoad>,
    /// In room catalog order.
    pub rooms: Vec<RoomUsage>,
}

impl UtilizationReport {
    /// Report for one semester's sections.
    pub fn calculate_for_semester<S: ScheduleStore + ?Sized>(
        store: &S,
        semester_id: SemesterId,
    ) -> Self {
        Self::from_sections(store, &store.sections_for_semester(semester_id))
    }

    /// Cross-term rollup over every persisted section.
    ///
    /// Meetings of different semesters share the weekly grid here, so rooms
    /// reused across terms show overlaps.
    pub fn calculate<S: ScheduleStore + ?Sized>(store: &S) -> Self {
        Self::from_sections(store, &store.sections())
    }

    fn from_sections<S: ScheduleStore + ?Sized>(store: &S, sections: &[Section]) -> Self {
        let mut by_teacher: HashMap<TeacherId, (usize, Vec<Meeting>)> = HashMap::new();
        let mut by_room: HashMap<RoomId, (usize, Vec<Meeting>)> = HashMap::new();

        for Section {
            id,
            teacher_id,
            room_id,
            ..
        } in sections
        {
            let meetings = store.meetings_for_section(*id);

            let t = by_teacher.entry(*teacher_id).or_default();
            t.0 += 1;
            t.1.extend(meetings.iter().copied());

            let r = by_room.entry(*room_id).or_default();
            r.0 += 1;
            r.1.extend(meetings);
        }

        let teachers = store
            .teachers()
            .into_iter()
            .map(|t| {
                let (count, meetings) = by_teacher.remove(&t.id).unwrap_or_default();
                let weekly_hours = weekly_hours(&meetings);
                TeacherLoad {
                    teacher_id: t.id,
                    teacher_name: t.full_name(),
                    sections_assigned: count,
                    weekly_hours,
                    utilization_percent: percent(weekly_hours),
                    daily_load: daily_load(&meetings),
                }
            })
            .collect();

        let rooms = store
            .classrooms()
            .into_iter()
            .map(|r| {
                let (count, meetings) = by_room.remove(&r.id).unwrap_or_default();
                let weekly_hours = weekly_hours(&meetings);
                RoomUsage {
                    room_id: r.id,
                    room_name: r.name,
                    sections_assigned: count,
                    weekly_hours,
                    utilization_percent: percent(weekly_hours),
                    daily_load: daily_load(&meetings),
                    overlap_count: overlap_count(&meetings),
                }
            })
            .collect();

        Self { teachers, rooms }
    }

    pub fn teacher(&self, teacher_id: TeacherId) -> Option<&TeacherLoad> {
        self.teachers.iter().find(|t| t.teacher_id == teacher_id)
    }

    pub fn room(&self, room_id: RoomId) -> Option<&RoomUsage> {
        self.rooms.iter().find(|r| r.room_id == room_id)
    }

    /// Overlapping meeting pairs across all rooms.
    pub fn total_overlaps(&self) -> usize {
        self.rooms.iter().map(|r| r.overlap_count).sum()
    }
}

fn weekly_hours(meetings: &[Meeting]) -> f64 {
    meetings.iter().map(|m| m.time.duration_hours()).sum()
}

fn percent(hours: f64) -> f64 {
    (hours / TEACHING_WEEK_HOURS * 100.0 * 100.0).round() / 100.0
}

fn daily_load(meetings: &[Meeting]) -> BTreeMap<SchoolDay, f64> {
    let mut load: BTreeMap<SchoolDay, f64> = SchoolDay::ALL.iter().map(|&d| (d, 0.0)).collect();
    for m in meetings {
        *load.entry(m.time.day).or_insert(0.0) += m.time.duration_hours();
    }
    load
}

fn overlap_count(meetings: &[Meeting]) -> usize {
    meetings
        .iter()
        .enumerate()
        .map(|(i, a)| {
            meetings[i + 1..]
                .iter()
                .filter(|b| conflicts(&[a], &[*b]))
                .count()
        })
        .sum()
}
