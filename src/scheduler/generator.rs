//! Master schedule generation.
//!
//! # Algorithm
//!
//! Generation runs in two phases so a semester's output is replaced all at
//! once or not at all.
//!
//! 1. **Plan** (read-only): resolve the semester's courses, build a fresh
//!    [`AvailabilityBook`], and for each course in catalog order pick a
//!    teacher and room, then place its weekly hours. Courses without a
//!    teacher or room are skipped with a warning. Courses whose hours could
//!    not all be placed still get a section, flagged under-scheduled.
//! 2. **Commit**: delete the semester's previous sections and meetings and
//!    insert the planned ones.
//!
//! The deadline is checked between courses. Running past it aborts the plan
//! phase, so nothing is committed.
//!
//! # Complexity
//! O(c * (t + r + w)) where c=courses, t=teachers, r=rooms, w=weekly placement.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use super::assigner::ResourceAssigner;
use super::availability::AvailabilityBook;
use super::offering::CourseOfferingResolver;
use super::weekly::{PlacementRequest, WeeklyBlockScheduler};
use crate::config::SchedulerConfig;
use crate::error::{Result, TimetableError};
use crate::models::{GeneratedSchedule, GenerationWarning, PlannedSection, SemesterId, Teacher};
use crate::store::ScheduleStore;

/// Wall-clock budget for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    /// Starts the clock. `None` never expires.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.limit.is_some_and(|l| self.start.elapsed() >= l)
    }

    /// Fails with [`TimetableError::DeadlineExceeded`] once expired.
    pub fn check(&self) -> Result<()> {
        match self.limit {
            Some(limit) if self.is_expired() => Err(TimetableError::DeadlineExceeded {
                limit_ms: limit.as_millis() as u64,
            }),
            _ => Ok(()),
        }
    }
}

/// Sections planned for a semester, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePlan {
    pub semester_id: SemesterId,
    pub sections: Vec<PlannedSection>,
    pub warnings: Vec<GenerationWarning>,
}

impl SchedulePlan {
    pub fn new(semester_id: SemesterId) -> Self {
        Self {
            semester_id,
            sections: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Builds one section per offered course.
#[derive(Debug, Clone, Copy)]
pub struct MasterScheduleGenerator<'a> {
    config: &'a SchedulerConfig,
}

impl<'a> MasterScheduleGenerator<'a> {
    pub fn new(config: &'a SchedulerConfig) -> Self {
        Self { config }
    }

    /// Plans a semester without touching the store.
    ///
    /// # Errors
    /// - [`TimetableError::SemesterNotFound`] if the semester does not exist.
    /// - [`TimetableError::DeadlineExceeded`] if the configured deadline passes.
    pub fn plan<S: ScheduleStore + ?Sized, R: Rng>(
        &self,
        store: &S,
        semester_id: SemesterId,
        rng: &mut R,
    ) -> Result<SchedulePlan> {
        let deadline = Deadline::new(self.config.deadline());
        let courses = CourseOfferingResolver::courses_for_semester(store, semester_id)?;
        let teachers = store.teachers();
        let rooms = store.classrooms();

        info!(
            semester_id,
            courses = courses.len(),
            teachers = teachers.len(),
            rooms = rooms.len(),
            "planning master schedule"
        );

        let assigner = ResourceAssigner::new(&teachers, &rooms);
        let weekly = WeeklyBlockScheduler::new(self.config);
        let mut book = AvailabilityBook::fresh(&teachers, &rooms, self.config);
        let mut plan = SchedulePlan::new(semester_id);

        for course in &courses {
            deadline.check()?;

            let Some(teacher) = assigner.pick_teacher(course, &book) else {
                warn!(course_id = course.id, "no teacher available, course skipped");
                plan.warnings.push(GenerationWarning::no_teacher(course.id));
                continue;
            };
            let specialization = course
                .specialization_id
                .and_then(|id| store.specialization(id));
            let Some(room) = assigner.pick_room(specialization.as_ref(), &book) else {
                warn!(course_id = course.id, "no classroom available, course skipped");
                plan.warnings.push(GenerationWarning::no_room(course.id));
                continue;
            };
            debug!(course_id = course.id, teacher_id = teacher.id, room_id = room.id, "assigned");

            let required_hours = course.weekly_hours_or(self.config.default_weekly_hours);
            let request = PlacementRequest {
                teacher_id: teacher.id,
                room_id: room.id,
                required_hours,
                daily_cap: self.daily_cap(teacher),
            };
            let placement = weekly.schedule(&request, &mut book, rng);

            let section = PlannedSection {
                course_id: course.id,
                teacher_id: teacher.id,
                room_id: room.id,
                capacity: room.section_capacity(self.config.section_capacity_cap),
                required_hours,
                meetings: placement.meetings,
            };
            if !section.is_fully_scheduled() {
                warn!(
                    course_id = course.id,
                    scheduled = section.scheduled_hours(),
                    required = required_hours,
                    rounds = placement.rounds,
                    "course under-scheduled"
                );
                plan.warnings.push(GenerationWarning::under_scheduled(
                    course.id,
                    section.scheduled_hours(),
                    required_hours,
                ));
            }
            plan.sections.push(section);
        }

        deadline.check()?;
        Ok(plan)
    }

    /// Replaces the semester's sections with the planned ones.
    pub fn commit<S: ScheduleStore + ?Sized>(
        &self,
        store: &mut S,
        plan: SchedulePlan,
    ) -> GeneratedSchedule {
        CourseOfferingResolver::clear_generated(store, plan.semester_id);

        let mut out = GeneratedSchedule::new(plan.semester_id);
        for planned in &plan.sections {
            let (section, meetings) = store.insert_section(plan.semester_id, planned);
            out.sections.push(section);
            out.meetings.extend(meetings);
        }
        out.warnings = plan.warnings;

        info!(
            semester_id = out.semester_id,
            sections = out.sections.len(),
            meetings = out.meetings.len(),
            warnings = out.warnings.len(),
            "master schedule committed"
        );
        out
    }

    /// Plans then commits.
    pub fn generate<S: ScheduleStore + ?Sized, R: Rng>(
        &self,
        store: &mut S,
        semester_id: SemesterId,
        rng: &mut R,
    ) -> Result<GeneratedSchedule> {
        let plan = self.plan(&*store, semester_id, rng)?;
        Ok(self.commit(store, plan))
    }

    fn daily_cap(&self, teacher: &Teacher) -> u8 {
        match teacher.max_daily_hours {
            Some(limit) if self.config.respect_teacher_daily_limit => {
                limit.min(self.config.daily_hour_cap)
            }
            _ => self.config.daily_hour_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Classroom, Course, MeetingTime, SchoolDay, Semester, Specialization, WarningKind,
    };
    use crate::scheduler::PlacementPolicy;
    use crate::store::MemoryStore;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn monday_only() -> SchedulerConfig {
        SchedulerConfig::default()
            .with_placement(PlacementPolicy::LongestEarliest)
            .with_days(vec![SchoolDay::Monday])
    }

    fn base_store() -> MemoryStore {
        MemoryStore::new()
            .with_semester(Semester::new(1, 1))
            .with_teacher(Teacher::new(1))
            .with_classroom(Classroom::new(10).with_capacity(30))
    }

    #[test]
    fn test_single_course() {
        let config = monday_only();
        let mut store =
            base_store().with_course(Course::new(100).with_weekly_hours(3).with_semester_order(1));
        let mut rng = SmallRng::seed_from_u64(0);

        let out = MasterScheduleGenerator::new(&config)
            .generate(&mut store, 1, &mut rng)
            .unwrap();

        assert!(out.is_complete());
        assert_eq!(out.section_count(), 1);
        let section = &out.sections[0];
        assert_eq!(section.teacher_id, 1);
        assert_eq!(section.room_id, 10);
        assert_eq!(section.capacity, 10);
        let times: Vec<MeetingTime> = out.meetings.iter().map(|m| m.time).collect();
        assert_eq!(
            times,
            vec![
                MeetingTime::at_hours(SchoolDay::Monday, 9, 11),
                MeetingTime::at_hours(SchoolDay::Monday, 11, 12),
            ]
        );
        assert_eq!(store.sections_for_semester(1).len(), 1);
    }

    #[test]
    fn test_daily_cap_under_schedules() {
        let config = monday_only();
        let mut store = base_store()
            .with_course(Course::new(100).with_weekly_hours(2).with_semester_order(1))
            .with_course(Course::new(101).with_weekly_hours(2).with_semester_order(1))
            .with_course(Course::new(102).with_weekly_hours(2).with_semester_order(1));
        let mut rng = SmallRng::seed_from_u64(0);

        let out = MasterScheduleGenerator::new(&config)
            .generate(&mut store, 1, &mut rng)
            .unwrap();

        assert_eq!(out.section_count(), 3);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].course_id, 102);
        assert_eq!(
            out.warnings[0].kind,
            WarningKind::UnderScheduled {
                scheduled_hours: 0,
                required_hours: 2
            }
        );
        let third = out.section_for_course(102).unwrap();
        assert!(out.meetings_for_section(third.id).is_empty());
    }

    #[test]
    fn test_missing_resources_skip() {
        let config = monday_only();
        let mut no_teacher = MemoryStore::new()
            .with_semester(Semester::new(1, 1))
            .with_classroom(Classroom::new(10))
            .with_course(Course::new(100).with_semester_order(1));
        let mut rng = SmallRng::seed_from_u64(0);
        let generator = MasterScheduleGenerator::new(&config);

        let out = generator.generate(&mut no_teacher, 1, &mut rng).unwrap();
        assert_eq!(out.section_count(), 0);
        assert_eq!(out.warnings[0].kind, WarningKind::NoTeacher);

        let mut no_room = MemoryStore::new()
            .with_semester(Semester::new(1, 1))
            .with_teacher(Teacher::new(1))
            .with_course(Course::new(100).with_semester_order(1));
        let out = generator.generate(&mut no_room, 1, &mut rng).unwrap();
        assert_eq!(out.section_count(), 0);
        assert_eq!(out.warnings[0].kind, WarningKind::NoRoom);
    }

    #[test]
    fn test_default_weekly_hours() {
        let config = SchedulerConfig::default();
        let mut store = base_store().with_course(Course::new(100).with_semester_order(1));
        let mut rng = SmallRng::seed_from_u64(5);

        let out = MasterScheduleGenerator::new(&config)
            .generate(&mut store, 1, &mut rng)
            .unwrap();
        assert_eq!(out.scheduled_hours(out.sections[0].id), 3);
    }

    #[test]
    fn test_room_type_and_capacity() {
        let config = SchedulerConfig::default();
        let mut store = base_store()
            .with_classroom(Classroom::new(20).with_room_type(4).with_capacity(6))
            .with_specialization(Specialization::new(1, "Chemistry").with_room_type(4))
            .with_course(
                Course::new(100)
                    .with_specialization(1)
                    .with_semester_order(1),
            );
        let mut rng = SmallRng::seed_from_u64(1);

        let out = MasterScheduleGenerator::new(&config)
            .generate(&mut store, 1, &mut rng)
            .unwrap();
        assert_eq!(out.sections[0].room_id, 20);
        assert_eq!(out.sections[0].capacity, 6);
    }

    #[test]
    fn test_teacher_daily_limit_respected() {
        let config = monday_only().with_teacher_daily_limits(true);
        let mut store = MemoryStore::new()
            .with_semester(Semester::new(1, 1))
            .with_teacher(Teacher::new(1).with_max_daily_hours(2))
            .with_classroom(Classroom::new(10))
            .with_course(Course::new(100).with_weekly_hours(4).with_semester_order(1));
        let mut rng = SmallRng::seed_from_u64(0);

        let out = MasterScheduleGenerator::new(&config)
            .generate(&mut store, 1, &mut rng)
            .unwrap();
        assert_eq!(out.scheduled_hours(out.sections[0].id), 2);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_regenerate_replaces() {
        let config = SchedulerConfig::default();
        let mut store = base_store()
            .with_course(Course::new(100).with_semester_order(1))
            .with_course(Course::new(101).with_semester_order(1));
        let generator = MasterScheduleGenerator::new(&config);

        let first = generator
            .generate(&mut store, 1, &mut SmallRng::seed_from_u64(1))
            .unwrap();
        let second = generator
            .generate(&mut store, 1, &mut SmallRng::seed_from_u64(2))
            .unwrap();

        assert_eq!(first.section_count(), 2);
        assert_eq!(second.section_count(), 2);
        assert_eq!(store.sections_for_semester(1), second.sections);
        assert_eq!(store.meeting_count(), second.meetings.len());
    }

    #[test]
    fn test_deadline_leaves_store_untouched() {
        let mut store = base_store().with_course(Course::new(100).with_semester_order(1));
        let mut rng = SmallRng::seed_from_u64(0);
        let ok = SchedulerConfig::default();
        let before = MasterScheduleGenerator::new(&ok)
            .generate(&mut store, 1, &mut rng)
            .unwrap();

        let expired = SchedulerConfig::default().with_deadline(Duration::ZERO);
        let result = MasterScheduleGenerator::new(&expired).generate(&mut store, 1, &mut rng);

        assert_eq!(result, Err(TimetableError::DeadlineExceeded { limit_ms: 0 }));
        assert_eq!(store.sections_for_semester(1), before.sections);
        assert_eq!(store.meeting_count(), before.meetings.len());
    }

    #[test]
    fn test_unknown_semester() {
        let config = SchedulerConfig::default();
        let mut store = base_store();
        let mut rng = SmallRng::seed_from_u64(0);
        let result = MasterScheduleGenerator::new(&config).generate(&mut store, 9, &mut rng);
        assert_eq!(result, Err(TimetableError::SemesterNotFound(9)));
    }

    #[test]
    fn test_deadline_unbounded() {
        let d = Deadline::new(None);
        assert!(!d.is_expired());
        assert_eq!(d.check(), Ok(()));
        assert!(Deadline::new(Some(Duration::ZERO)).is_expired());
    }
}
