//! Section eligibility and enrollment validation.
//!
//! # Eligibility filters
//!
//! A semester section is eligible for a student unless any of these hold,
//! checked in order:
//!
//! 1. The student is already enrolled in the section.
//! 2. The student passed the course in an earlier or the same semester.
//! 3. The section is full.
//! 4. The course's prerequisite chain is not satisfied.
//! 5. A meeting overlaps one of the student's enrolled meetings this semester.
//!
//! # Enrollment validation
//!
//! Resolves the section for a course (the first with an open seat, else the
//! first offered) and then runs the rules in fixed order, failing with the
//! first [`Rejection`]: prior pass, duplicate enrollment, capacity,
//! max load, prerequisite, time conflict.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::detail::{
    CourseScheduleView, EligibleSections, EnrollmentRequest, MasterScheduleView, SectionDetail,
    StudentSummary,
};
use super::prerequisite::PrerequisiteResolver;
use crate::config::SchedulerConfig;
use crate::error::{Rejection, Result, TimetableError};
use crate::models::{
    conflicts, CourseId, Meeting, Section, SectionId, SemesterId, StudentCourseHistory,
    StudentEnrollment, StudentId, TeacherId,
};
use crate::store::ScheduleStore;

/// Answers eligibility questions against a store.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEngine<'a, S: ?Sized> {
    store: &'a S,
    config: &'a SchedulerConfig,
}

impl<'a, S: ScheduleStore + ?Sized> EligibilityEngine<'a, S> {
    pub fn new(store: &'a S, config: &'a SchedulerConfig) -> Self {
        Self { store, config }
    }

    /// Sections of the semester the student could enroll in.
    ///
    /// An unknown student gets an empty-identity summary, not an error.
    ///
    /// # Errors
    /// [`TimetableError::CycleDetected`] if a prerequisite chain loops.
    pub fn eligible_sections(
        &self,
        student_id: StudentId,
        semester_id: SemesterId,
    ) -> Result<EligibleSections> {
        let student = self.store.student(student_id);
        let enrollments = self.store.enrollments_for_student(student_id);
        let enrolled_sections: HashSet<SectionId> =
            enrollments.iter().map(|e| e.section_id).collect();
        let history = self.store.history_for_student(student_id);
        let current = self.enrolled_meetings(&enrollments, semester_id);
        let prerequisites = PrerequisiteResolver::new(self.store);

        let mut sections = Vec::new();
        for section in self.store.sections_for_semester(semester_id) {
            if enrolled_sections.contains(&section.id) {
                debug!(section_id = section.id, "skip: already enrolled");
                continue;
            }
            if passed_by(&history, section.course_id, semester_id) {
                debug!(section_id = section.id, "skip: course already passed");
                continue;
            }
            if self.is_full(&section) {
                debug!(section_id = section.id, "skip: section full");
                continue;
            }
            if !prerequisites.satisfied(student_id, section.course_id)? {
                debug!(section_id = section.id, "skip: prerequisites unmet");
                continue;
            }
            let meetings = self.store.meetings_for_section(section.id);
            if conflicts(&meetings, &current) {
                debug!(section_id = section.id, "skip: time conflict");
                continue;
            }
            sections.push(self.detail(&section, meetings));
        }

        Ok(EligibleSections {
            student: StudentSummary::new(student_id, student.as_ref()),
            sections,
        })
    }

    /// Checks an enrollment request and returns the section it would take.
    ///
    /// # Errors
    /// - [`TimetableError::Rejected`] with [`Rejection::MissingField`] if a field is absent.
    /// - [`TimetableError::StudentNotFound`] / [`TimetableError::CourseNotFound`].
    /// - [`TimetableError::Rejected`] with the first violated rule.
    /// - [`TimetableError::CycleDetected`] if the prerequisite chain loops.
    pub fn validate_enrollment(&self, request: &EnrollmentRequest) -> Result<SectionId> {
        let (student_id, course_id, semester_id) = request.require()?;

        if self.store.student(student_id).is_none() {
            return Err(TimetableError::StudentNotFound(student_id));
        }
        if self.store.course(course_id).is_none() {
            return Err(TimetableError::CourseNotFound(course_id));
        }

        let section = self.resolve_section(course_id, semester_id)?;
        let enrollments = self.store.enrollments_for_student(student_id);
        let history = self.store.history_for_student(student_id);

        let verdict = self.check_rules(student_id, &section, semester_id, &enrollments, &history);
        if let Err(TimetableError::Rejected(reason)) = &verdict {
            debug!(
                student_id,
                course_id,
                semester_id,
                reason = %reason,
                "enrollment rejected"
            );
        }
        verdict.map(|()| section.id)
    }

    /// Display view of one section.
    pub fn section_detail(&self, section: &Section) -> SectionDetail {
        self.detail(section, self.store.meetings_for_section(section.id))
    }

    /// The student's enrolled sections in a semester.
    pub fn student_schedule(
        &self,
        student_id: StudentId,
        semester_id: SemesterId,
    ) -> Vec<SectionDetail> {
        self.store
            .enrollments_for_student(student_id)
            .iter()
            .filter(|e| e.semester_id == semester_id)
            .filter_map(|e| self.store.section(e.section_id))
            .map(|s| self.section_detail(&s))
            .collect()
    }

    /// Every section a teacher teaches.
    pub fn teacher_schedule(&self, teacher_id: TeacherId) -> Vec<SectionDetail> {
        self.store
            .sections_for_teacher(teacher_id)
            .iter()
            .map(|s| self.section_detail(s))
            .collect()
    }

    /// Every persisted section of the semester.
    ///
    /// # Errors
    /// [`TimetableError::SemesterNotFound`] if the semester does not exist.
    pub fn master_schedule(&self, semester_id: SemesterId) -> Result<MasterScheduleView> {
        let semester = self
            .store
            .semester(semester_id)
            .ok_or(TimetableError::SemesterNotFound(semester_id))?;
        let sections = self
            .store
            .sections_for_semester(semester_id)
            .iter()
            .map(|s| self.section_detail(s))
            .collect();

        Ok(MasterScheduleView {
            semester_id,
            semester: semester.label(),
            sections,
        })
    }

    /// The semester's sections grouped by course code.
    ///
    /// # Errors
    /// [`TimetableError::SemesterNotFound`] if the semester does not exist.
    pub fn course_schedule(&self, semester_id: SemesterId) -> Result<CourseScheduleView> {
        let view = self.master_schedule(semester_id)?;
        let mut courses: BTreeMap<String, Vec<SectionDetail>> = BTreeMap::new();
        for detail in view.sections {
            let code = detail.course_code.clone().unwrap_or_else(|| "UNKNOWN".into());
            courses.entry(code).or_default().push(detail);
        }
        Ok(CourseScheduleView {
            semester_id,
            courses,
        })
    }

    fn resolve_section(&self, course_id: CourseId, semester_id: SemesterId) -> Result<Section> {
        let mut offered = self.store.sections_for_course(course_id, semester_id);
        if offered.is_empty() {
            return Err(Rejection::NoSectionOffered.into());
        }
        let open = offered.iter().position(|s| !self.is_full(s)).unwrap_or(0);
        Ok(offered.swap_remove(open))
    }

    fn check_rules(
        &self,
        student_id: StudentId,
        section: &Section,
        semester_id: SemesterId,
        enrollments: &[StudentEnrollment],
        history: &[StudentCourseHistory],
    ) -> Result<()> {
        let course_id = section.course_id;

        if passed_by(history, course_id, semester_id) {
            return Err(Rejection::AlreadyPassed.into());
        }
        if enrollments
            .iter()
            .any(|e| e.course_id == course_id && e.semester_id == semester_id)
        {
            return Err(Rejection::AlreadyEnrolled.into());
        }
        if self.is_full(section) {
            return Err(Rejection::SectionFull.into());
        }
        let load = enrollments
            .iter()
            .filter(|e| e.semester_id == semester_id)
            .count();
        if load >= self.config.max_courses_per_semester {
            return Err(Rejection::MaxLoadReached.into());
        }
        if !PrerequisiteResolver::new(self.store).satisfied(student_id, course_id)? {
            return Err(Rejection::PrerequisiteUnmet.into());
        }
        let target = self.store.meetings_for_section(section.id);
        if conflicts(&target, &self.enrolled_meetings(enrollments, semester_id)) {
            return Err(Rejection::TimeConflict.into());
        }
        Ok(())
    }

    fn is_full(&self, section: &Section) -> bool {
        self.store.enrollment_count(section.id) >= section.capacity as usize
    }

    fn enrolled_meetings(
        &self,
        enrollments: &[StudentEnrollment],
        semester_id: SemesterId,
    ) -> Vec<Meeting> {
        enrollments
            .iter()
            .filter(|e| e.semester_id == semester_id)
            .flat_map(|e| self.store.meetings_for_section(e.section_id))
            .collect()
    }

    fn detail(&self, section: &Section, mut meetings: Vec<Meeting>) -> SectionDetail {
        let course = self.store.course(section.course_id);
        let teacher = self.store.teacher(section.teacher_id);
        let room = self.store.classroom(section.room_id);
        let enrolled = self.store.enrollment_count(section.id);

        meetings.sort_by_key(|m| (m.time.day, m.time.start));

        SectionDetail {
            section_id: section.id,
            course_id: section.course_id,
            course_code: course.as_ref().map(|c| c.code.clone()),
            course_name: course.map(|c| c.name),
            teacher_name: teacher.as_ref().map(|t| t.full_name()),
            teacher_email: teacher.map(|t| t.email),
            room_name: room.map(|r| r.name),
            meetings,
            enrolled,
            capacity: section.capacity,
            seats_available: section.capacity.saturating_sub(enrolled as u32),
        }
    }
}

/// Whether the history shows a pass of the course no later than the semester.
fn passed_by(
    history: &[StudentCourseHistory],
    course_id: CourseId,
    semester_id: SemesterId,
) -> bool {
    history
        .iter()
        .any(|h| h.is_passed() && h.course_id == course_id && h.semester_id <= semester_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Classroom, Course, MeetingTime, SchoolDay, Semester, Student, StudentCourseHistory, Teacher,
    };
    use crate::store::MemoryStore;

    fn section(id: SectionId, course_id: CourseId, semester: SemesterId, capacity: u32) -> Section {
        Section {
            id,
            course_id,
            teacher_id: 1,
            room_id: 1,
            semester_id: semester,
            capacity,
        }
    }

    fn at(section_id: SectionId, day: SchoolDay, start: u8, end: u8) -> Meeting {
        Meeting::new(section_id, MeetingTime::at_hours(day, start, end))
    }

    fn enroll(store: &mut MemoryStore, student_id: StudentId, section: &Section) {
        store.insert_enrollment(StudentEnrollment {
            student_id,
            course_id: section.course_id,
            semester_id: section.semester_id,
            section_id: section.id,
        });
    }

    /// Semester 2 offers sections 1..=4 for courses 10..=13.
    fn fixture() -> MemoryStore {
        let mut s = MemoryStore::new()
            .with_semester(Semester::new(2, 2))
            .with_student(Student::new(1).with_name("Mina", "Lee").with_email("mina@school.test"))
            .with_student(Student::new(2))
            .with_teacher(Teacher::new(1).with_name("Ada", "Park").with_email("ada@school.test"))
            .with_classroom(Classroom::new(1).with_name("Room 101"))
            .with_course(Course::new(10).with_title("MATH101", "Algebra I"))
            .with_course(Course::new(11).with_title("MATH201", "Algebra II").with_prerequisite(10))
            .with_course(Course::new(12).with_title("ART100", "Drawing"))
            .with_course(Course::new(13).with_title("SCI100", "Biology"));
        s.add_section(section(1, 10, 2, 10), vec![at(1, SchoolDay::Monday, 9, 11)]);
        s.add_section(section(2, 11, 2, 10), vec![at(2, SchoolDay::Tuesday, 9, 11)]);
        s.add_section(section(3, 12, 2, 1), vec![at(3, SchoolDay::Wednesday, 13, 15)]);
        s.add_section(
            section(4, 13, 2, 10),
            vec![at(4, SchoolDay::Thursday, 15, 17), at(4, SchoolDay::Monday, 11, 12)],
        );
        s
    }

    fn ids(store: &MemoryStore, student_id: StudentId) -> Vec<SectionId> {
        let config = SchedulerConfig::default();
        EligibilityEngine::new(store, &config)
            .eligible_sections(student_id, 2)
            .unwrap()
            .section_ids()
    }

    #[test]
    fn test_fresh_student() {
        let s = fixture();
        // Section 2 needs course 10
        assert_eq!(ids(&s, 1), vec![1, 3, 4]);
    }

    #[test]
    fn test_enrolled_section_excluded() {
        let mut s = fixture();
        enroll(&mut s, 1, &section(4, 13, 2, 10));
        assert_eq!(ids(&s, 1), vec![1, 3]);
    }

    #[test]
    fn test_passed_course_excluded() {
        let mut s = fixture();
        s.add_history(StudentCourseHistory::passed(1, 10, 1));
        // Course 10 passed: section 1 gone, section 2 unlocked
        assert_eq!(ids(&s, 1), vec![2, 3, 4]);
    }

    #[test]
    fn test_pass_in_later_semester_ignored() {
        let mut s = fixture();
        s.add_history(StudentCourseHistory::passed(1, 12, 5));
        assert_eq!(ids(&s, 1), vec![1, 3, 4]);
    }

    #[test]
    fn test_full_section_excluded() {
        let mut s = fixture();
        enroll(&mut s, 2, &section(3, 12, 2, 1));
        assert_eq!(ids(&s, 1), vec![1, 4]);
    }

    #[test]
    fn test_conflict_excluded() {
        let mut s = fixture();
        s.add_section(section(5, 12, 2, 10), vec![at(5, SchoolDay::Monday, 10, 12)]);
        enroll(&mut s, 1, &section(5, 12, 2, 10));
        // Section 1 (Mon 9-11) and section 4 (Mon 11-12) overlap Mon 10-12
        assert_eq!(ids(&s, 1), vec![3]);
    }

    #[test]
    fn test_other_semester_meetings_do_not_conflict() {
        let mut s = fixture();
        s.add_section(section(6, 12, 1, 10), vec![at(6, SchoolDay::Monday, 9, 11)]);
        enroll(&mut s, 1, &section(6, 12, 1, 10));
        assert_eq!(ids(&s, 1), vec![1, 3, 4]);
    }

    #[test]
    fn test_unknown_student() {
        let s = fixture();
        let config = SchedulerConfig::default();
        let out = EligibilityEngine::new(&s, &config)
            .eligible_sections(99, 2)
            .unwrap();
        assert!(!out.student.is_known());
        assert_eq!(out.section_ids(), vec![1, 3, 4]);
        assert_eq!(out.message(), "Eligible sections found.");
    }

    #[test]
    fn test_empty_semester() {
        let s = fixture();
        let config = SchedulerConfig::default();
        let out = EligibilityEngine::new(&s, &config)
            .eligible_sections(1, 9)
            .unwrap();
        assert!(out.sections.is_empty());
        assert_eq!(out.message(), "No eligible sections available for this student.");
    }

    #[test]
    fn test_section_detail() {
        let mut s = fixture();
        enroll(&mut s, 2, &section(4, 13, 2, 10));
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);

        let d = engine.section_detail(&section(4, 13, 2, 10));
        assert_eq!(d.course_label(), "SCI100 - Biology");
        assert_eq!(d.teacher_name.as_deref(), Some("Ada Park"));
        assert_eq!(d.teacher_email.as_deref(), Some("ada@school.test"));
        assert_eq!(d.room_name.as_deref(), Some("Room 101"));
        assert_eq!(d.schedule_lines(), vec!["MONDAY 11AM-12PM", "THURSDAY 3PM-5PM"]);
        assert_eq!(d.seats_label(), "1 (9 spots available)");
    }

    #[test]
    fn test_validate_ok() {
        let s = fixture();
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(engine.validate_enrollment(&EnrollmentRequest::new(1, 10, 2)), Ok(1));
    }

    #[test]
    fn test_validate_not_found() {
        let s = fixture();
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(42, 10, 2)),
            Err(TimetableError::StudentNotFound(42))
        );
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(1, 42, 2)),
            Err(TimetableError::CourseNotFound(42))
        );
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::default()),
            Err(TimetableError::Rejected(Rejection::MissingField("studentId")))
        );
    }

    #[test]
    fn test_validate_no_section() {
        let s = fixture();
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(1, 10, 7)),
            Err(TimetableError::Rejected(Rejection::NoSectionOffered))
        );
    }

    #[test]
    fn test_validate_rule_order() {
        let mut s = fixture();
        let config = SchedulerConfig::default();

        // Passed and full at once: prior pass is reported first
        s.add_history(StudentCourseHistory::passed(1, 12, 2));
        enroll(&mut s, 2, &section(3, 12, 2, 1));
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(1, 12, 2)),
            Err(TimetableError::Rejected(Rejection::AlreadyPassed))
        );
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(2, 12, 2)),
            Err(TimetableError::Rejected(Rejection::AlreadyEnrolled))
        );
    }

    #[test]
    fn test_validate_section_full() {
        let mut s = fixture();
        enroll(&mut s, 2, &section(3, 12, 2, 1));
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(1, 12, 2)),
            Err(TimetableError::Rejected(Rejection::SectionFull))
        );
    }

    #[test]
    fn test_validate_picks_open_section() {
        let mut s = fixture();
        s.add_section(section(7, 12, 2, 5), vec![at(7, SchoolDay::Friday, 9, 11)]);
        enroll(&mut s, 2, &section(3, 12, 2, 1));
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(engine.validate_enrollment(&EnrollmentRequest::new(1, 12, 2)), Ok(7));
    }

    #[test]
    fn test_validate_max_load() {
        let mut s = fixture();
        let config = SchedulerConfig::default().with_max_courses_per_semester(1);
        enroll(&mut s, 1, &section(4, 13, 2, 10));
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(1, 10, 2)),
            Err(TimetableError::Rejected(Rejection::MaxLoadReached))
        );
    }

    #[test]
    fn test_validate_prerequisite() {
        let s = fixture();
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(1, 11, 2)),
            Err(TimetableError::Rejected(Rejection::PrerequisiteUnmet))
        );
    }

    #[test]
    fn test_validate_time_conflict() {
        let mut s = fixture();
        s.add_section(section(5, 12, 2, 10), vec![at(5, SchoolDay::Monday, 10, 12)]);
        enroll(&mut s, 1, &section(5, 12, 2, 10));
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);
        assert_eq!(
            engine.validate_enrollment(&EnrollmentRequest::new(1, 10, 2)),
            Err(TimetableError::Rejected(Rejection::TimeConflict))
        );
    }

    #[test]
    fn test_student_and_teacher_schedule() {
        let mut s = fixture();
        enroll(&mut s, 1, &section(4, 13, 2, 10));
        enroll(&mut s, 1, &section(1, 10, 2, 10));
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);

        let mine: Vec<_> = engine
            .student_schedule(1, 2)
            .iter()
            .map(|d| d.section_id)
            .collect();
        assert_eq!(mine, vec![4, 1]);
        assert!(engine.student_schedule(1, 1).is_empty());
        assert_eq!(engine.teacher_schedule(1).len(), 4);
        assert!(engine.teacher_schedule(9).is_empty());
    }

    #[test]
    fn test_master_schedule() {
        let mut s = fixture().with_semester(Semester::new(3, 1).with_name("Fall", 2025));
        s.add_section(section(8, 10, 3, 10), vec![at(8, SchoolDay::Friday, 9, 11)]);
        enroll(&mut s, 1, &section(1, 10, 2, 10));
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);

        let spring = engine.master_schedule(2).unwrap();
        assert_eq!(spring.semester, "");
        let listed: Vec<_> = spring.sections.iter().map(|d| d.section_id).collect();
        assert_eq!(listed, vec![1, 2, 3, 4]);
        assert_eq!(spring.sections[0].enrolled, 1);
        assert_eq!(spring.sections[3].meetings[0].time.day, SchoolDay::Monday);

        let fall = engine.master_schedule(3).unwrap();
        assert_eq!(fall.semester, "Fall 2025");
        assert_eq!(fall.sections.len(), 1);
        assert_eq!(fall.sections[0].room_name.as_deref(), Some("Room 101"));

        assert_eq!(
            engine.master_schedule(9),
            Err(TimetableError::SemesterNotFound(9))
        );
    }

    #[test]
    fn test_course_schedule_groups_by_code() {
        let mut s = fixture();
        s.add_section(section(6, 10, 2, 10), vec![at(6, SchoolDay::Friday, 13, 15)]);
        s.add_section(section(9, 99, 2, 10), vec![]);
        let config = SchedulerConfig::default();
        let engine = EligibilityEngine::new(&s, &config);

        let view = engine.course_schedule(2).unwrap();
        assert_eq!(view.semester_id, 2);
        assert_eq!(
            view.courses.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["ART100", "MATH101", "MATH201", "SCI100", "UNKNOWN"]
        );
        let algebra: Vec<_> = view.sections_for("MATH101").iter().map(|d| d.section_id).collect();
        assert_eq!(algebra, vec![1, 6]);
        assert_eq!(view.sections_for("UNKNOWN")[0].section_id, 9);
        assert!(view.sections_for("PHY100").is_empty());
        assert!(engine.course_schedule(7).is_err());
    }
}
