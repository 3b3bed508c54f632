//! Caller-facing operations.
//!
//! [`TimetableService`] owns a store and serializes work per semester:
//! generation and enrollment for the same semester never interleave, while
//! different semesters proceed independently. Read-only queries take a
//! shared view of the store.
//!
//! Generation plans under a read view and commits under a write view. If
//! the deadline passes during planning, the previous schedule stays intact.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::Rng;
use tracing::{info, warn};

use crate::config::SchedulerConfig;
use crate::eligibility::{
    CourseScheduleView, EligibilityEngine, EligibleSections, EnrollmentRequest,
    MasterScheduleView, SectionDetail,
};
use crate::error::{Result, TimetableError};
use crate::models::{
    GeneratedSchedule, SectionId, SemesterId, StudentEnrollment, StudentId, TeacherId,
};
use crate::scheduler::{MasterScheduleGenerator, UtilizationReport};
use crate::store::ScheduleStore;
use crate::validation::{validate_catalog, ValidationResult};

/// Scheduling and enrollment front end over a [`ScheduleStore`].
pub struct TimetableService<S> {
    config: SchedulerConfig,
    store: RwLock<S>,
    semester_locks: Mutex<HashMap<SemesterId, Arc<Mutex<()>>>>,
}

impl<S: ScheduleStore> TimetableService<S> {
    /// Creates a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            config: SchedulerConfig::default(),
            store: RwLock::new(store),
            semester_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a service with a custom configuration.
    ///
    /// # Errors
    /// [`TimetableError::Config`] if the configuration is unusable.
    pub fn with_config(store: S, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(store)
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Builds and commits the semester's master schedule, replacing any
    /// previous one.
    ///
    /// # Errors
    /// - [`TimetableError::SemesterNotFound`] if the semester does not exist.
    /// - [`TimetableError::DeadlineExceeded`] if planning ran past the
    ///   configured deadline. Nothing is committed in that case.
    pub fn generate_master_schedule(&self, semester_id: SemesterId) -> Result<GeneratedSchedule> {
        self.generate_master_schedule_with(semester_id, &mut rand::rng())
    }

    /// [`generate_master_schedule`](Self::generate_master_schedule) with an
    /// explicit random source.
    pub fn generate_master_schedule_with<R: Rng>(
        &self,
        semester_id: SemesterId,
        rng: &mut R,
    ) -> Result<GeneratedSchedule> {
        let lock = self.semester_lock(semester_id);
        let _guard = lock.lock();

        let generator = MasterScheduleGenerator::new(&self.config);
        let plan = generator.plan(&*self.store.read(), semester_id, rng);
        let plan = match plan {
            Ok(plan) => plan,
            Err(err @ TimetableError::DeadlineExceeded { .. }) => {
                warn!(semester_id, error = %err, "generation aborted");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let mut store = self.store.write();
        Ok(generator.commit(&mut *store, plan))
    }

    /// Sections of the semester the student may enroll in.
    pub fn eligible_sections(
        &self,
        student_id: StudentId,
        semester_id: SemesterId,
    ) -> Result<EligibleSections> {
        let store = self.store.read();
        EligibilityEngine::new(&*store, &self.config).eligible_sections(student_id, semester_id)
    }

    /// Validates an enrollment request without recording it.
    pub fn validate_enrollment(&self, request: &EnrollmentRequest) -> Result<SectionId> {
        let store = self.store.read();
        EligibilityEngine::new(&*store, &self.config).validate_enrollment(request)
    }

    /// Validates and records an enrollment.
    pub fn enroll(&self, request: &EnrollmentRequest) -> Result<StudentEnrollment> {
        let (student_id, course_id, semester_id) = request.require()?;
        let lock = self.semester_lock(semester_id);
        let _guard = lock.lock();

        let section_id = {
            let store = self.store.read();
            EligibilityEngine::new(&*store, &self.config).validate_enrollment(request)?
        };
        let enrollment = StudentEnrollment {
            student_id,
            course_id,
            semester_id,
            section_id,
        };
        self.store.write().insert_enrollment(enrollment.clone());

        info!(student_id, course_id, semester_id, section_id, "enrolled");
        Ok(enrollment)
    }

    /// The student's enrolled sections in a semester.
    pub fn student_schedule(
        &self,
        student_id: StudentId,
        semester_id: SemesterId,
    ) -> Vec<SectionDetail> {
        let store = self.store.read();
        EligibilityEngine::new(&*store, &self.config).student_schedule(student_id, semester_id)
    }

    /// Every section the teacher teaches.
    pub fn teacher_schedule(&self, teacher_id: TeacherId) -> Vec<SectionDetail> {
        let store = self.store.read();
        EligibilityEngine::new(&*store, &self.config).teacher_schedule(teacher_id)
    }

    /// A semester's persisted sections, without regenerating them.
    pub fn master_schedule(&self, semester_id: SemesterId) -> Result<MasterScheduleView> {
        let store = self.store.read();
        EligibilityEngine::new(&*store, &self.config).master_schedule(semester_id)
    }

    /// A semester's persisted sections grouped by course code.
    pub fn course_schedule(&self, semester_id: SemesterId) -> Result<CourseScheduleView> {
        let store = self.store.read();
        EligibilityEngine::new(&*store, &self.config).course_schedule(semester_id)
    }

    /// Teacher and room utilization for one semester's sections.
    pub fn utilization(&self, semester_id: SemesterId) -> UtilizationReport {
        UtilizationReport::calculate_for_semester(&*self.store.read(), semester_id)
    }

    /// Checks the store's catalog for integrity problems.
    pub fn validate_catalog(&self) -> ValidationResult {
        let store = self.store.read();
        let courses = store.courses();
        let teachers = store.teachers();
        let rooms = store.classrooms();
        let mut spec_ids: Vec<_> = courses
            .iter()
            .filter_map(|c| c.specialization_id)
            .chain(teachers.iter().filter_map(|t| t.specialization_id))
            .collect();
        spec_ids.sort_unstable();
        spec_ids.dedup();
        let specializations: Vec<_> = spec_ids
            .into_iter()
            .filter_map(|id| store.specialization(id))
            .collect();
        validate_catalog(&courses, &teachers, &rooms, &specializations)
    }

    /// Runs `f` against a shared view of the store.
    pub fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.store.read())
    }

    /// Runs `f` against an exclusive view of the store.
    pub fn write<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        f(&mut self.store.write())
    }

    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }

    fn semester_lock(&self, semester_id: SemesterId) -> Arc<Mutex<()>> {
        Arc::clone(self.semester_locks.lock().entry(semester_id).or_default())
    }
}
