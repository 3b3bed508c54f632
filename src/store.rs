//! Persistence interface.
//!
//! [`ScheduleStore`] is everything the engine reads and writes. Catalog
//! records are read-only here. Sections and meetings are replaced
//! wholesale per semester by the generator. Enrollments are appended by
//! the enrollment write path.
//!
//! [`MemoryStore`] is an in-process implementation suitable for tests and
//! embedding. Catalog listings preserve insertion order.

use crate::models::{
    Classroom, Course, CourseId, Meeting, PlannedSection, RoomId, Section, SectionId, Semester,
    SemesterId, Specialization, SpecializationId, Student, StudentCourseHistory,
    StudentEnrollment, StudentId, Teacher, TeacherId,
};

/// Storage collaborator for the scheduling engine.
pub trait ScheduleStore {
    fn semester(&self, id: SemesterId) -> Option<Semester>;
    fn course(&self, id: CourseId) -> Option<Course>;
    /// All courses in catalog order.
    fn courses(&self) -> Vec<Course>;
    fn teacher(&self, id: TeacherId) -> Option<Teacher>;
    /// All teachers in catalog order.
    fn teachers(&self) -> Vec<Teacher>;
    fn classroom(&self, id: RoomId) -> Option<Classroom>;
    /// All classrooms in catalog order.
    fn classrooms(&self) -> Vec<Classroom>;
    fn specialization(&self, id: SpecializationId) -> Option<Specialization>;
    fn student(&self, id: StudentId) -> Option<Student>;

    /// All sections, ascending by ID.
    fn sections(&self) -> Vec<Section>;
    fn section(&self, id: SectionId) -> Option<Section>;
    fn meetings_for_section(&self, section_id: SectionId) -> Vec<Meeting>;

    /// Deletes a semester's sections together with their meetings.
    /// Returns the number of sections removed.
    fn delete_sections_for_semester(&mut self, semester_id: SemesterId) -> usize;

    /// Persists a planned section and its meetings.
    fn insert_section(
        &mut self,
        semester_id: SemesterId,
        planned: &PlannedSection,
    ) -> (Section, Vec<Meeting>);

    fn enrollments_for_student(&self, student_id: StudentId) -> Vec<StudentEnrollment>;
    /// Seats taken in a section.
    fn enrollment_count(&self, section_id: SectionId) -> usize;
    fn history_for_student(&self, student_id: StudentId) -> Vec<StudentCourseHistory>;
    fn insert_enrollment(&mut self, enrollment: StudentEnrollment);

    /// Sections of one semester, ascending by ID.
    fn sections_for_semester(&self, semester_id: SemesterId) -> Vec<Section> {
        self.sections()
            .into_iter()
            .filter(|s| s.semester_id == semester_id)
            .collect()
    }

    /// Sections of one course in one semester, ascending by ID.
    fn sections_for_course(&self, course_id: CourseId, semester_id: SemesterId) -> Vec<Section> {
        self.sections_for_semester(semester_id)
            .into_iter()
            .filter(|s| s.course_id == course_id)
            .collect()
    }

    /// Sections taught by one teacher, ascending by ID.
    fn sections_for_teacher(&self, teacher_id: TeacherId) -> Vec<Section> {
        self.sections()
            .into_iter()
            .filter(|s| s.teacher_id == teacher_id)
            .collect()
    }
}

/// In-memory [`ScheduleStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    semesters: Vec<Semester>,
    courses: Vec<Course>,
    teachers: Vec<Teacher>,
    classrooms: Vec<Classroom>,
    specializations: Vec<Specialization>,
    students: Vec<Student>,
    sections: Vec<Section>,
    meetings: Vec<Meeting>,
    enrollments: Vec<StudentEnrollment>,
    history: Vec<StudentCourseHistory>,
    next_section_id: SectionId,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            next_section_id: 1,
            ..Self::default()
        }
    }

    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semesters.push(semester);
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    pub fn with_classroom(mut self, classroom: Classroom) -> Self {
        self.classrooms.push(classroom);
        self
    }

    pub fn with_specialization(mut self, specialization: Specialization) -> Self {
        self.specializations.push(specialization);
        self
    }

    pub fn with_student(mut self, student: Student) -> Self {
        self.students.push(student);
        self
    }

    pub fn with_history(mut self, record: StudentCourseHistory) -> Self {
        self.history.push(record);
        self
    }

    /// Records a past course attempt.
    pub fn add_history(&mut self, record: StudentCourseHistory) {
        self.history.push(record);
    }

    /// Inserts a pre-existing section with explicit meetings (e.g. loaded
    /// from elsewhere). Later generated sections get higher IDs.
    pub fn add_section(&mut self, section: Section, meetings: Vec<Meeting>) {
        self.next_section_id = self.next_section_id.max(section.id + 1);
        self.sections.push(section);
        self.sections.sort_by_key(|s| s.id);
        self.meetings.extend(meetings);
    }

    /// Total meetings stored (all semesters).
    pub fn meeting_count(&self) -> usize {
        self.meetings.len()
    }
}

impl ScheduleStore for MemoryStore {
    fn semester(&self, id: SemesterId) -> Option<Semester> {
        self.semesters.iter().find(|s| s.id == id).cloned()
    }

    fn course(&self, id: CourseId) -> Option<Course> {
        self.courses.iter().find(|c| c.id == id).cloned()
    }

    fn courses(&self) -> Vec<Course> {
        self.courses.clone()
    }

    fn teacher(&self, id: TeacherId) -> Option<Teacher> {
        self.teachers.iter().find(|t| t.id == id).cloned()
    }

    fn teachers(&self) -> Vec<Teacher> {
        self.teachers.clone()
    }

    fn classroom(&self, id: RoomId) -> Option<Classroom> {
        self.classrooms.iter().find(|r| r.id == id).cloned()
    }

    fn classrooms(&self) -> Vec<Classroom> {
        self.classrooms.clone()
    }

    fn specialization(&self, id: SpecializationId) -> Option<Specialization> {
        self.specializations.iter().find(|s| s.id == id).cloned()
    }

    fn student(&self, id: StudentId) -> Option<Student> {
        self.students.iter().find(|s| s.id == id).cloned()
    }

    fn sections(&self) -> Vec<Section> {
        self.sections.clone()
    }

    fn section(&self, id: SectionId) -> Option<Section> {
        self.sections.iter().find(|s| s.id == id).cloned()
    }

    fn meetings_for_section(&self, section_id: SectionId) -> Vec<Meeting> {
        self.meetings
            .iter()
            .filter(|m| m.section_id == section_id)
            .copied()
            .collect()
    }

    fn delete_sections_for_semester(&mut self, semester_id: SemesterId) -> usize {
        let doomed: Vec<SectionId> = self
            .sections
            .iter()
            .filter(|s| s.semester_id == semester_id)
            .map(|s| s.id)
            .collect();
        self.sections.retain(|s| s.semester_id != semester_id);
        self.meetings.retain(|m| !doomed.contains(&m.section_id));
        doomed.len()
    }

    fn insert_section(
        &mut self,
        semester_id: SemesterId,
        planned: &PlannedSection,
    ) -> (Section, Vec<Meeting>) {
        let id = self.next_section_id;
        self.next_section_id += 1;

        let section = Section {
            id,
            course_id: planned.course_id,
            teacher_id: planned.teacher_id,
            room_id: planned.room_id,
            semester_id,
            capacity: planned.capacity,
        };
        let meetings: Vec<Meeting> = planned
            .meetings
            .iter()
            .map(|&time| Meeting::new(id, time))
            .collect();

        self.sections.push(section.clone());
        self.meetings.extend(meetings.iter().copied());
        (section, meetings)
    }

    fn enrollments_for_student(&self, student_id: StudentId) -> Vec<StudentEnrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect()
    }

    fn enrollment_count(&self, section_id: SectionId) -> usize {
        self.enrollments
            .iter()
            .filter(|e| e.section_id == section_id)
            .count()
    }

    fn history_for_student(&self, student_id: StudentId) -> Vec<StudentCourseHistory> {
        self.history
            .iter()
            .filter(|h| h.student_id == student_id)
            .cloned()
            .collect()
    }

    fn insert_enrollment(&mut self, enrollment: StudentEnrollment) {
        self.enrollments.push(enrollment);
    }
}
