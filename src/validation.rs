//! Catalog validation.
//!
//! Checks structural integrity of the catalog before scheduling. Detects:
//! - Duplicate IDs
//! - References to unknown specializations
//! - References to unknown prerequisite courses
//! - Circular prerequisite chains
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::models::{Classroom, Course, CourseId, Specialization, Teacher};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of one kind share the same ID.
    DuplicateId,
    /// A course or teacher references a specialization that doesn't exist.
    UnknownSpecialization,
    /// A course names a prerequisite that doesn't exist.
    UnknownPrerequisite,
    /// Prerequisite links loop.
    CyclicPrerequisite,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the catalog.
///
/// Checks:
/// 1. No duplicate course, teacher, room, or specialization IDs
/// 2. Course and teacher specializations exist
/// 3. Prerequisite references point to existing courses
/// 4. No circular prerequisite chains
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(
    courses: &[Course],
    teachers: &[Teacher],
    rooms: &[Classroom],
    specializations: &[Specialization],
) -> ValidationResult {
    let mut errors = Vec::new();

    let spec_ids = collect_ids(
        specializations.iter().map(|s| s.id),
        "specialization",
        &mut errors,
    );
    let course_ids = collect_ids(courses.iter().map(|c| c.id), "course", &mut errors);
    collect_ids(teachers.iter().map(|t| t.id), "teacher", &mut errors);
    collect_ids(rooms.iter().map(|r| r.id), "classroom", &mut errors);

    // Specialization references
    for course in courses {
        if let Some(spec) = course.specialization_id {
            if !spec_ids.contains(&spec) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSpecialization,
                    format!("Course {} references unknown specialization {spec}", course.id),
                ));
            }
        }
    }
    for teacher in teachers {
        if let Some(spec) = teacher.specialization_id {
            if !spec_ids.contains(&spec) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSpecialization,
                    format!("Teacher {} references unknown specialization {spec}", teacher.id),
                ));
            }
        }
    }

    // Prerequisite references
    for course in courses {
        if let Some(prereq) = course.prerequisite_id {
            if !course_ids.contains(&prereq) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPrerequisite,
                    format!("Course {} references unknown prerequisite {prereq}", course.id),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(courses) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_ids(
    ids: impl Iterator<Item = u32>,
    label: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<u32> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
    seen
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists. Courses are visited
/// in catalog order so the reported course is stable.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(courses: &[Course]) -> Option<ValidationError> {
    // course → its prerequisite
    let mut adj: HashMap<CourseId, Vec<CourseId>> = HashMap::new();
    for course in courses {
        if let Some(prereq) = course.prerequisite_id {
            adj.entry(course.id).or_default().push(prereq);
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for course in courses {
        let node = course.id;
        if !visited.contains(&node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicPrerequisite,
                format!("Circular prerequisite chain detected involving course {node}"),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: CourseId,
    adj: &HashMap<CourseId, Vec<CourseId>>,
    visited: &mut HashSet<CourseId>,
    in_stack: &mut HashSet<CourseId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}
