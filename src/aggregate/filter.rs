use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::join::{Lookup, Resolved};
use crate::models::enrollment::UnknownStatus;
use crate::models::{Course, EntityId, Enrollment, EnrollmentStatus, Student};

/// An enrollment with the student and course it points at, as the management table shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRow<'a> {
    pub enrollment: &'a Enrollment,
    pub student: Resolved<&'a Student>,
    pub course: Resolved<&'a Course>,
}

/// Search text of the joined records. An unresolved reference contributes no text, so
/// it never matches a non-empty search term. Use [`Resolved::label`] for display.
impl EnrollmentRow<'_> {
    pub fn student_name(&self) -> &str {
        self.student.found().map_or("", |s| s.full_name.as_str())
    }

    pub fn student_email(&self) -> &str {
        self.student.found().map_or("", |s| s.email.as_str())
    }

    pub fn course_name(&self) -> &str {
        self.course.found().map_or("", |c| c.name.as_str())
    }
}

/// Join every enrollment to its student and course, keeping source order.
pub fn enrollment_rows<'a>(
    enrollments: &'a [Enrollment],
    students: &'a [Student],
    courses: &'a [Course],
) -> Vec<EnrollmentRow<'a>> {
    let students = Lookup::new(students);
    let courses = Lookup::new(courses);
    enrollments
        .iter()
        .map(|enrollment| EnrollmentRow {
            enrollment,
            student: students.resolve(enrollment.student_id),
            course: courses.resolve(enrollment.course_id),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(EnrollmentStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseFilter {
    #[default]
    All,
    Only(EntityId),
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl FromStr for CourseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(CourseFilter::All);
        }
        s.parse()
            .map(CourseFilter::Only)
            .map_err(|_| format!("expected 'all' or a course id, got '{}'", s))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

/// Conjunction of free-text search, status and course predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentQuery {
    pub search: String,
    pub status: StatusFilter,
    pub course: CourseFilter,
}

impl EnrollmentQuery {
    pub fn matches(&self, row: &EnrollmentRow<'_>) -> bool {
        self.matches_search(row) && self.matches_status(row) && self.matches_course(row)
    }

    pub fn apply<'r, 'a>(&self, rows: &'r [EnrollmentRow<'a>]) -> Vec<&'r EnrollmentRow<'a>> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    fn matches_search(&self, row: &EnrollmentRow<'_>) -> bool {
        let term = self.search.to_lowercase();
        if term.is_empty() {
            return true;
        }
        [row.student_name(), row.student_email(), row.course_name()]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_status(&self, row: &EnrollmentRow<'_>) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => row.enrollment.status == status,
        }
    }

    fn matches_course(&self, row: &EnrollmentRow<'_>) -> bool {
        match self.course {
            CourseFilter::All => true,
            CourseFilter::Only(id) => row.enrollment.course_id == id,
        }
    }
}
