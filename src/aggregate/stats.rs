use serde::Serialize;

use super::student_view::EnrolledCourse;
use crate::models::{Course, DatabaseStats, Enrollment, EnrollmentStatus, Identified, RuntimeMetrics};

/// Sum of credits over resolved courses. Unresolved courses count as zero.
pub fn total_credits(rows: &[EnrolledCourse<'_>]) -> u32 {
    rows.iter().map(EnrolledCourse::credits).sum()
}

/// `enrolled / capacity * 100`, or `None` when the course has no usable capacity.
pub fn percent_full(enrolled: usize, capacity: Option<u32>) -> Option<f64> {
    match capacity {
        Some(capacity) if capacity > 0 => Some(enrolled as f64 / capacity as f64 * 100.0),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFill {
    pub course_id: Option<i64>,
    pub course_name: String,
    /// Enrollments that hold a seat: everything except rejected
    pub enrolled: usize,
    pub capacity: Option<u32>,
    pub percent_full: Option<f64>,
}

pub fn course_fill(course: &Course, enrollments: &[Enrollment]) -> CourseFill {
    let enrolled = match course.id() {
        Some(id) => enrollments
            .iter()
            .filter(|e| e.course_id == id && e.status != EnrollmentStatus::Rejected)
            .count(),
        None => 0,
    };
    CourseFill {
        course_id: course.id(),
        course_name: course.name.clone(),
        enrolled,
        capacity: course.capacity,
        percent_full: percent_full(enrolled, course.capacity),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrollmentStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub completed: usize,
    pub rejected: usize,
}

impl EnrollmentStats {
    pub fn from_enrollments<'a>(enrollments: impl IntoIterator<Item = &'a Enrollment>) -> Self {
        enrollments
            .into_iter()
            .fold(Self::default(), |mut stats, enrollment| {
                stats.total += 1;
                match enrollment.status {
                    EnrollmentStatus::Pending => stats.pending += 1,
                    EnrollmentStatus::Approved => stats.approved += 1,
                    EnrollmentStatus::Completed => stats.completed += 1,
                    EnrollmentStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }
}

/// Collection sizes across the whole platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformCounts {
    pub universities: usize,
    pub students: usize,
    pub courses: usize,
    pub admins: usize,
}

impl PlatformCounts {
    /// Students and admins plus the single super admin.
    pub fn total_users(&self) -> usize {
        self.students + self.admins + 1
    }

    pub fn database_stats(&self, metrics: RuntimeMetrics) -> DatabaseStats {
        DatabaseStats {
            universities: self.universities,
            students: self.students,
            courses: self.courses,
            admins: self.admins,
            total_users: self.total_users(),
            active_connections: metrics.active_connections,
            last_backup: metrics.last_backup,
            database_size: metrics.database_size,
        }
    }
}
