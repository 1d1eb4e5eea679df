use chrono::{DateTime, Utc};
use tracing::info;

use super::error::EnrollmentError;
use crate::models::{Course, Enrollment, EnrollmentStatus, Identified, Student};

/// Locally held enrollments. The backend has no enrollment endpoints, so decisions
/// live only as long as the book does.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentBook {
    enrollments: Vec<Enrollment>,
}

impl EnrollmentBook {
    pub fn new(enrollments: Vec<Enrollment>) -> Self {
        Self { enrollments }
    }

    pub fn as_slice(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn get(&self, id: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id == id)
    }

    /// Approve or reject a pending enrollment. Any other transition is refused and
    /// leaves the book unchanged.
    pub fn set_status(&mut self, id: &str, status: EnrollmentStatus) -> Result<&Enrollment, EnrollmentError> {
        let enrollment = self
            .enrollments
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EnrollmentError::NotFound(id.to_string()))?;
        enrollment.status = enrollment.status.transition_to(status)?;
        info!(id, status = %status, "enrollment status changed");
        Ok(&*enrollment)
    }

    /// Register `student` in `course` as pending. The course must belong to the
    /// student's university.
    pub fn enroll(
        &mut self,
        student: &Student,
        course: &Course,
        now: DateTime<Utc>,
    ) -> Result<&Enrollment, EnrollmentError> {
        let student_id = student.id().ok_or(EnrollmentError::Unsaved("student"))?;
        let course_id = course.id().ok_or(EnrollmentError::Unsaved("course"))?;

        let university = student
            .university_id
            .ok_or(EnrollmentError::NoUniversity(student_id))?;
        if course.university_id != Some(university) {
            return Err(EnrollmentError::ForeignCourse {
                course: course_id,
                university,
            });
        }

        let id = Enrollment::composite_id(student_id, course_id);
        if self.get(&id).is_some() {
            return Err(EnrollmentError::AlreadyEnrolled {
                student: student_id,
                course: course_id,
            });
        }

        info!(%id, "student enrolled");
        self.enrollments
            .push(Enrollment::pending(student_id, course_id, university, now));
        Ok(&self.enrollments[self.enrollments.len() - 1])
    }
}
