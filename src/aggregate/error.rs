use thiserror::Error;

use crate::models::enrollment::InvalidTransition;
use crate::models::EntityId;

#[derive(Debug, Error, PartialEq)]
pub enum EnrollmentError {
    #[error("enrollment not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("student {student} is already enrolled in course {course}")]
    AlreadyEnrolled { student: EntityId, course: EntityId },

    #[error("course {course} does not belong to university {university}")]
    ForeignCourse { course: EntityId, university: EntityId },

    #[error("student {0} is not linked to a university")]
    NoUniversity(EntityId),

    #[error("{0} has not been saved yet and has no id")]
    Unsaved(&'static str),
}
