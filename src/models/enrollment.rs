use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("enrollment cannot move from {from} to {to}")]
pub struct InvalidTransition {
    pub from: EnrollmentStatus,
    pub to: EnrollmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown enrollment status: {0}")]
pub struct UnknownStatus(pub String);

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 4] = [
        EnrollmentStatus::Pending,
        EnrollmentStatus::Approved,
        EnrollmentStatus::Rejected,
        EnrollmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Approved => "approved",
            EnrollmentStatus::Rejected => "rejected",
            EnrollmentStatus::Completed => "completed",
        }
    }

    /// Only a pending enrollment may be decided, and only to approved or rejected.
    pub fn can_transition_to(&self, next: EnrollmentStatus) -> bool {
        matches!(
            (self, next),
            (EnrollmentStatus::Pending, EnrollmentStatus::Approved)
                | (EnrollmentStatus::Pending, EnrollmentStatus::Rejected)
        )
    }

    pub fn transition_to(self, next: EnrollmentStatus) -> Result<EnrollmentStatus, InvalidTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition { from: self, to: next })
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(EnrollmentStatus::Pending),
            "approved" => Ok(EnrollmentStatus::Approved),
            "rejected" => Ok(EnrollmentStatus::Rejected),
            "completed" => Ok(EnrollmentStatus::Completed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A student's registration in a course. The id is the composite `"{student}-{course}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub student_id: EntityId,
    pub course_id: EntityId,
    /// Denormalized from the student at enrollment time
    pub university_id: EntityId,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Completion percentage, 0..=100
    pub progress: u8,
}

impl Enrollment {
    pub fn composite_id(student_id: EntityId, course_id: EntityId) -> String {
        format!("{}-{}", student_id, course_id)
    }

    /// A fresh pending enrollment with no progress.
    pub fn pending(
        student_id: EntityId,
        course_id: EntityId,
        university_id: EntityId,
        enrolled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Self::composite_id(student_id, course_id),
            student_id,
            course_id,
            university_id,
            enrolled_at,
            status: EnrollmentStatus::Pending,
            grade: None,
            progress: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_can_be_decided() {
        use EnrollmentStatus::*;

        assert_eq!(Pending.transition_to(Approved), Ok(Approved));
        assert_eq!(Pending.transition_to(Rejected), Ok(Rejected));
        assert!(Pending.transition_to(Completed).is_err());
        assert!(Approved.transition_to(Rejected).is_err());
        assert!(Completed.transition_to(Approved).is_err());
        assert!(Rejected.transition_to(Approved).is_err());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Pending".parse::<EnrollmentStatus>(), Ok(EnrollmentStatus::Pending));
        assert!("enrolled".parse::<EnrollmentStatus>().is_err());
    }

    #[test]
    fn pending_enrollment_uses_composite_id() {
        let enrollment = Enrollment::pending(7, 101, 1, Utc::now());
        assert_eq!(enrollment.id, "7-101");
        assert_eq!(enrollment.status, EnrollmentStatus::Pending);
        assert_eq!(enrollment.progress, 0);
    }
}
