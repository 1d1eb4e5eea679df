use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::wire::value_to_string;
use crate::models::EntityId;
use crate::services::auth::LoginUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    UniversityAdmin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::UniversityAdmin => "university_admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::UniversityAdmin | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "university_admin" => Ok(Role::UniversityAdmin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// The authenticated user of this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
    /// Registration code of the student record, as sent by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Build an identity from a login payload. Returns `None` when the role is unknown.
    pub fn from_login_user(user: &LoginUser, now: DateTime<Utc>) -> Option<Self> {
        let role = user.role.parse::<Role>().ok()?;
        Some(Self {
            id: value_to_string(&user.id)?,
            email: user.email.clone(),
            name: user.name.clone(),
            role,
            university_id: user.university_id.as_ref().and_then(value_to_string),
            student_id: user.student_id.as_ref().and_then(value_to_string),
            created_at: now,
        })
    }

    /// University reference coerced to a numeric id. Non-numeric references resolve to `None`.
    pub fn university_ref(&self) -> Option<EntityId> {
        self.university_id.as_deref().and_then(|id| id.trim().parse().ok())
    }
}
