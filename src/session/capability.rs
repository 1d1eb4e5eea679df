use serde::Serialize;
use std::fmt;

use super::identity::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    University,
    Course,
    Student,
    Admin,
    Tenant,
    Enrollment,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::University,
        ResourceKind::Course,
        ResourceKind::Student,
        ResourceKind::Admin,
        ResourceKind::Tenant,
        ResourceKind::Enrollment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::University => "university",
            ResourceKind::Course => "course",
            ResourceKind::Student => "student",
            ResourceKind::Admin => "admin",
            ResourceKind::Tenant => "tenant",
            ResourceKind::Enrollment => "enrollment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the current identity may see and change. Computed once per view from the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    role: Option<Role>,
}

impl Capabilities {
    pub fn for_role(role: Option<Role>) -> Self {
        Self { role }
    }

    pub fn anonymous() -> Self {
        Self { role: None }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Create, update and delete rights. For enrollments this is the right to approve or reject.
    pub fn can_manage(&self, _kind: ResourceKind) -> bool {
        matches!(self.role, Some(role) if role.is_admin())
    }

    pub fn can_view(&self, kind: ResourceKind) -> bool {
        match self.role {
            None => false,
            Some(Role::Student) => matches!(
                kind,
                ResourceKind::University | ResourceKind::Course | ResourceKind::Enrollment
            ),
            Some(Role::UniversityAdmin) | Some(Role::SuperAdmin) => true,
        }
    }

    /// Students register themselves for courses; admins manage enrollments instead.
    pub fn can_enroll(&self) -> bool {
        self.role == Some(Role::Student)
    }

    pub fn manageable(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|kind| self.can_manage(*kind))
            .collect()
    }
}
