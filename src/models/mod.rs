//! Entity shapes exchanged with the REST backend.
//!
//! Field names follow the backend's JSON (`uniName`, `courseName`, `phnnum`, ...);
//! the Rust names say what the field means.

pub mod admin;
pub mod course;
pub mod database;
pub mod enrollment;
pub mod student;
pub mod tenant;
pub mod university;
pub mod wire;

use serde::{Deserialize, Serialize};

pub use admin::Admin;
pub use course::Course;
pub use database::{BackupFrequency, DatabaseStats, RuntimeMetrics, SystemSettings};
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use student::Student;
pub use tenant::{NewTenant, Tenant, TenantPlan, TenantStatus};
pub use university::University;

/// Backend record identifier. Identifiers may travel as strings but always compare numerically.
pub type EntityId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordStatus {
    #[default]
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "inactive")]
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "ACTIVE",
            RecordStatus::Inactive => "INACTIVE",
        }
    }
}

/// Records carrying a backend-assigned id. `None` until the backend has created the record.
pub trait Identified {
    fn id(&self) -> Option<EntityId>;
    fn set_id(&mut self, id: Option<EntityId>);
}

/// Records owned by exactly one university.
pub trait UniversityOwned {
    /// `None` when the record carries no usable university reference; such records
    /// belong to no university.
    fn university_ref(&self) -> Option<EntityId>;
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> Option<EntityId> {
                    self.id
                }

                fn set_id(&mut self, id: Option<EntityId>) {
                    self.id = id;
                }
            }
        )+
    };
}

identified!(University, Course, Student, Admin);

impl UniversityOwned for Course {
    fn university_ref(&self) -> Option<EntityId> {
        self.university_id
    }
}

impl UniversityOwned for Student {
    fn university_ref(&self) -> Option<EntityId> {
        self.university_id
    }
}

impl UniversityOwned for Enrollment {
    fn university_ref(&self) -> Option<EntityId> {
        Some(self.university_id)
    }
}
