//! Backend-facing service clients and the stub collaborators that stand in for
//! infrastructure the backend does not expose.

pub mod admin;
pub mod auth;
pub mod backup;
pub mod course;
pub mod entity;
pub mod student;
pub mod tenant_directory;
pub mod university;

pub use admin::AdminService;
pub use auth::{AuthApi, LoginRequest, LoginResponse, LoginUser};
pub use backup::{Acknowledgement, BackupService, SimulatedBackupService};
pub use course::CourseService;
pub use entity::{EntityClient, Resource};
pub use student::StudentService;
pub use tenant_directory::{MockTenantDirectory, TenantDirectory, TenantError};
pub use university::UniversityService;
