use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform-wide counts shown on the database settings screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub universities: usize,
    pub students: usize,
    pub courses: usize,
    pub admins: usize,
    /// students + admins + the super admin
    pub total_users: usize,
    pub active_connections: u32,
    pub last_backup: DateTime<Utc>,
    pub database_size: String,
}

/// Infrastructure figures reported by the backup collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeMetrics {
    pub active_connections: u32,
    pub last_backup: DateTime<Utc>,
    pub database_size: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub max_universities: u32,
    pub max_students_per_university: u32,
    pub max_courses_per_university: u32,
    pub enable_auto_backup: bool,
    pub backup_frequency: BackupFrequency,
    pub enable_email_notifications: bool,
    pub enable_audit_logs: bool,
    /// Minutes
    pub session_timeout: u32,
    pub max_login_attempts: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            max_universities: 100,
            max_students_per_university: 10_000,
            max_courses_per_university: 500,
            enable_auto_backup: true,
            backup_frequency: BackupFrequency::Daily,
            enable_email_notifications: true,
            enable_audit_logs: true,
            session_timeout: 30,
            max_login_attempts: 5,
        }
    }
}
