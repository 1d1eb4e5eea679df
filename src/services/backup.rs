use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::models::RuntimeMetrics;

pub const BACKUP_ACK: &str = "Database backup initiated. You will be notified when complete.";
pub const RESTORE_ACK: &str =
    "Database restore initiated. The system will be temporarily unavailable.";

/// Receipt for a backup or restore request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub message: String,
    pub requested_at: DateTime<Utc>,
}

/// Database infrastructure the console cannot reach directly.
#[async_trait]
pub trait BackupService: Send + Sync {
    async fn metrics(&self) -> RuntimeMetrics;
    async fn backup(&self) -> Acknowledgement;
    async fn restore(&self) -> Acknowledgement;
}

/// Randomized figures and immediate acknowledgements. Nothing is backed up.
pub struct SimulatedBackupService {
    rng: Mutex<StdRng>,
}

impl SimulatedBackupService {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SimulatedBackupService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackupService for SimulatedBackupService {
    async fn metrics(&self) -> RuntimeMetrics {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let connections = rng.gen_range(10..30);
        let since_backup = Duration::milliseconds(rng.gen_range(0..24 * 60 * 60 * 1000));
        let size = 2.1 + rng.gen_range(0.0..0.8);
        RuntimeMetrics {
            active_connections: connections,
            last_backup: Utc::now() - since_backup,
            database_size: format!("{:.1} GB", size),
        }
    }

    async fn backup(&self) -> Acknowledgement {
        info!("database backup requested");
        Acknowledgement {
            message: BACKUP_ACK.to_string(),
            requested_at: Utc::now(),
        }
    }

    async fn restore(&self) -> Acknowledgement {
        info!("database restore requested");
        Acknowledgement {
            message: RESTORE_ACK.to_string(),
            requested_at: Utc::now(),
        }
    }
}
