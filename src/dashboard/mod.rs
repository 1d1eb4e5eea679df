//! Data half of the role dashboards: load what the role may see, then derive its view.

pub mod collections;
pub mod overview;

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use thiserror::Error;

use crate::aggregate::generate_enrollments;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::Enrollment;
use crate::session::{Identity, SessionContext};

pub use collections::{Collections, ServiceClients};
pub use overview::{CourseEntry, Overview, StudentOverview, SuperAdminOverview, UniversityAdminOverview};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("not logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Everything a dashboard render needs, loaded in one all-or-nothing batch.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub identity: Identity,
    pub collections: Collections,
    pub enrollments: Vec<Enrollment>,
}

impl Snapshot {
    pub fn overview(&self) -> Overview {
        Overview::derive(&self.identity, &self.collections, &self.enrollments)
    }
}

pub struct Dashboard {
    session: Arc<SessionContext>,
    clients: ServiceClients,
}

impl Dashboard {
    pub fn new(http: &HttpClient) -> Self {
        Self {
            session: http.session().clone(),
            clients: ServiceClients::new(http),
        }
    }

    pub fn clients(&self) -> &ServiceClients {
        &self.clients
    }

    /// Load collections for the current identity. Enrollments are simulated from the
    /// loaded students and courses with `rng`.
    pub async fn load<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Snapshot, DashboardError> {
        let identity = self.session.current().ok_or(DashboardError::NotAuthenticated)?;
        let collections = Collections::fetch(&self.clients, self.session.capabilities()).await?;
        let enrollments = generate_enrollments(&collections.students, &collections.courses, Utc::now(), rng);
        Ok(Snapshot {
            identity,
            collections,
            enrollments,
        })
    }
}
