use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewTenant, Tenant, TenantPlan, TenantStatus};

#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("Tenant not found: {0}")]
    NotFound(String),
    #[error("Tenant already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid tenant name: {0}")]
    InvalidName(String),
    #[error("Invalid subdomain: {0}")]
    InvalidSubdomain(String),
}

/// Tenant registry. The only implementation is an in-memory demo directory;
/// a backend-backed one can be swapped in behind this trait.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn list(&self) -> Vec<Tenant>;
    async fn search(&self, term: &str) -> Vec<Tenant>;
    async fn create(&self, tenant: NewTenant) -> Result<Tenant, TenantError>;
    async fn delete(&self, id: &str) -> Result<Tenant, TenantError>;
    async fn set_status(&self, id: &str, status: TenantStatus) -> Result<Tenant, TenantError>;
}

pub struct MockTenantDirectory {
    tenants: RwLock<Vec<Tenant>>,
}

impl MockTenantDirectory {
    pub fn empty() -> Self {
        Self {
            tenants: RwLock::new(Vec::new()),
        }
    }

    /// Seeded with the three demo tenants.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            tenants: RwLock::new(demo_tenants(now)),
        }
    }

    fn validate(tenant: &NewTenant) -> Result<(), TenantError> {
        let name_len = tenant.name.trim().chars().count();
        if name_len < 2 {
            return Err(TenantError::InvalidName(
                "Tenant name must be at least 2 characters".to_string(),
            ));
        }
        if name_len > 100 {
            return Err(TenantError::InvalidName(
                "Tenant name must be less than 100 characters".to_string(),
            ));
        }

        let subdomain = tenant.subdomain.trim();
        if subdomain.is_empty() {
            return Err(TenantError::InvalidSubdomain(
                "Subdomain must not be empty".to_string(),
            ));
        }
        if !subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TenantError::InvalidSubdomain(
                "Subdomain can only contain letters, numbers, hyphens, and underscores".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MockTenantDirectory {
    fn default() -> Self {
        Self::seeded(Utc::now())
    }
}

#[async_trait]
impl TenantDirectory for MockTenantDirectory {
    async fn list(&self) -> Vec<Tenant> {
        self.tenants.read().await.clone()
    }

    async fn search(&self, term: &str) -> Vec<Tenant> {
        self.tenants
            .read()
            .await
            .iter()
            .filter(|tenant| tenant.matches_search(term))
            .cloned()
            .collect()
    }

    async fn create(&self, tenant: NewTenant) -> Result<Tenant, TenantError> {
        Self::validate(&tenant)?;

        let mut tenants = self.tenants.write().await;
        let subdomain = tenant.subdomain.trim().to_lowercase();
        if tenants.iter().any(|t| t.subdomain.eq_ignore_ascii_case(&subdomain)) {
            return Err(TenantError::AlreadyExists(subdomain));
        }

        let now = Utc::now();
        let created = Tenant {
            id: Uuid::new_v4().to_string(),
            name: tenant.name.trim().to_string(),
            domain: tenant.domain.trim().to_string(),
            subdomain,
            status: TenantStatus::Active,
            plan: tenant.plan,
            universities: 0,
            students: 0,
            admins: 0,
            created_at: now,
            last_activity: now,
            storage_used: "0 GB".to_string(),
            storage_limit: tenant.plan.storage_limit().to_string(),
            features: tenant.plan.features(),
        };
        info!(id = %created.id, name = %created.name, plan = %created.plan, "tenant created");
        tenants.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: &str) -> Result<Tenant, TenantError> {
        let mut tenants = self.tenants.write().await;
        let index = tenants
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TenantError::NotFound(id.to_string()))?;
        let removed = tenants.remove(index);
        info!(id, name = %removed.name, "tenant deleted");
        Ok(removed)
    }

    async fn set_status(&self, id: &str, status: TenantStatus) -> Result<Tenant, TenantError> {
        let mut tenants = self.tenants.write().await;
        let tenant = tenants
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TenantError::NotFound(id.to_string()))?;
        tenant.status = status;
        tenant.last_activity = Utc::now();
        info!(id, status = %status, "tenant status changed");
        Ok(tenant.clone())
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_tenant(
    id: &str,
    name: &str,
    domain: &str,
    subdomain: &str,
    plan: TenantPlan,
    counts: (u32, u32, u32),
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    storage_used: &str,
) -> Tenant {
    let (universities, students, admins) = counts;
    Tenant {
        id: id.to_string(),
        name: name.to_string(),
        domain: domain.to_string(),
        subdomain: subdomain.to_string(),
        status: TenantStatus::Active,
        plan,
        universities,
        students,
        admins,
        created_at,
        last_activity,
        storage_used: storage_used.to_string(),
        storage_limit: plan.storage_limit().to_string(),
        features: plan.features(),
    }
}

fn demo_tenants(now: DateTime<Utc>) -> Vec<Tenant> {
    let day = |month: u32, day: u32| {
        Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0)
            .single()
            .unwrap_or(now)
    };

    vec![
        demo_tenant(
            "1",
            "Indian Institute of Technology System",
            "iit-system.edu",
            "iit",
            TenantPlan::Enterprise,
            (23, 125_000, 150),
            day(1, 1),
            now,
            "45.2 GB",
        ),
        demo_tenant(
            "2",
            "State University Network",
            "stateuni.edu",
            "stateuni",
            TenantPlan::Premium,
            (8, 45_000, 60),
            day(2, 15),
            now - Duration::hours(2),
            "18.7 GB",
        ),
        demo_tenant(
            "3",
            "Community College Alliance",
            "ccalliance.edu",
            "ccalliance",
            TenantPlan::Basic,
            (3, 12_000, 15),
            day(3, 1),
            now - Duration::hours(24),
            "5.2 GB",
        ),
    ]
}
