use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenantPlan {
    #[default]
    Basic,
    Premium,
    Enterprise,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Inactive => "inactive",
            TenantStatus::Suspended => "suspended",
        }
    }
}

impl TenantPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantPlan::Basic => "basic",
            TenantPlan::Premium => "premium",
            TenantPlan::Enterprise => "enterprise",
        }
    }

    pub fn storage_limit(&self) -> &'static str {
        match self {
            TenantPlan::Basic => "20 GB",
            TenantPlan::Premium => "50 GB",
            TenantPlan::Enterprise => "100 GB",
        }
    }

    pub fn features(&self) -> Vec<String> {
        let features: &[&str] = match self {
            TenantPlan::Basic => &["Single University", "Basic Features"],
            TenantPlan::Premium => &["Multi-University", "Basic Analytics", "Email Support"],
            TenantPlan::Enterprise => &[
                "Multi-University",
                "Advanced Analytics",
                "API Access",
                "Custom Branding",
            ],
        };
        features.iter().map(|f| f.to_string()).collect()
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TenantPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(TenantPlan::Basic),
            "premium" => Ok(TenantPlan::Premium),
            "enterprise" => Ok(TenantPlan::Enterprise),
            other => Err(format!("unknown plan '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub subdomain: String,
    pub status: TenantStatus,
    pub plan: TenantPlan,
    pub universities: u32,
    pub students: u32,
    pub admins: u32,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub storage_used: String,
    pub storage_limit: String,
    pub features: Vec<String>,
}

/// Form input for a new tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTenant {
    pub name: String,
    pub domain: String,
    pub subdomain: String,
    pub plan: TenantPlan,
}

impl Tenant {
    /// Case-insensitive substring match over name, domain and subdomain. Empty terms match.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.name, &self.domain, &self.subdomain]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}
