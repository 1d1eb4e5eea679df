use std::sync::Arc;

use anyhow::{anyhow, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::http::HttpClient;
use crate::session::{Identity, ResourceKind, SessionContext, SessionStore};
use crate::storage::FileStore;

/// Wiring shared by every command: durable session file, HTTP client, session store.
pub struct ConsoleContext {
    pub config: AppConfig,
    pub session: Arc<SessionContext>,
    pub http: HttpClient,
    pub store: SessionStore,
}

impl ConsoleContext {
    pub fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let storage = FileStore::open(&config.storage).context("failed to open session storage")?;
        let session = SessionContext::new(Arc::new(storage));
        let http = HttpClient::new(&config.api, session.clone())
            .with_context(|| format!("invalid API base URL '{}'", config.api.base_url))?;
        let store = SessionStore::new(session.clone(), http.clone(), &config.security);
        store.initialize();

        Ok(Self {
            config: config.clone(),
            session,
            http,
            store,
        })
    }

    pub fn require_identity(&self) -> anyhow::Result<Identity> {
        self.session
            .current()
            .ok_or_else(|| anyhow!("not logged in. Run `lms auth login <email>` first"))
    }

    pub fn require_view(&self, kind: ResourceKind) -> anyhow::Result<Identity> {
        let identity = self.require_identity()?;
        if !self.session.capabilities().can_view(kind) {
            return Err(anyhow!("role {} cannot view {} records", identity.role, kind));
        }
        Ok(identity)
    }

    pub fn require_manage(&self, kind: ResourceKind) -> anyhow::Result<Identity> {
        let identity = self.require_identity()?;
        if !self.session.capabilities().can_manage(kind) {
            return Err(anyhow!("role {} cannot modify {} records", identity.role, kind));
        }
        Ok(identity)
    }
}

/// Seeded when a seed is given so simulated data can be reproduced between runs.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
