//! Who is logged in, and what they may do.
//!
//! [`SessionContext`] is the single source of truth for the current identity. It is shared
//! (`Arc`) between the [`SessionStore`], the HTTP client and anything else that needs to
//! ask about the session. Every mutation writes through to durable storage before it is
//! visible in memory, so a restarted process sees exactly what the last one left behind.

pub mod capability;
pub mod identity;
pub mod store;
pub mod two_factor;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::storage::{
    KeyValueStore, StorageError, AUTH_TOKEN_KEY, CURRENT_USER_KEY, SESSION_KEYS, SUPER_ADMIN_2FA_KEY,
};

pub use capability::{Capabilities, ResourceKind};
pub use identity::{Identity, Role};
pub use store::{LoginError, SessionStore};
pub use two_factor::{ClientCodeCheck, SecondFactor};

/// What a dashboard should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionView {
    /// Restore or login in flight
    Loading,
    Anonymous,
    Authenticated(Role),
}

pub struct SessionContext {
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Identity>>,
    loading: AtomicBool,
}

impl SessionContext {
    /// A context starts in the loading state until [`restore`](Self::restore) has run.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Arc<Self> {
        Arc::new(Self {
            storage,
            current: RwLock::new(None),
            loading: AtomicBool::new(true),
        })
    }

    /// Load identity and token from durable storage.
    ///
    /// Restores only when both keys are present. A stored identity that fails to parse
    /// is discarded together with the token and the session starts anonymous, and so is
    /// storage that cannot be read as a whole.
    pub fn restore(&self) -> Result<Option<Identity>, StorageError> {
        let result = self.restore_inner();
        self.set_loading(false);
        result
    }

    fn restore_inner(&self) -> Result<Option<Identity>, StorageError> {
        let stored = self
            .storage
            .get(CURRENT_USER_KEY)
            .and_then(|user| Ok((user, self.storage.get(AUTH_TOKEN_KEY)?)));
        let (stored_user, stored_token) = match stored {
            Ok(pair) => pair,
            Err(StorageError::Json(e)) => {
                warn!(error = %e, "discarding unreadable session storage");
                self.clear()?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let (Some(raw), Some(_token)) = (stored_user, stored_token) else {
            return Ok(None);
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                debug!(email = %identity.email, role = %identity.role, "restored session");
                self.replace(Some(identity.clone()));
                Ok(Some(identity))
            }
            Err(e) => {
                warn!(error = %e, "discarding malformed stored identity");
                self.storage.remove(CURRENT_USER_KEY)?;
                self.storage.remove(AUTH_TOKEN_KEY)?;
                self.replace(None);
                Ok(None)
            }
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Bearer token as currently stored. Read fresh on every call.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read stored token");
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    /// Make `identity` current and persist it with its token.
    ///
    /// Storage is written first. If any write fails the keys written so far get their
    /// previous values back and the in-memory identity is left as it was.
    pub fn establish(
        &self,
        identity: Identity,
        token: &str,
        second_factor: Option<&str>,
    ) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&identity)?;

        let mut writes = vec![(CURRENT_USER_KEY, serialized.as_str()), (AUTH_TOKEN_KEY, token)];
        if let Some(code) = second_factor {
            writes.push((SUPER_ADMIN_2FA_KEY, code));
        }

        let mut previous = Vec::with_capacity(writes.len());
        for (key, value) in writes {
            let written = self
                .storage
                .get(key)
                .and_then(|old| self.storage.set(key, value).map(|()| old));
            match written {
                Ok(old) => previous.push((key, old)),
                Err(e) => {
                    self.roll_back(&previous);
                    return Err(e);
                }
            }
        }

        self.replace(Some(identity));
        Ok(())
    }

    fn roll_back(&self, previous: &[(&str, Option<String>)]) {
        for (key, old) in previous.iter().rev() {
            let restored = match old {
                Some(value) => self.storage.set(key, value),
                None => self.storage.remove(key),
            };
            if let Err(e) = restored {
                warn!(key, error = %e, "failed to roll back session key");
            }
        }
    }

    /// Forget the identity and every persisted session key. Safe to call repeatedly.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.replace(None);
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Called by the HTTP layer on any 401. Ends the session regardless of who sent the request.
    pub fn invalidate(&self) {
        warn!("backend rejected the stored token, ending session");
        if let Err(e) = self.clear() {
            warn!(error = %e, "failed to clear stored session after 401");
        }
    }

    pub fn view(&self) -> SessionView {
        if self.is_loading() {
            return SessionView::Loading;
        }
        match self.current() {
            Some(identity) => SessionView::Authenticated(identity.role),
            None => SessionView::Anonymous,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(self.current().map(|identity| identity.role))
    }

    fn replace(&self, identity: Option<Identity>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = identity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    /// Memory store whose writes to one key fail while armed.
    struct FlakyStore {
        inner: MemoryStore,
        failing_key: &'static str,
        armed: AtomicBool,
    }

    impl FlakyStore {
        fn failing_on(failing_key: &'static str) -> Self {
            Self {
                inner: MemoryStore::new(),
                failing_key,
                armed: AtomicBool::new(false),
            }
        }

        fn arm(&self) {
            self.armed.store(true, Ordering::SeqCst);
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.failing_key && self.armed.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    fn identity(role: Role) -> Identity {
        Identity {
            id: "1".into(),
            email: "superadmin@lms.com".into(),
            name: "Super Administrator".into(),
            role,
            university_id: None,
            student_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn starts_loading_until_restored() {
        let context = SessionContext::new(Arc::new(MemoryStore::new()));
        assert_eq!(context.view(), SessionView::Loading);
        assert_eq!(context.restore().unwrap(), None);
        assert_eq!(context.view(), SessionView::Anonymous);
    }

    #[test]
    fn restores_identity_when_both_keys_present() {
        let storage = Arc::new(MemoryStore::new());
        let stored = identity(Role::SuperAdmin);
        storage
            .set(CURRENT_USER_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();
        storage.set(AUTH_TOKEN_KEY, "tok").unwrap();

        let context = SessionContext::new(storage);
        assert_eq!(context.restore().unwrap(), Some(stored));
        assert_eq!(context.view(), SessionView::Authenticated(Role::SuperAdmin));
        assert_eq!(context.token().as_deref(), Some("tok"));
    }

    #[test]
    fn identity_without_token_is_not_restored() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                CURRENT_USER_KEY,
                &serde_json::to_string(&identity(Role::Student)).unwrap(),
            )
            .unwrap();

        let context = SessionContext::new(storage.clone());
        assert_eq!(context.restore().unwrap(), None);
        // Left in place, restore simply does not happen
        assert!(storage.contains(CURRENT_USER_KEY));
    }

    #[test]
    fn malformed_identity_is_discarded() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(CURRENT_USER_KEY, "{not json").unwrap();
        storage.set(AUTH_TOKEN_KEY, "tok").unwrap();

        let context = SessionContext::new(storage.clone());
        assert_eq!(context.restore().unwrap(), None);
        assert!(!storage.contains(CURRENT_USER_KEY));
        assert!(!storage.contains(AUTH_TOKEN_KEY));
        assert_eq!(context.view(), SessionView::Anonymous);
    }

    #[test]
    fn clear_removes_every_key_and_is_idempotent() {
        let storage = Arc::new(MemoryStore::new());
        let context = SessionContext::new(storage.clone());
        context
            .establish(identity(Role::SuperAdmin), "tok", Some("123456"))
            .unwrap();
        assert_eq!(storage.len(), 3);

        context.clear().unwrap();
        context.clear().unwrap();
        assert!(storage.is_empty());
        assert!(context.current().is_none());
    }

    #[test]
    fn failed_establish_keeps_previous_session_stored() {
        let storage = Arc::new(FlakyStore::failing_on(AUTH_TOKEN_KEY));
        let context = SessionContext::new(storage.clone());
        let first = identity(Role::SuperAdmin);
        context.establish(first.clone(), "tok-a", None).unwrap();

        storage.arm();
        let mut second = identity(Role::UniversityAdmin);
        second.email = "admin@uni.edu".into();
        assert!(context.establish(second, "tok-b", None).is_err());

        assert_eq!(context.current(), Some(first.clone()));
        assert_eq!(context.token().as_deref(), Some("tok-a"));

        // A restarted process sees the first session, not a half-written second one
        let restarted = SessionContext::new(storage.clone());
        assert_eq!(restarted.restore().unwrap(), Some(first));
    }

    #[test]
    fn failed_first_establish_leaves_storage_empty() {
        let storage = Arc::new(FlakyStore::failing_on(SUPER_ADMIN_2FA_KEY));
        storage.arm();
        let context = SessionContext::new(storage.clone());

        assert!(context
            .establish(identity(Role::SuperAdmin), "tok", Some("123456"))
            .is_err());
        assert!(context.current().is_none());
        for key in SESSION_KEYS {
            assert_eq!(storage.get(key).unwrap(), None, "{key} left behind");
        }
    }

    #[test]
    fn capabilities_follow_current_role() {
        let context = SessionContext::new(Arc::new(MemoryStore::new()));
        context.set_loading(false);
        assert!(!context.capabilities().can_manage(ResourceKind::Course));

        context.establish(identity(Role::UniversityAdmin), "tok", None).unwrap();
        assert!(context.capabilities().can_manage(ResourceKind::Course));

        context.invalidate();
        assert_eq!(context.view(), SessionView::Anonymous);
    }
}
