use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use super::identity::Identity;
use super::two_factor::{ClientCodeCheck, SecondFactor, SuperAdminCredentials};
use super::SessionContext;
use crate::config::SecurityConfig;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::services::auth::{AuthApi, LoginRequest};
use crate::storage::StorageError;

/// Why a login attempt did not produce a session.
///
/// The boolean [`SessionStore::login`] API only logs these; callers that want to tell an
/// unreachable server apart from bad credentials use [`SessionStore::attempt_login`].
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{}", .0.user_message())]
    Connectivity(ClientError),

    #[error("login rejected: {message}")]
    Rejected { message: String },

    #[error("two-factor code does not match")]
    SecondFactorMismatch,

    #[error("malformed login response: {0}")]
    Malformed(String),

    #[error("login request failed: {0}")]
    Transport(ClientError),

    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl LoginError {
    fn from_client(err: ClientError) -> Self {
        if err.is_connectivity() {
            return LoginError::Connectivity(err);
        }
        match err {
            ClientError::Status { status, message } if (400..500).contains(&status) => {
                LoginError::Rejected { message }
            }
            other => LoginError::Transport(other),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, LoginError::Connectivity(_))
    }

    /// Credentials or second factor refused, as opposed to the login machinery failing.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LoginError::Rejected { .. } | LoginError::SecondFactorMismatch
        )
    }

    fn log(&self, email: &str) {
        match self {
            LoginError::Connectivity(e) => error!(email, error = %e, "login failed: backend unreachable"),
            LoginError::Rejected { message } => warn!(email, message = %message, "login rejected"),
            LoginError::SecondFactorMismatch => warn!(email, "two-factor code mismatch"),
            other => error!(email, error = %other, "login failed"),
        }
    }
}

/// Clears the loading flag however the in-flight call ends.
struct LoadingGuard<'a> {
    context: &'a SessionContext,
}

impl<'a> LoadingGuard<'a> {
    fn enter(context: &'a SessionContext) -> Self {
        context.set_loading(true);
        Self { context }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.context.set_loading(false);
    }
}

/// Login, two-factor login, logout and restore on top of a shared [`SessionContext`].
pub struct SessionStore {
    context: Arc<SessionContext>,
    auth: AuthApi,
    second_factor: Arc<dyn SecondFactor>,
    super_admin: SuperAdminCredentials,
    fallback_token: String,
}

impl SessionStore {
    /// `http` must have been built over the same `context`.
    pub fn new(context: Arc<SessionContext>, http: HttpClient, security: &SecurityConfig) -> Self {
        Self {
            context,
            auth: AuthApi::new(http),
            second_factor: Arc::new(ClientCodeCheck),
            super_admin: SuperAdminCredentials::from_config(security),
            fallback_token: security.fallback_token.clone(),
        }
    }

    pub fn with_second_factor(mut self, second_factor: Arc<dyn SecondFactor>) -> Self {
        self.second_factor = second_factor;
        self
    }

    /// Restore the previous session from durable storage. Never fails; storage errors
    /// are logged and leave the session anonymous.
    pub fn initialize(&self) -> Option<Identity> {
        match self.context.restore() {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "failed to restore session");
                None
            }
        }
    }

    /// Log in with email and password. Returns `false` on any failure, leaving the
    /// previous identity (if any) in place.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.attempt_login(email, password).await.is_ok()
    }

    pub async fn attempt_login(&self, email: &str, password: &str) -> Result<Identity, LoginError> {
        let email = email.trim();
        let _loading = LoadingGuard::enter(&self.context);
        let result = self
            .authenticate(email, password, &self.fallback_token, None)
            .await;
        if let Err(e) = &result {
            e.log(email);
        }
        result
    }

    /// Super admin login gated by a second factor.
    ///
    /// A mismatching code fails without contacting the backend. On a match the fixed
    /// super admin credentials are used and the accepted code is persisted.
    pub async fn login_super_admin_with_2fa(&self, user_code: &str, generated_code: &str) -> bool {
        self.attempt_super_admin_login(user_code, generated_code)
            .await
            .is_ok()
    }

    pub async fn attempt_super_admin_login(
        &self,
        user_code: &str,
        generated_code: &str,
    ) -> Result<Identity, LoginError> {
        let email = self.super_admin.email.as_str();
        if !self.second_factor.verify(user_code, generated_code).await {
            let e = LoginError::SecondFactorMismatch;
            e.log(email);
            return Err(e);
        }

        let _loading = LoadingGuard::enter(&self.context);
        let result = self
            .authenticate(
                email,
                &self.super_admin.password,
                &self.super_admin.fallback_token,
                Some(user_code),
            )
            .await;
        if let Err(e) = &result {
            e.log(email);
        }
        result
    }

    /// End the session locally. Idempotent; never contacts the backend.
    pub fn logout(&self) {
        if let Some(identity) = self.context.current() {
            info!(email = %identity.email, "logging out");
        }
        if let Err(e) = self.context.clear() {
            warn!(error = %e, "failed to clear stored session");
        }
    }

    /// Best-effort backend notification followed by the local logout.
    pub async fn logout_remote(&self) {
        if self.context.token().is_some() {
            if let Err(e) = self.auth.logout().await {
                warn!(error = %e, "backend logout failed");
            }
        }
        self.logout();
    }

    pub fn current(&self) -> Option<Identity> {
        self.context.current()
    }

    pub fn is_loading(&self) -> bool {
        self.context.is_loading()
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        fallback_token: &str,
        second_factor: Option<&str>,
    ) -> Result<Identity, LoginError> {
        info!(email, "login attempt");
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .auth
            .login(&request)
            .await
            .map_err(LoginError::from_client)?;

        if !response.success {
            return Err(LoginError::Rejected {
                message: response
                    .message
                    .unwrap_or_else(|| "Invalid email or password".to_string()),
            });
        }

        let user = response
            .user
            .ok_or_else(|| LoginError::Malformed("success without user payload".to_string()))?;
        let identity = Identity::from_login_user(&user, Utc::now())
            .ok_or_else(|| LoginError::Malformed(format!("unusable user payload (role '{}')", user.role)))?;

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| fallback_token.to_string());

        self.context.establish(identity.clone(), &token, second_factor)?;
        info!(email = %identity.email, role = %identity.role, "login succeeded");
        Ok(identity)
    }
}
