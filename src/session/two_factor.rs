//! Second-factor check for the super admin login.
//!
//! The only implementation today compares the submitted code against the code the
//! console generated and displayed itself, then logs in with a fixed backend credential
//! pair. Nothing is verified server-side. A challenge-response exchange with the backend
//! can replace [`ClientCodeCheck`] behind [`SecondFactor`] without touching callers.

use async_trait::async_trait;
use rand::Rng;

use crate::config::SecurityConfig;

pub const CODE_LENGTH: usize = 6;

#[async_trait]
pub trait SecondFactor: Send + Sync {
    /// Decide whether `submitted` answers `challenge`. Must not reach the login endpoint.
    async fn verify(&self, submitted: &str, challenge: &str) -> bool;
}

/// Exact string equality between the user's entry and the generated code.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientCodeCheck;

#[async_trait]
impl SecondFactor for ClientCodeCheck {
    async fn verify(&self, submitted: &str, challenge: &str) -> bool {
        submitted == challenge
    }
}

/// Backend credentials used once the second factor is accepted.
#[derive(Debug, Clone)]
pub struct SuperAdminCredentials {
    pub email: String,
    pub password: String,
    pub fallback_token: String,
}

impl SuperAdminCredentials {
    pub fn from_config(security: &SecurityConfig) -> Self {
        Self {
            email: security.super_admin_email.clone(),
            password: security.super_admin_password.clone(),
            fallback_token: security.super_admin_fallback_token.clone(),
        }
    }
}

/// Six random decimal digits, leading zeros kept.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
