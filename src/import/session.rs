//! Sessions the import client authenticates with.

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
}

/// The user a session belongs to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "sub")]
    pub id: Uuid,
    pub email: String,
}

/// Source of the current session, supplied by the embedding application.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> Option<Session>;

    async fn current_user(&self) -> Option<SessionUser>;
}

/// Session backed by a fixed bearer token, as used by the CLI.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn current_session(&self) -> Option<Session> {
        self.token.clone().map(|access_token| Session { access_token })
    }

    /// Reads the user from the token's claims.
    ///
    /// The signature is not checked here; the import service verifies it.
    async fn current_user(&self) -> Option<SessionUser> {
        let token = self.token.as_deref()?;
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();

        decode::<SessionUser>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .ok()
    }
}
