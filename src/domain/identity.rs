//! Identity entity owned by the authentication subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to an identity at creation time.
///
/// The profile trigger reads it to seed the default profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMetadata {
    pub name: String,
    pub department: String,
}

/// Authentication identity, one per distinct email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// Stored lower-cased; lookups are case-insensitive
    pub email: String,
    pub metadata: IdentityMetadata,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub email: String,
    pub metadata: IdentityMetadata,
    pub email_confirmed: bool,
}

impl NewIdentity {
    /// Identity for an imported user; imported emails count as confirmed.
    pub fn imported(email: &str, name: &str, department: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            metadata: IdentityMetadata {
                name: name.to_string(),
                department: department.to_string(),
            },
            email_confirmed: true,
        }
    }
}
