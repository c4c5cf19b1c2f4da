//! Profile entity holding business-level user attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Identity;
use super::import::{ImportUserRecord, UserRole};
use crate::config::{DEFAULT_AVATAR_URL, STATUS_AVAILABLE};

/// Application profile, one-to-one with an identity (shared id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub department: String,
    pub role: UserRole,
    pub expertise: Vec<String>,
    pub avatar: String,
    pub status: String,
    pub rating: f64,
    pub completed_helps: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Default profile the platform creates for a new identity.
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            name: identity.metadata.name.clone(),
            department: identity.metadata.department.clone(),
            role: UserRole::Employee,
            expertise: Vec::new(),
            avatar: DEFAULT_AVATAR_URL.to_string(),
            status: STATUS_AVAILABLE.to_string(),
            rating: 0.0,
            completed_helps: 0,
            created_at: identity.created_at,
            updated_at: identity.created_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Overwrite the imported fields.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.name = update.name.clone();
        self.department = update.department.clone();
        self.role = update.role;
        self.expertise = update.expertise.clone();
        self.avatar = update.avatar.clone();
        self.status = update.status.clone();
        self.rating = update.rating;
        self.completed_helps = update.completed_helps;
        self.updated_at = Utc::now();
    }
}

/// Profile values written by an import.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub department: String,
    pub role: UserRole,
    pub expertise: Vec<String>,
    pub avatar: String,
    pub status: String,
    pub rating: f64,
    pub completed_helps: i32,
}

impl From<&ImportUserRecord> for ProfileUpdate {
    fn from(record: &ImportUserRecord) -> Self {
        Self {
            name: record.name.clone(),
            department: record.department.clone(),
            role: record.role,
            expertise: record.expertise.clone(),
            avatar: DEFAULT_AVATAR_URL.to_string(),
            status: STATUS_AVAILABLE.to_string(),
            // NOTE: rating and completed_helps are reset even when the
            // identity already existed, wiping earned stats on re-import.
            // Kept as-is until product decides whether to preserve them.
            rating: 0.0,
            completed_helps: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::IdentityMetadata;

    #[test]
    fn import_update_resets_stats() {
        let identity = Identity {
            id: Uuid::new_v4(),
            email: "lisa@company.com".to_string(),
            metadata: IdentityMetadata::default(),
            email_confirmed: true,
            created_at: Utc::now(),
        };
        let mut profile = Profile::for_identity(&identity);
        profile.rating = 4.8;
        profile.completed_helps = 12;
        profile.status = "busy".to_string();

        let record = ImportUserRecord {
            name: "Lisa Thompson".to_string(),
            email: "lisa@company.com".to_string(),
            department: "Finance".to_string(),
            role: UserRole::Expert,
            expertise: vec!["Budget Planning".to_string()],
        };
        profile.apply(&ProfileUpdate::from(&record));

        assert_eq!(profile.name, "Lisa Thompson");
        assert_eq!(profile.role, UserRole::Expert);
        assert_eq!(profile.status, STATUS_AVAILABLE);
        assert_eq!(profile.rating, 0.0);
        assert_eq!(profile.completed_helps, 0);
    }
}
