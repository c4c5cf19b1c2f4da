//! In-memory identity and profile store.
//!
//! Backs `serve --store memory` and the integration tests. Creating an
//! identity also creates its default profile, the same way the Postgres
//! trigger does.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repositories::{IdentityRepository, ProfileRepository};
use crate::domain::{Identity, NewIdentity, Profile, ProfileUpdate, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};

#[derive(Default)]
struct Tables {
    /// Insertion order doubles as creation order
    identities: Vec<Identity>,
    profiles: HashMap<Uuid, Profile>,
}

/// Identity and profile tables held in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities currently stored.
    pub async fn identity_count(&self) -> usize {
        self.tables.read().await.identities.len()
    }
}

#[async_trait]
impl IdentityRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let email = email.trim().to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .identities
            .iter()
            .find(|i| i.email.to_lowercase() == email)
            .cloned())
    }

    async fn create(&self, identity: NewIdentity) -> AppResult<Identity> {
        let email = identity.email.trim().to_lowercase();
        let mut tables = self.tables.write().await;

        if tables.identities.iter().any(|i| i.email == email) {
            return Err(AppError::conflict("Identity"));
        }

        let created = Identity {
            id: Uuid::new_v4(),
            email,
            metadata: identity.metadata,
            email_confirmed: identity.email_confirmed,
            created_at: Utc::now(),
        };
        tables
            .profiles
            .insert(created.id, Profile::for_identity(&created));
        tables.identities.push(created.clone());

        Ok(created)
    }

    async fn list(&self) -> AppResult<Vec<Identity>> {
        Ok(self.tables.read().await.identities.clone())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&id).cloned())
    }

    async fn update_imported(&self, id: Uuid, update: ProfileUpdate) -> AppResult<Profile> {
        let mut tables = self.tables.write().await;
        let profile = tables.profiles.get_mut(&id).ok_or_not_found()?;
        profile.apply(&update);
        Ok(profile.clone())
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<Profile> {
        let mut tables = self.tables.write().await;
        let profile = tables.profiles.get_mut(&id).ok_or_not_found()?;
        profile.role = role;
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creating_identity_creates_default_profile() {
        let store = MemoryStore::new();
        let identity = store
            .create(NewIdentity::imported("Mike@Company.com", "Mike", "Operations"))
            .await
            .unwrap();

        assert_eq!(identity.email, "mike@company.com");
        let profile = ProfileRepository::find_by_id(&store, identity.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.name, "Mike");
        assert_eq!(profile.role, UserRole::Employee);
    }

    #[tokio::test]
    async fn email_lookup_ignores_case() {
        let store = MemoryStore::new();
        store
            .create(NewIdentity::imported("dana@company.com", "Dana", "HR"))
            .await
            .unwrap();

        let found = store.find_by_email(" DANA@Company.com").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store
            .create(NewIdentity::imported("dana@company.com", "Dana", "HR"))
            .await
            .unwrap();

        let result = store
            .create(NewIdentity::imported("DANA@company.com", "Dana", "HR"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.identity_count().await, 1);
    }

    #[tokio::test]
    async fn list_keeps_creation_order() {
        let store = MemoryStore::new();
        for email in ["b@company.com", "a@company.com"] {
            store
                .create(NewIdentity::imported(email, "X", "Y"))
                .await
                .unwrap();
        }

        let emails: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.email)
            .collect();
        assert_eq!(emails, vec!["b@company.com", "a@company.com"]);
    }

    #[tokio::test]
    async fn updating_unknown_profile_is_not_found() {
        let store = MemoryStore::new();
        let update = ProfileUpdate {
            name: "X".to_string(),
            department: "Y".to_string(),
            role: UserRole::Employee,
            expertise: Vec::new(),
            avatar: String::new(),
            status: String::new(),
            rating: 0.0,
            completed_helps: 0,
        };

        let result = store.update_imported(Uuid::new_v4(), update).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
