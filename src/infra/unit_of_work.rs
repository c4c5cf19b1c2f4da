//! Unit of Work pattern implementation.
//!
//! Centralizes access to the identity and profile repositories so services
//! depend on one abstraction regardless of the backing store.
//!
//! Imports deliberately run without a transaction spanning records: each
//! record's writes stand on their own.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::memory::MemoryStore;
use super::repositories::{IdentityRepository, IdentityStore, ProfileRepository, ProfileStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get identity repository
    fn identities(&self) -> Arc<dyn IdentityRepository>;

    /// Get profile repository
    fn profiles(&self) -> Arc<dyn ProfileRepository>;
}

/// SeaORM-backed UnitOfWork
pub struct Persistence {
    identity_repo: Arc<IdentityStore>,
    profile_repo: Arc<ProfileStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            identity_repo: Arc::new(IdentityStore::new(db.clone())),
            profile_repo: Arc::new(ProfileStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn identities(&self) -> Arc<dyn IdentityRepository> {
        self.identity_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }
}

/// UnitOfWork over a shared [`MemoryStore`]
#[derive(Clone, Default)]
pub struct MemoryPersistence {
    store: Arc<MemoryStore>,
}

impl MemoryPersistence {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for inspection.
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }
}

impl UnitOfWork for MemoryPersistence {
    fn identities(&self) -> Arc<dyn IdentityRepository> {
        self.store.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.store.clone()
    }
}
