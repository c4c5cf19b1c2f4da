//! Infrastructure layer - External systems integration
//!
//! This module handles all storage concerns:
//! - Database connections and migrations
//! - Identity and profile repositories (SeaORM and in-memory)
//! - Unit of Work for repository access

pub mod db;
pub mod memory;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use memory::MemoryStore;
pub use repositories::{IdentityRepository, IdentityStore, ProfileRepository, ProfileStore};
pub use unit_of_work::{MemoryPersistence, Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockIdentityRepository, MockProfileRepository};
