//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod identity_repository;
mod profile_repository;

pub use identity_repository::{IdentityRepository, IdentityStore};
pub use profile_repository::{ProfileRepository, ProfileStore};

// Export mocks for unit tests and the test-utils feature
#[cfg(any(test, feature = "test-utils"))]
pub use identity_repository::MockIdentityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;
