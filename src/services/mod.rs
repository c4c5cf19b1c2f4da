//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! Repository access goes through the Unit of Work so the same services
//! run over Postgres or the in-memory store.

mod auth_service;
pub mod container;
mod import_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use import_service::{bootstrap_admin, ImportService, ImportSettings, UserImporter};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
