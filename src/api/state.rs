//! Application state - Dependency injection container.
//!
//! Provides centralized access to the services and, when Postgres backs
//! them, the database handle used for health checks.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, MemoryPersistence};
use crate::services::{AuthService, ImportService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Import service
    pub import_service: Arc<dyn ImportService>,
    /// Database connection; `None` when running on the in-memory store
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state backed by Postgres.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            import_service: container.imports(),
            database: Some(database),
        }
    }

    /// Create application state over the in-memory store.
    pub fn in_memory(persistence: MemoryPersistence, config: Config) -> Self {
        let container = Services::in_memory(persistence, config);

        Self {
            auth_service: container.auth(),
            import_service: container.imports(),
            database: None,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        import_service: Arc<dyn ImportService>,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self {
            auth_service,
            import_service,
            database,
        }
    }
}
