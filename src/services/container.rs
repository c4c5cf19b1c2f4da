//! Service Container - Centralized service access.
//!
//! Wires the auth and import services over either persistence backend
//! and hands them out as trait objects.

use std::sync::Arc;

use super::{AuthService, Authenticator, ImportService, ImportSettings, UserImporter};
use crate::config::Config;
use crate::infra::{MemoryPersistence, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get import service
    fn imports(&self) -> Arc<dyn ImportService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    import_service: Arc<dyn ImportService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(auth_service: Arc<dyn AuthService>, import_service: Arc<dyn ImportService>) -> Self {
        Self {
            auth_service,
            import_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let import_service = Arc::new(UserImporter::new(uow, ImportSettings::from(&config)));
        let auth_service = Arc::new(Authenticator::new(config));

        Self::new(auth_service, import_service)
    }

    /// Create service container over the in-process store
    pub fn in_memory(persistence: MemoryPersistence, config: Config) -> Self {
        let import_service = Arc::new(UserImporter::new(
            Arc::new(persistence),
            ImportSettings::from(&config),
        ));
        let auth_service = Arc::new(Authenticator::new(config));

        Self::new(auth_service, import_service)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn imports(&self) -> Arc<dyn ImportService> {
        self.import_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEV_JWT_SECRET;
    use crate::domain::ImportUserInput;
    use crate::errors::AppError;
    use crate::services::bootstrap_admin;

    #[tokio::test]
    async fn in_memory_container_shares_the_store() {
        let persistence = MemoryPersistence::default();
        let config = Config::builder(DEV_JWT_SECRET).unwrap();
        let services = Services::in_memory(persistence.clone(), config);

        let admin = bootstrap_admin(&persistence, "admin@company.com")
            .await
            .unwrap();
        let token = services.auth().issue_token(&admin).unwrap();
        let claims = services.auth().verify_token(&token.access_token).unwrap();

        let users = vec![ImportUserInput {
            name: Some("Dana".to_string()),
            email: Some("dana@company.com".to_string()),
            department: Some("HR".to_string()),
            role: Some("employee".to_string()),
            expertise: None,
        }];
        let summary = services.imports().import_users(claims.sub, users).await.unwrap();

        assert_eq!(summary.successful, 1);
        assert_eq!(persistence.store().identity_count().await, 2);
    }

    #[tokio::test]
    async fn unknown_caller_is_forbidden() {
        let services = Services::in_memory(
            MemoryPersistence::default(),
            Config::builder(DEV_JWT_SECRET).unwrap(),
        );

        let result = services
            .imports()
            .import_users(uuid::Uuid::new_v4(), Vec::new())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
