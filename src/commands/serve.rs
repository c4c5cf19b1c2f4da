//! Serve command - Starts the import service.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::{ServeArgs, StoreKind};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemoryPersistence, Persistence, UnitOfWork};
use crate::services::{bootstrap_admin, Authenticator, AuthService};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting import service...");

    apply_overrides(&args, &mut config);
    let addr = config.server_addr();

    let app_state = match args.store {
        StoreKind::Postgres => {
            let db = Arc::new(Database::connect(&config).await?);
            if let Some(email) = &args.bootstrap_admin {
                let uow = Persistence::new(db.get_connection());
                grant_admin(&uow, email, &config).await?;
            }
            AppState::from_config(db, config)
        }
        StoreKind::Memory => {
            tracing::warn!("Using the in-memory store; imported users are lost on exit");
            let persistence = MemoryPersistence::default();
            if let Some(email) = &args.bootstrap_admin {
                grant_admin(&persistence, email, &config).await?;
            }
            AppState::in_memory(persistence, config)
        }
    };

    // Build router
    let app = create_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Command-line host and port win over SERVER_HOST / SERVER_PORT.
fn apply_overrides(args: &ServeArgs, config: &mut Config) {
    if let Some(host) = &args.host {
        config.server_host = host.clone();
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
}

async fn grant_admin(uow: &dyn UnitOfWork, email: &str, config: &Config) -> AppResult<()> {
    let admin = bootstrap_admin(uow, email).await?;
    let token = Authenticator::new(config.clone()).issue_token(&admin)?;
    tracing::info!(
        "Bearer token for {} (expires in {}s): {}",
        admin.email,
        token.expires_in,
        token.access_token
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEV_JWT_SECRET;

    fn args(host: Option<&str>, port: Option<u16>) -> ServeArgs {
        ServeArgs {
            host: host.map(str::to_string),
            port,
            store: StoreKind::Memory,
            bootstrap_admin: None,
        }
    }

    #[test]
    fn bind_address_comes_from_config_by_default() {
        let mut config = Config::builder(DEV_JWT_SECRET).unwrap();
        config.server_port = 8080;

        apply_overrides(&args(None, None), &mut config);
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn flags_override_configured_address() {
        let mut config = Config::builder(DEV_JWT_SECRET).unwrap();

        apply_overrides(&args(Some("127.0.0.1"), Some(4000)), &mut config);
        assert_eq!(config.server_addr(), "127.0.0.1:4000");
    }
}
