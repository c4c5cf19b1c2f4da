//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use peeriq_import::api::{create_router, AppState};
use peeriq_import::config::{Config, DEV_JWT_SECRET};
use peeriq_import::domain::{Identity, ImportUserInput, NewIdentity};
use peeriq_import::infra::{IdentityRepository, MemoryPersistence, MemoryStore};
use peeriq_import::services::{bootstrap_admin, AuthService, Authenticator};

pub fn config() -> Config {
    let mut config = Config::builder(DEV_JWT_SECRET).expect("dev secret is long enough");
    config.profile_retry_delay_ms = 1;
    config
}

pub fn persistence() -> MemoryPersistence {
    MemoryPersistence::new(Arc::new(MemoryStore::new()))
}

pub async fn admin(persistence: &MemoryPersistence) -> Identity {
    bootstrap_admin(persistence, "admin@company.com")
        .await
        .expect("admin bootstrap")
}

/// An identity whose profile keeps the default employee role.
pub async fn member(persistence: &MemoryPersistence) -> Identity {
    persistence
        .store()
        .create(NewIdentity::imported("member@company.com", "Member", "Sales"))
        .await
        .expect("member identity")
}

pub fn token_for(identity: &Identity) -> String {
    Authenticator::new(config())
        .issue_token(identity)
        .expect("token")
        .access_token
}

pub fn user(name: &str, email: &str, department: &str, role: &str) -> ImportUserInput {
    ImportUserInput {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        department: Some(department.to_string()),
        role: Some(role.to_string()),
        expertise: None,
    }
}

/// Serve the router over `persistence` on an ephemeral port.
pub async fn spawn_app(persistence: MemoryPersistence) -> String {
    let app = create_router(AppState::in_memory(persistence, config()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });

    format!("http://{}", addr)
}
