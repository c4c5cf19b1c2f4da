//! PeerIQ user import
//!
//! Bulk onboarding of PeerIQ users from a CSV file. The client side
//! validates the file and submits the records; the service side creates
//! or reuses an identity per email and fills in the user's profile.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Import records, validation rules, identities and profiles
//! - **import**: CSV parsing and the import client
//! - **services**: Import and authentication use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the import service on an in-memory store
//! cargo run -- serve --store memory --bootstrap-admin admin@company.com
//!
//! # Write the example CSV and import it
//! cargo run -- template --output .
//! cargo run -- import user_import_template.csv --api-url http://localhost:3000 --token <JWT>
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod import;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{ImportOutcome, ImportSummary, ImportUserRecord, UserRole};
pub use errors::{AppError, AppResult};
pub use import::{BackendMode, ImportClient, ImportError, ImportFile};
