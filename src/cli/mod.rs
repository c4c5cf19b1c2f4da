//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the import service
//! - `migrate` - Database migrations
//! - `import` - Validate a CSV file and import its users
//! - `template` - Write the example CSV
//! - `token` - Issue a bearer token for an identity

pub mod args;

pub use args::{Cli, Commands};
