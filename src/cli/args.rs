//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// PeerIQ user import - CSV client and import service
#[derive(Parser, Debug)]
#[command(name = "peeriq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the import service
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Validate a CSV file and import its users
    Import(ImportArgs),

    /// Write the example import CSV
    Template(TemplateArgs),

    /// Issue a bearer token for an existing identity
    Token(TokenArgs),
}

/// Backing store for the import service
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// Postgres via DATABASE_URL
    Postgres,
    /// Process memory, lost on exit
    Memory,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Where identities and profiles are kept
    #[arg(long, value_enum, default_value = "postgres")]
    pub store: StoreKind,

    /// Grant admin to this email (creating the identity if needed) and log a token
    #[arg(long, value_name = "EMAIL")]
    pub bootstrap_admin: Option<String>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the import command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// CSV file with name, email, department, role and optional expertise columns
    pub file: PathBuf,

    /// Base URL of the import service (overrides IMPORT_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Bearer token to present (overrides IMPORT_ACCESS_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Validate only and report a simulated result
    #[arg(long)]
    pub simulate: bool,
}

/// Arguments for the template command
#[derive(Parser, Debug)]
pub struct TemplateArgs {
    /// Directory to write the template into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Arguments for the token command
#[derive(Parser, Debug)]
pub struct TokenArgs {
    /// Email of the identity
    pub email: String,
}
