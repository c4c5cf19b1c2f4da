//! Token command - Issues a bearer token for an existing identity.

use crate::cli::args::TokenArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::services::{AuthService, Authenticator};

/// Execute the token command
pub async fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config).await?;
    let uow = Persistence::new(db.get_connection());

    let identity = uow
        .identities()
        .find_by_email(&args.email)
        .await?
        .ok_or_else(|| AppError::validation(format!("No identity registered for {}", args.email)))?;

    let token = Authenticator::new(config).issue_token(&identity)?;
    println!("{}", token.access_token);

    Ok(())
}
