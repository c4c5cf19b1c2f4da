//! Import service - Bulk creation of identities and profiles.
//!
//! The caller must hold the admin role. Records are processed one after
//! another and independently: a failing record is counted and reported,
//! and the next record proceeds as if nothing happened.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{
    Identity, ImportSummary, ImportTally, ImportUserInput, ImportUserRecord, NewIdentity, Profile,
    ProfileUpdate, RecordError, Resolution, UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Import service trait for dependency injection.
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Only admins may import. Returns the caller's profile.
    async fn authorize(&self, caller: Uuid) -> AppResult<Profile>;

    /// Import a batch of users on behalf of `caller`.
    ///
    /// Fails as a whole only when the caller is not an admin; otherwise
    /// returns per-record counts.
    async fn import_users(&self, caller: Uuid, users: Vec<ImportUserInput>)
        -> AppResult<ImportSummary>;
}

/// Tuning for profile propagation after identity creation
#[derive(Debug, Clone, Copy)]
pub struct ImportSettings {
    /// Extra update attempts while the new profile is not yet visible
    pub profile_retry_attempts: u32,
    pub profile_retry_delay: Duration,
}

impl From<&Config> for ImportSettings {
    fn from(config: &Config) -> Self {
        Self {
            profile_retry_attempts: config.profile_retry_attempts,
            profile_retry_delay: config.profile_retry_delay(),
        }
    }
}

/// Concrete implementation of ImportService using Unit of Work.
pub struct UserImporter<U: UnitOfWork> {
    uow: Arc<U>,
    settings: ImportSettings,
}

impl<U: UnitOfWork> UserImporter<U> {
    pub fn new(uow: Arc<U>, settings: ImportSettings) -> Self {
        Self { uow, settings }
    }

    async fn import_record(
        &self,
        position: usize,
        total: usize,
        input: &ImportUserInput,
    ) -> Result<Resolution, RecordError> {
        let label = input.email_label();
        tracing::debug!("Processing user {}/{}: {}", position, total, label);

        let record = input.validate().map_err(|e| RecordError::new(label, e))?;

        let (identity, resolution) = self
            .resolve_identity(&record)
            .await
            .map_err(|e| RecordError::new(label, e))?;

        self.update_profile(identity.id, &ProfileUpdate::from(&record))
            .await
            .map_err(|e| {
                let reason = match e {
                    AppError::NotFound => "profile not found".to_string(),
                    other => other.user_message(),
                };
                RecordError::new(label, format!("Failed to update profile: {}", reason))
            })?;

        Ok(resolution)
    }

    /// Reuse the identity registered for this email, or create one.
    async fn resolve_identity(&self, record: &ImportUserRecord) -> Result<(Identity, Resolution), String> {
        let identities = self.uow.identities();

        let existing = identities
            .find_by_email(&record.email)
            .await
            .map_err(|e| format!("Failed to look up identity: {}", e.user_message()))?;

        if let Some(identity) = existing {
            tracing::info!(
                identity_id = %identity.id,
                "Identity for {} already exists, reusing it",
                record.email
            );
            return Ok((identity, Resolution::Existing));
        }

        let identity = identities
            .create(NewIdentity::imported(&record.email, &record.name, &record.department))
            .await
            .map_err(|e| format!("Failed to create identity: {}", e.user_message()))?;

        tracing::info!(identity_id = %identity.id, "Created identity for {}", record.email);
        Ok((identity, Resolution::Created))
    }

    /// Update the profile, waiting for it to appear after identity creation.
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> AppResult<Profile> {
        let profiles = self.uow.profiles();
        let mut attempt = 0;

        loop {
            match profiles.update_imported(id, update.clone()).await {
                Err(AppError::NotFound) if attempt < self.settings.profile_retry_attempts => {
                    attempt += 1;
                    tracing::debug!(profile_id = %id, attempt, "Profile not visible yet, retrying");
                    tokio::time::sleep(self.settings.profile_retry_delay).await;
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> ImportService for UserImporter<U> {
    async fn authorize(&self, caller: Uuid) -> AppResult<Profile> {
        let profile = self
            .uow
            .profiles()
            .find_by_id(caller)
            .await
            .map_err(|e| {
                tracing::error!(caller = %caller, "Profile lookup failed: {}", e);
                AppError::forbidden("Could not verify user permissions")
            })?
            .ok_or_else(|| AppError::forbidden("Could not verify user permissions"))?;

        if !profile.is_admin() {
            return Err(AppError::forbidden("Admin access required for user import"));
        }

        Ok(profile)
    }

    /// Checks the caller before touching any record.
    async fn import_users(
        &self,
        caller: Uuid,
        users: Vec<ImportUserInput>,
    ) -> AppResult<ImportSummary> {
        let admin = self.authorize(caller).await?;
        tracing::info!("Admin {} importing {} users", admin.email, users.len());

        let total = users.len();
        let importer = self;
        let tally = stream::iter(users.into_iter().enumerate())
            .then(move |(index, input)| async move {
                importer.import_record(index + 1, total, &input).await
            })
            .inspect(|result| {
                if let Err(e) = result {
                    tracing::warn!("Error importing user {}", e);
                }
            })
            .fold(ImportTally::default(), |tally, result| {
                future::ready(tally.record(result))
            })
            .await;

        let summary = tally.into_summary(total);
        tracing::info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Import completed"
        );

        Ok(summary)
    }
}

/// Make sure `email` has an identity whose profile holds the admin role.
///
/// Used to seed a fresh store so someone is allowed to import.
pub async fn bootstrap_admin<U: UnitOfWork + ?Sized>(uow: &U, email: &str) -> AppResult<Identity> {
    let identities = uow.identities();
    let identity = match identities.find_by_email(email).await? {
        Some(identity) => identity,
        None => {
            identities
                .create(NewIdentity::imported(email, "Administrator", "Administration"))
                .await?
        }
    };

    uow.profiles().set_role(identity.id, UserRole::Admin).await?;
    tracing::info!(identity_id = %identity.id, "Admin access granted to {}", identity.email);

    Ok(identity)
}
