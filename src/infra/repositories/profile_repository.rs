//! Profile repository implementation.
//!
//! Profiles are created by the platform when an identity is inserted, so
//! this repository only reads and updates them.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::profile::{ActiveModel, Entity as ProfileEntity};
use crate::domain::{Profile, ProfileUpdate, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by identity ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>>;

    /// Overwrite the imported fields of an existing profile.
    ///
    /// Returns `NotFound` if the profile does not exist (yet).
    async fn update_imported(&self, id: Uuid, update: ProfileUpdate) -> AppResult<Profile>;

    /// Change the role of an existing profile
    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<Profile>;
}

/// Concrete implementation of ProfileRepository
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<ActiveModel> {
        let model = ProfileEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;
        Ok(model.into())
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Profile::from))
    }

    async fn update_imported(&self, id: Uuid, update: ProfileUpdate) -> AppResult<Profile> {
        let mut active = self.find_model(id).await?;

        active.name = Set(update.name);
        active.department = Set(update.department);
        active.role = Set(update.role.to_string());
        active.expertise = Set(serde_json::json!(update.expertise));
        active.avatar = Set(update.avatar);
        active.status = Set(update.status);
        active.rating = Set(update.rating);
        active.completed_helps = Set(update.completed_helps);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Profile::from(model))
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<Profile> {
        let mut active = self.find_model(id).await?;

        active.role = Set(role.to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Profile::from(model))
    }
}
