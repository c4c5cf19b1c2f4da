//! Identity repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use super::entities::identity::{self, ActiveModel, Entity as IdentityEntity};
use crate::domain::{Identity, NewIdentity};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find identity by email, ignoring case
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Create a new identity; the platform creates its default profile
    async fn create(&self, identity: NewIdentity) -> AppResult<Identity>;

    /// List all identities, oldest first
    async fn list(&self) -> AppResult<Vec<Identity>>;
}

/// Concrete implementation of IdentityRepository
pub struct IdentityStore {
    db: DatabaseConnection,
}

impl IdentityStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a unique-index violation on email to a conflict.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Identity"),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl IdentityRepository for IdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let email = email.trim().to_lowercase();
        let result = IdentityEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col(identity::Column::Email))).eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Identity::from))
    }

    async fn create(&self, identity: NewIdentity) -> AppResult<Identity> {
        let metadata =
            serde_json::to_value(&identity.metadata).map_err(|e| AppError::internal(e.to_string()))?;

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(identity.email.trim().to_lowercase()),
            metadata: Set(metadata),
            email_confirmed: Set(identity.email_confirmed),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(Identity::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Identity>> {
        let models = IdentityEntity::find()
            .order_by_asc(identity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Identity::from).collect())
    }
}
