//! Identity database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Identity, IdentityMetadata};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "identities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Lower-cased; a unique index on `lower(email)` backs it
    pub email: String,
    /// `{ "name": ..., "department": ... }`
    pub metadata: Json,
    pub email_confirmed: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::profile::Entity")]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Identity {
    fn from(model: Model) -> Self {
        Identity {
            id: model.id,
            email: model.email,
            metadata: serde_json::from_value::<IdentityMetadata>(model.metadata)
                .unwrap_or_default(),
            email_confirmed: model.email_confirmed,
            created_at: model.created_at,
        }
    }
}
