//! Profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Profile, UserRole};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub department: String,
    pub role: String,
    /// JSON array of strings
    pub expertise: Json,
    pub avatar: String,
    pub status: String,
    pub rating: f64,
    pub completed_helps: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::identity::Entity",
        from = "Column::Id",
        to = "super::identity::Column::Id",
        on_delete = "Cascade"
    )]
    Identity,
}

impl Related<super::identity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Identity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Unknown role strings fall back to the least privileged role.
impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        Profile {
            id: model.id,
            email: model.email,
            name: model.name,
            department: model.department,
            role: model.role.parse().unwrap_or(UserRole::Employee),
            expertise: serde_json::from_value(model.expertise).unwrap_or_default(),
            avatar: model.avatar,
            status: model.status,
            rating: model.rating,
            completed_helps: model.completed_helps,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
