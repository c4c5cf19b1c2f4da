//! Migration: Create a default profile whenever an identity is inserted.

use sea_orm_migration::prelude::*;

use crate::config::DEFAULT_AVATAR_URL;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CREATE_FUNCTION: &str = r#"
CREATE OR REPLACE FUNCTION handle_new_identity() RETURNS trigger AS $$
BEGIN
    INSERT INTO profiles (id, email, name, department, role, avatar, created_at, updated_at)
    VALUES (
        NEW.id,
        NEW.email,
        COALESCE(NEW.metadata->>'name', ''),
        COALESCE(NEW.metadata->>'department', ''),
        'employee',
        '{avatar}',
        NEW.created_at,
        NEW.created_at
    )
    ON CONFLICT (id) DO NOTHING;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
"#;

const CREATE_TRIGGER: &str = "CREATE TRIGGER on_identity_created \
    AFTER INSERT ON identities \
    FOR EACH ROW EXECUTE FUNCTION handle_new_identity()";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(&CREATE_FUNCTION.replace("{avatar}", DEFAULT_AVATAR_URL))
            .await?;
        db.execute_unprepared(CREATE_TRIGGER).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TRIGGER IF EXISTS on_identity_created ON identities")
            .await?;
        db.execute_unprepared("DROP FUNCTION IF EXISTS handle_new_identity()")
            .await?;
        Ok(())
    }
}
