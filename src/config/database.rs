//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.

use crate::entities::{Planning, Plantation};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::debug;

/// Used when `DATABASE_URL` is not set. `mode=rwc` creates the file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://plantations.sqlite?mode=rwc";

/// Gets the database URL from the environment, falling back to [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to {database_url}");

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the `plantations` and `plannings` tables if they don't exist yet.
///
/// The plantations table is created first since plannings reference it.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut plantation_table = schema.create_table_from_entity(Plantation);
    plantation_table.if_not_exists();
    let mut planning_table = schema.create_table_from_entity(Planning);
    planning_table.if_not_exists();

    db.execute(builder.build(&plantation_table)).await?;
    db.execute(builder.build(&planning_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PlanningModel, PlantationModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<PlantationModel> = Plantation::find().limit(1).all(&db).await?;
        let _: Vec<PlanningModel> = Planning::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<PlantationModel> = Plantation::find().limit(1).all(&db).await?;
        Ok(())
    }
}
