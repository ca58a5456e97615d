//! Shared test utilities.
//!
//! Helpers for setting up an in-memory store and for building plain records with
//! sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        planning::{self, NewPlanning},
        plantation::{self, NewPlantation},
    },
    entities,
    errors::Result,
    models::{FertilizerSchedule, PestControl, Planning, Plantation},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Shorthand for a calendar date.
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creation form input with a fixed location and five employees.
pub fn new_plantation(name: &str, crop_type: &str, start_date: NaiveDate) -> NewPlantation {
    NewPlantation {
        project_name: name.to_string(),
        crop_type: crop_type.to_string(),
        start_date,
        location: "Kandy".to_string(),
        employees: 5,
    }
}

/// Creates a mango plantation planted on 2025-01-15.
pub async fn create_test_plantation(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::plantation::Model> {
    plantation::create_plantation(db, new_plantation(name, "mango", ymd(2025, 1, 15))).await
}

/// Sets up a store holding one plantation.
/// Returns (db, plantation) for common test scenarios.
pub async fn setup_with_plantation() -> Result<(DatabaseConnection, entities::plantation::Model)> {
    let db = setup_test_db().await?;
    let plantation = create_test_plantation(&db, "Test Plantation").await?;
    Ok((db, plantation))
}

/// Creates an empty planning (no soil data, no schedules).
pub async fn create_test_planning(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<entities::planning::Model> {
    planning::create_planning(
        db,
        NewPlanning {
            project_id,
            ..Default::default()
        },
    )
    .await
}

/// Creates a planning with one flagged fertilizer entry, one unflagged fertilizer entry,
/// and one flagged pest-control entry.
pub async fn create_planning_with_reminders(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<entities::planning::Model> {
    planning::create_planning(
        db,
        NewPlanning {
            project_id,
            soil_data: None,
            fertilizer_schedules: vec![
                fertilizer("f1", Some(ymd(2025, 3, 1)), true),
                fertilizer("f2", Some(ymd(2025, 1, 1)), false),
            ],
            pest_controls: vec![pest("c1", Some(ymd(2025, 2, 15)), true)],
        },
    )
    .await
}

/// A Urea broadcast entry.
pub fn fertilizer(id: &str, date: Option<NaiveDate>, reminder: bool) -> FertilizerSchedule {
    FertilizerSchedule {
        id: Some(id.to_string()),
        fertilizer_type: "Urea".to_string(),
        date,
        quantity: Some(25.0),
        method: "Broadcast".to_string(),
        reminder,
    }
}

/// A monthly neem-oil spray.
pub fn pest(id: &str, date: Option<NaiveDate>, reminder: bool) -> PestControl {
    PestControl {
        id: Some(id.to_string()),
        method: "Spraying".to_string(),
        product: "Neem oil".to_string(),
        date,
        frequency: "Monthly".to_string(),
        reminder,
    }
}

/// A mango plantation record planted on 2025-01-15.
pub fn plantation_record(id: &str, name: &str, completed: bool) -> Plantation {
    Plantation {
        id: id.to_string(),
        project_name: name.to_string(),
        crop_type: "mango".to_string(),
        land_area: 1.0,
        start_date: ymd(2025, 1, 15),
        harvest_date: Some(ymd(2026, 1, 15)),
        location: "Kandy".to_string(),
        employees: 5,
        completed,
        completed_date: completed.then(|| ymd(2025, 12, 1)),
    }
}

/// An empty planning record for `project_id`.
pub fn planning_record(id: &str, project_id: &str) -> Planning {
    Planning {
        id: id.to_string(),
        project_id: project_id.to_string(),
        soil_data: None,
        fertilizer_schedules: Vec::new(),
        pest_controls: Vec::new(),
        created_at: None,
    }
}
