//! Plantation business logic - create, update, complete, and list plantations.
//!
//! The harvest date is never taken from input: every write recomputes it from the
//! resulting crop type and start date. Plantations are flagged completed rather than
//! deleted.

use crate::{
    core::{
        harvest::{CropType, project_harvest_date},
        merge::CompletionFilter,
    },
    entities::{Plantation, plantation},
    errors::{Error, Result},
    models::DEFAULT_LAND_AREA,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Input for the plantation creation form (also the shape of config.toml seeds).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPlantation {
    /// Project name, must not be blank
    pub project_name: String,
    /// One of the known crops, any case
    pub crop_type: String,
    /// Planting date
    #[serde(deserialize_with = "crate::config::settings::seed_date")]
    pub start_date: NaiveDate,
    /// Location, must not be blank
    pub location: String,
    /// At least one
    pub employees: u32,
}

/// Fields the update form may change. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantationUpdate {
    /// New project name
    pub project_name: Option<String>,
    /// New crop; the harvest date follows
    pub crop_type: Option<String>,
    /// New land area, must be positive
    pub land_area: Option<f64>,
    /// New planting date; the harvest date follows
    pub start_date: Option<NaiveDate>,
    /// New location
    pub location: Option<String>,
    /// New staff count
    pub employees: Option<u32>,
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn parse_crop_type(raw: &str) -> Result<CropType> {
    CropType::from_name(raw).ok_or_else(|| {
        Error::validation(format!(
            "unknown crop type '{raw}' (expected one of coconut, mango, rambutan, pineapple, tea)"
        ))
    })
}

fn employee_count(employees: u32) -> Result<i32> {
    if employees == 0 {
        return Err(Error::validation("a plantation needs at least one employee"));
    }
    i32::try_from(employees).map_err(|_| Error::validation("employee count is too large"))
}

fn checked_land_area(land_area: f64) -> Result<f64> {
    if !land_area.is_finite() || land_area <= 0.0 {
        return Err(Error::validation(format!(
            "land area must be a positive number, got {land_area}"
        )));
    }
    Ok(land_area)
}

/// Creates a plantation from the creation form.
///
/// Land area starts at [`DEFAULT_LAND_AREA`]; the harvest date is projected from the
/// crop type and start date.
///
/// # Errors
/// Returns [`Error::Validation`] for a blank name or location, zero employees, or an
/// unknown crop type, and a database error if the insert fails.
pub async fn create_plantation(
    db: &DatabaseConnection,
    new: NewPlantation,
) -> Result<plantation::Model> {
    let project_name = required_text("project name", &new.project_name)?;
    let location = required_text("location", &new.location)?;
    let crop = parse_crop_type(&new.crop_type)?;
    let employees = employee_count(new.employees)?;

    let plantation = plantation::ActiveModel {
        project_name: Set(project_name),
        crop_type: Set(crop.as_str().to_string()),
        land_area: Set(DEFAULT_LAND_AREA),
        start_date: Set(new.start_date),
        harvest_date: Set(project_harvest_date(crop.as_str(), new.start_date)),
        location: Set(location),
        employees: Set(employees),
        completed: Set(false),
        completed_date: Set(None),
        ..Default::default()
    };

    let created = plantation.insert(db).await?;
    info!(
        id = created.id,
        project = %created.project_name,
        harvest = %created.harvest_date,
        "Created plantation"
    );
    Ok(created)
}

/// Finds a plantation by id.
pub async fn get_plantation(
    db: &DatabaseConnection,
    plantation_id: i64,
) -> Result<Option<plantation::Model>> {
    Plantation::find_by_id(plantation_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists plantations passing `filter`, in creation order.
pub async fn list_plantations(
    db: &DatabaseConnection,
    filter: CompletionFilter,
) -> Result<Vec<plantation::Model>> {
    let mut query = Plantation::find();
    if let Some(completed) = filter.completed_param() {
        query = query.filter(plantation::Column::Completed.eq(completed));
    }

    query
        .order_by_asc(plantation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies the update form to a plantation and re-derives its harvest date.
///
/// # Errors
/// Returns [`Error::PlantationNotFound`] for an unknown id and [`Error::Validation`]
/// under the same rules as [`create_plantation`], plus a non-positive land area.
pub async fn update_plantation(
    db: &DatabaseConnection,
    plantation_id: i64,
    update: PlantationUpdate,
) -> Result<plantation::Model> {
    let existing = Plantation::find_by_id(plantation_id)
        .one(db)
        .await?
        .ok_or(Error::PlantationNotFound { id: plantation_id })?;

    let crop_type = match update.crop_type.as_deref() {
        Some(raw) => parse_crop_type(raw)?.as_str().to_string(),
        None => existing.crop_type.clone(),
    };
    let start_date = update.start_date.unwrap_or(existing.start_date);

    let mut active: plantation::ActiveModel = existing.into();
    if let Some(name) = update.project_name.as_deref() {
        active.project_name = Set(required_text("project name", name)?);
    }
    if let Some(location) = update.location.as_deref() {
        active.location = Set(required_text("location", location)?);
    }
    if let Some(land_area) = update.land_area {
        active.land_area = Set(checked_land_area(land_area)?);
    }
    if let Some(employees) = update.employees {
        active.employees = Set(employee_count(employees)?);
    }
    active.harvest_date = Set(project_harvest_date(&crop_type, start_date));
    active.crop_type = Set(crop_type);
    active.start_date = Set(start_date);

    let updated = active.update(db).await?;
    info!(id = updated.id, harvest = %updated.harvest_date, "Updated plantation");
    Ok(updated)
}

/// Flags a plantation completed on the given date.
pub async fn mark_plantation_completed(
    db: &DatabaseConnection,
    plantation_id: i64,
    completed_on: NaiveDate,
) -> Result<plantation::Model> {
    let existing = Plantation::find_by_id(plantation_id)
        .one(db)
        .await?
        .ok_or(Error::PlantationNotFound { id: plantation_id })?;

    let mut active: plantation::ActiveModel = existing.into();
    active.completed = Set(true);
    active.completed_date = Set(Some(completed_on));

    let updated = active.update(db).await?;
    info!(id = updated.id, "Marked plantation completed");
    Ok(updated)
}

/// Creates each seed plantation whose project name isn't in the store yet.
///
/// Returns how many were created, so running it on every start is harmless.
pub async fn seed_plantations(db: &DatabaseConnection, seeds: &[NewPlantation]) -> Result<usize> {
    let mut created = 0;

    for seed in seeds {
        let exists = Plantation::find()
            .filter(plantation::Column::ProjectName.eq(seed.project_name.trim()))
            .one(db)
            .await?
            .is_some();

        if !exists {
            create_plantation(db, seed.clone()).await?;
            created += 1;
        }
    }

    Ok(created)
}
