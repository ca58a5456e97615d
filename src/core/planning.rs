//! Planning business logic - one soil/fertilizer/pest plan per plantation.
//!
//! Soil quality is recomputed from pH, texture, and nutrients on every save; a quality
//! sent along with the inputs is discarded. Deleting a planning puts its plantation back
//! in the "no plan" state.

use crate::{
    entities::{Planning, Plantation, planning},
    errors::{Error, Result},
    models::{FertilizerSchedule, PestControl, SoilData},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Lowest pH the planning form accepts.
pub const MIN_PH: f64 = 4.0;
/// Highest pH the planning form accepts.
pub const MAX_PH: f64 = 10.0;

/// Input for the planning form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPlanning {
    /// Plantation the plan is for
    pub project_id: i64,
    /// Soil measurements, if taken
    pub soil_data: Option<SoilData>,
    /// Fertilizer applications
    pub fertilizer_schedules: Vec<FertilizerSchedule>,
    /// Pest-control treatments
    pub pest_controls: Vec<PestControl>,
}

/// Parts of a planning to replace. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningUpdate {
    /// New soil measurements; `Some(None)` clears the stored ones
    pub soil_data: Option<Option<SoilData>>,
    /// New fertilizer list
    pub fertilizer_schedules: Option<Vec<FertilizerSchedule>>,
    /// New pest-control list
    pub pest_controls: Option<Vec<PestControl>>,
}

/// Clamps pH into the form's range and derives the quality rating.
///
/// # Errors
/// Returns [`Error::Validation`] for a NaN or infinite pH.
pub fn normalize_soil(soil: SoilData) -> Result<SoilData> {
    let ph_level = soil
        .ph_level
        .map(|ph| {
            if ph.is_finite() {
                Ok(ph.clamp(MIN_PH, MAX_PH))
            } else {
                Err(Error::validation(format!("pH level must be a number, got {ph}")))
            }
        })
        .transpose()?;

    let mut soil = SoilData { ph_level, ..soil };
    soil.quality = soil.derived_quality();
    Ok(soil)
}

fn set_soil(active: &mut planning::ActiveModel, soil: Option<&SoilData>) {
    active.ph_level = Set(soil.and_then(|s| s.ph_level));
    active.texture = Set(soil.and_then(|s| s.texture.clone()).map(String::from));
    active.nutrients = Set(soil.and_then(|s| s.nutrients.clone()).map(String::from));
    active.quality = Set(soil
        .and_then(|s| s.quality)
        .map(|quality| quality.as_str().to_string()));
}

/// Creates the planning for a plantation.
///
/// # Errors
/// Returns [`Error::PlantationNotFound`] when the plantation doesn't exist,
/// [`Error::DuplicatePlanning`] when it already has a planning, and
/// [`Error::Validation`] for a non-numeric pH.
pub async fn create_planning(db: &DatabaseConnection, new: NewPlanning) -> Result<planning::Model> {
    let soil = new.soil_data.map(normalize_soil).transpose()?;
    let fertilizer_schedules = serde_json::to_value(&new.fertilizer_schedules)?;
    let pest_controls = serde_json::to_value(&new.pest_controls)?;

    let txn = db.begin().await?;

    Plantation::find_by_id(new.project_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlantationNotFound { id: new.project_id })?;

    let existing = Planning::find()
        .filter(planning::Column::ProjectId.eq(new.project_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicatePlanning {
            project_id: new.project_id,
        });
    }

    let mut active = planning::ActiveModel {
        project_id: Set(new.project_id),
        fertilizer_schedules: Set(fertilizer_schedules),
        pest_controls: Set(pest_controls),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    set_soil(&mut active, soil.as_ref());

    let created = active.insert(&txn).await?;
    txn.commit().await?;

    info!(
        id = created.id,
        project_id = created.project_id,
        quality = created.quality.as_deref().unwrap_or("N/A"),
        "Created planning"
    );
    Ok(created)
}

/// Finds a planning by id.
pub async fn get_planning(
    db: &DatabaseConnection,
    planning_id: i64,
) -> Result<Option<planning::Model>> {
    Planning::find_by_id(planning_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the planning attached to a plantation, if any.
pub async fn get_planning_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Option<planning::Model>> {
    Planning::find()
        .filter(planning::Column::ProjectId.eq(project_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every planning in creation order.
pub async fn list_plannings(db: &DatabaseConnection) -> Result<Vec<planning::Model>> {
    Planning::find()
        .order_by_asc(planning::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces parts of a planning, re-deriving soil quality when soil data changes.
///
/// # Errors
/// Returns [`Error::PlanningNotFound`] for an unknown id and [`Error::Validation`] for a
/// non-numeric pH.
pub async fn update_planning(
    db: &DatabaseConnection,
    planning_id: i64,
    update: PlanningUpdate,
) -> Result<planning::Model> {
    let existing = Planning::find_by_id(planning_id)
        .one(db)
        .await?
        .ok_or(Error::PlanningNotFound { id: planning_id })?;

    if update == PlanningUpdate::default() {
        return Ok(existing);
    }

    let mut active: planning::ActiveModel = existing.into();
    if let Some(soil) = update.soil_data {
        let soil = soil.map(normalize_soil).transpose()?;
        set_soil(&mut active, soil.as_ref());
    }
    if let Some(schedules) = update.fertilizer_schedules {
        active.fertilizer_schedules = Set(serde_json::to_value(&schedules)?);
    }
    if let Some(controls) = update.pest_controls {
        active.pest_controls = Set(serde_json::to_value(&controls)?);
    }

    let updated = active.update(db).await?;
    info!(id = updated.id, "Updated planning");
    Ok(updated)
}

/// Deletes a planning. Its plantation is left untouched.
///
/// # Errors
/// Returns [`Error::PlanningNotFound`] when nothing was deleted.
pub async fn delete_planning(db: &DatabaseConnection, planning_id: i64) -> Result<()> {
    let result = Planning::delete_by_id(planning_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::PlanningNotFound { id: planning_id });
    }

    info!(id = planning_id, "Deleted planning");
    Ok(())
}
