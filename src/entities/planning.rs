//! Planning entity - Soil data and treatment schedules for one plantation.
//!
//! Soil inputs are flat columns; the fertilizer and pest-control lists are stored as
//! JSON arrays in the same shape the REST API uses. `project_id` is unique, so a
//! plantation can never hold two plannings.

use crate::{errors::Error, models};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Planning database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plannings")]
pub struct Model {
    /// Unique identifier for the planning
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning plantation
    #[sea_orm(unique)]
    pub project_id: i64,
    /// Soil pH, clamped to 4.0-10.0 on save
    pub ph_level: Option<f64>,
    /// Soil texture as entered
    pub texture: Option<String>,
    /// Nutrient level as entered
    pub nutrients: Option<String>,
    /// Rating derived from the three soil inputs at last save
    pub quality: Option<String>,
    /// `Vec<FertilizerSchedule>` as JSON
    pub fertilizer_schedules: Json,
    /// `Vec<PestControl>` as JSON
    pub pest_controls: Json,
    /// When the planning was first saved
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Planning and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each planning belongs to one plantation
    #[sea_orm(
        belongs_to = "super::plantation::Entity",
        from = "Column::ProjectId",
        to = "super::plantation::Column::Id"
    )]
    Plantation,
}

impl Related<super::plantation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plantation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Soil inputs as a wire record; `None` when nothing was recorded.
    #[must_use]
    pub fn soil_data(&self) -> Option<models::SoilData> {
        if self.ph_level.is_none() && self.texture.is_none() && self.nutrients.is_none() {
            return None;
        }

        Some(models::SoilData {
            ph_level: self.ph_level,
            texture: self.texture.clone().map(models::Texture::from),
            nutrients: self.nutrients.clone().map(models::NutrientLevel::from),
            quality: self.quality.as_deref().and_then(models::SoilQuality::parse),
        })
    }
}

impl TryFrom<Model> for models::Planning {
    type Error = Error;

    fn try_from(row: Model) -> Result<Self, Self::Error> {
        let soil_data = row.soil_data();
        Ok(Self {
            id: row.id.to_string(),
            project_id: row.project_id.to_string(),
            soil_data,
            fertilizer_schedules: serde_json::from_value(row.fertilizer_schedules)?,
            pest_controls: serde_json::from_value(row.pest_controls)?,
            created_at: Some(row.created_at),
        })
    }
}
