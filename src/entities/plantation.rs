//! Plantation entity - One cultivation project.
//!
//! The harvest date column is always written from the crop type and start date;
//! completed projects are flagged, never deleted.

use crate::models;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plantation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plantations")]
pub struct Model {
    /// Unique identifier for the plantation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the project
    pub project_name: String,
    /// Canonical lowercase crop name (e.g. "coconut")
    pub crop_type: String,
    /// Cultivated area
    pub land_area: f64,
    /// Planting date
    pub start_date: Date,
    /// Derived harvest date
    pub harvest_date: Date,
    /// Where the plantation is
    pub location: String,
    /// Staff assigned to the project
    pub employees: i32,
    /// Soft completion flag
    pub completed: bool,
    /// Set when the project is flagged completed
    pub completed_date: Option<Date>,
}

/// Defines relationships between Plantation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One plantation has at most one planning
    #[sea_orm(has_one = "super::planning::Entity")]
    Planning,
}

impl Related<super::planning::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planning.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::Plantation {
    fn from(row: Model) -> Self {
        Self {
            id: row.id.to_string(),
            project_name: row.project_name,
            crop_type: row.crop_type,
            land_area: row.land_area,
            start_date: row.start_date,
            harvest_date: Some(row.harvest_date),
            location: row.location,
            // the store rejects counts below one
            employees: u32::try_from(row.employees).unwrap_or_default(),
            completed: row.completed,
            completed_date: row.completed_date,
        }
    }
}
