//! Dashboard metrics and summary generation.
//!
//! This module derives the per-project figures the dashboards show (next fertilizer and
//! pest-control dates, soil quality, estimated yield) and rolls a merged snapshot into a
//! [`DashboardSummary`]. All functions are pure; the shell decides when to call them.

use crate::{
    core::{
        harvest::project_harvest_date,
        merge::MergedProject,
        reminder::{ReminderTask, aggregate_reminders},
    },
    models::{Planning, SoilQuality},
};
use chrono::NaiveDate;

/// Placeholder shown wherever a figure can't be derived.
pub const NOT_AVAILABLE: &str = "N/A";

/// Yield added per fertilizer schedule entry, in kg/ha.
pub const YIELD_PER_FERTILIZER_KG: u32 = 50;

/// Earliest fertilizer date in the plan, ignoring undated entries.
#[must_use]
pub fn next_fertilizer_date(planning: &Planning) -> Option<NaiveDate> {
    planning
        .fertilizer_schedules
        .iter()
        .filter_map(|schedule| schedule.date)
        .min()
}

/// Earliest pest-control date in the plan, ignoring undated entries.
#[must_use]
pub fn next_pest_control_date(planning: &Planning) -> Option<NaiveDate> {
    planning
        .pest_controls
        .iter()
        .filter_map(|control| control.date)
        .min()
}

/// Soil quality derived from the plan's current soil inputs.
#[must_use]
pub fn soil_quality(planning: &Planning) -> Option<SoilQuality> {
    planning
        .soil_data
        .as_ref()
        .and_then(crate::models::SoilData::derived_quality)
}

/// Base yield for a soil rating, in kg/ha.
#[must_use]
pub const fn base_yield(quality: SoilQuality) -> u32 {
    match quality {
        SoilQuality::High => 1200,
        SoilQuality::Medium => 900,
        SoilQuality::Low => 600,
    }
}

/// Rough yield estimate in kg/ha: base yield for the soil rating plus 50 per
/// fertilizer entry. `None` when the plan has no rated soil.
///
/// This is a dashboard heuristic, not an agronomic model.
#[must_use]
pub fn estimated_yield(planning: &Planning) -> Option<u32> {
    let quality = soil_quality(planning)?;
    let fertilizer_count =
        u32::try_from(planning.fertilizer_schedules.len()).unwrap_or(u32::MAX);
    Some(
        base_yield(quality)
            .saturating_add(YIELD_PER_FERTILIZER_KG.saturating_mul(fertilizer_count)),
    )
}

/// One row of the project table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    /// Plantation name
    pub project_name: String,
    /// Crop as stored on the plantation
    pub crop_type: String,
    /// Derived harvest date
    pub harvest_date: NaiveDate,
    /// Whether the plantation is flagged completed
    pub completed: bool,
    /// Whether a planning exists
    pub planned: bool,
    /// Derived soil rating
    pub soil_quality: Option<SoilQuality>,
    /// Earliest fertilizer date
    pub next_fertilizer: Option<NaiveDate>,
    /// Earliest pest-control date
    pub next_pest_control: Option<NaiveDate>,
    /// Estimated yield in kg/ha
    pub estimated_yield: Option<u32>,
}

impl ProjectRow {
    /// Derives the row for one merged project.
    #[must_use]
    pub fn from_project(project: &MergedProject) -> Self {
        let plantation = &project.plantation;
        let planning = project.planning.as_ref();

        Self {
            project_name: plantation.project_name.clone(),
            crop_type: plantation.crop_type.clone(),
            harvest_date: project_harvest_date(&plantation.crop_type, plantation.start_date),
            completed: plantation.completed,
            planned: planning.is_some(),
            soil_quality: planning.and_then(soil_quality),
            next_fertilizer: planning.and_then(next_fertilizer_date),
            next_pest_control: planning.and_then(next_pest_control_date),
            estimated_yield: planning.and_then(estimated_yield),
        }
    }
}

/// Everything a dashboard refresh produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Projects shown
    pub total_projects: usize,
    /// Projects not yet completed
    pub active_projects: usize,
    /// Projects flagged completed
    pub completed_projects: usize,
    /// Projects with a planning
    pub planned_projects: usize,
    /// Projects still waiting for a planning
    pub unplanned_projects: usize,
    /// Per-project figures, in snapshot order
    pub rows: Vec<ProjectRow>,
    /// Flagged tasks sorted by due date
    pub reminders: Vec<ReminderTask>,
}

/// Builds the dashboard summary for a merged snapshot.
#[must_use]
pub fn build_summary(projects: &[MergedProject]) -> DashboardSummary {
    let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from_project).collect();
    let completed_projects = rows.iter().filter(|row| row.completed).count();
    let planned_projects = rows.iter().filter(|row| row.planned).count();

    DashboardSummary {
        total_projects: rows.len(),
        active_projects: rows.len() - completed_projects,
        completed_projects,
        planned_projects,
        unplanned_projects: rows.len() - planned_projects,
        rows,
        reminders: aggregate_reminders(projects),
    }
}

/// Formats a date as `YYYY-MM-DD`, or "N/A".
#[must_use]
pub fn format_date_or_na(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |date| date.format("%Y-%m-%d").to_string(),
    )
}

/// Formats a soil rating, or "N/A".
#[must_use]
pub fn format_quality(quality: Option<SoilQuality>) -> String {
    quality.map_or_else(|| NOT_AVAILABLE.to_string(), |q| q.as_str().to_string())
}

/// Formats a yield like "1300 kg/ha", or "N/A".
#[must_use]
pub fn format_yield(estimate: Option<u32>) -> String {
    estimate.map_or_else(|| NOT_AVAILABLE.to_string(), |kg| format!("{kg} kg/ha"))
}
