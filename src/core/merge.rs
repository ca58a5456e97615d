//! Joins plantations with their plannings.
//!
//! A plantation has at most one planning, linked by `Planning.project_id == Plantation.id`.
//! The backend does not enforce that, so the join takes the first planning it finds for a
//! plantation and leaves the rest out. [`find_integrity_issues`] reports what was left out.

use crate::models::{Planning, Plantation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which plantations a dashboard shows, keyed on the `completed` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFilter {
    /// Every plantation
    #[default]
    All,
    /// Plantations still in progress
    Active,
    /// Plantations flagged completed
    Completed,
}

impl CompletionFilter {
    /// Whether a plantation with this flag passes the filter.
    #[must_use]
    pub const fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    /// Value of the `?completed=` query parameter, if the filter needs one.
    #[must_use]
    pub const fn completed_param(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(false),
            Self::Completed => Some(true),
        }
    }
}

/// A plantation with its planning attached, if it has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedProject {
    /// The plantation record
    #[serde(flatten)]
    pub plantation: Plantation,
    /// Its planning, or `None` when no plan has been made yet
    pub planning: Option<Planning>,
}

/// Attaches to every plantation the first planning whose `project_id` matches it.
///
/// Output follows plantation order. Plannings that match no plantation are dropped.
#[must_use]
pub fn merge(plantations: &[Plantation], plannings: &[Planning]) -> Vec<MergedProject> {
    merge_filtered(plantations, plannings, CompletionFilter::All)
}

/// Same as [`merge`], keeping only plantations that pass `filter`.
#[must_use]
pub fn merge_filtered(
    plantations: &[Plantation],
    plannings: &[Planning],
    filter: CompletionFilter,
) -> Vec<MergedProject> {
    plantations
        .iter()
        .filter(|plantation| filter.matches(plantation.completed))
        .map(|plantation| MergedProject {
            plantation: plantation.clone(),
            planning: plannings
                .iter()
                .find(|planning| planning.project_id == plantation.id)
                .cloned(),
        })
        .collect()
}

/// Data that the join silently skips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityIssues {
    /// Plannings whose `project_id` matches no plantation
    pub dangling_plannings: Vec<String>,
    /// Plannings hidden behind an earlier planning for the same plantation
    pub shadowed_plannings: Vec<String>,
}

impl IntegrityIssues {
    /// True when the join used every planning.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dangling_plannings.is_empty() && self.shadowed_plannings.is_empty()
    }
}

/// Lists the planning ids that [`merge`] would not attach to anything.
#[must_use]
pub fn find_integrity_issues(
    plantations: &[Plantation],
    plannings: &[Planning],
) -> IntegrityIssues {
    let known: HashSet<&str> = plantations.iter().map(|p| p.id.as_str()).collect();
    let mut seen = HashSet::new();
    let mut issues = IntegrityIssues::default();

    for planning in plannings {
        if !known.contains(planning.project_id.as_str()) {
            issues.dangling_plannings.push(planning.id.clone());
        } else if !seen.insert(planning.project_id.as_str()) {
            issues.shadowed_plannings.push(planning.id.clone());
        }
    }

    issues
}
