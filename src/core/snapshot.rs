//! Loads a dashboard snapshot from the store.
//!
//! Plantations and plannings are independent reads, so both are fetched together and
//! merged only once both have arrived.

use crate::{
    core::{
        merge::{CompletionFilter, MergedProject, find_integrity_issues, merge},
        planning::list_plannings,
        plantation::list_plantations,
    },
    errors::Result,
    models::{Planning, Plantation},
};
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

/// Fetches plantations passing `filter` and every planning, converted to wire records.
pub async fn load_records(
    db: &DatabaseConnection,
    filter: CompletionFilter,
) -> Result<(Vec<Plantation>, Vec<Planning>)> {
    let (plantation_rows, planning_rows) =
        tokio::try_join!(list_plantations(db, filter), list_plannings(db))?;

    let plantations = plantation_rows.into_iter().map(Plantation::from).collect();
    let plannings = planning_rows
        .into_iter()
        .map(Planning::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok((plantations, plannings))
}

/// Fetches and merges a fresh snapshot. Nothing is cached between calls.
pub async fn load_snapshot(
    db: &DatabaseConnection,
    filter: CompletionFilter,
) -> Result<Vec<MergedProject>> {
    let (plantations, plannings) = load_records(db, filter).await?;
    debug!(
        plantations = plantations.len(),
        plannings = plannings.len(),
        "Loaded snapshot"
    );

    let issues = find_integrity_issues(&plantations, &plannings);
    if !issues.shadowed_plannings.is_empty() {
        warn!(
            "Ignoring plannings for already-planned plantations: {:?}",
            issues.shadowed_plannings
        );
    }
    // with a filter, plannings of hidden plantations look dangling
    if filter == CompletionFilter::All && !issues.dangling_plannings.is_empty() {
        warn!(
            "Ignoring plannings with no matching plantation: {:?}",
            issues.dangling_plannings
        );
    }

    Ok(merge(&plantations, &plannings))
}
