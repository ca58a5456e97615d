//! Dashboard shell - the stateful layer around the pure planning core.
//!
//! The shell owns the database connection and settings, reloads a snapshot on a fixed
//! interval, and prints the rendered dashboard. Each refresh derives everything again
//! from the freshly loaded records.

/// Plain-text rendering of dashboard summaries
pub mod render;

use crate::{
    config::settings::DashboardSettings,
    core::{
        report::{DashboardSummary, build_summary},
        snapshot::load_snapshot,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Shared state for the dashboard shell.
pub struct DashboardData {
    /// Database connection for all store operations
    pub database: DatabaseConnection,
    /// Refresh and display settings
    pub settings: DashboardSettings,
}

impl DashboardData {
    /// Creates a new `DashboardData` from a connection and settings.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: DashboardSettings) -> Self {
        Self { database, settings }
    }

    /// Loads a fresh snapshot and summarises it.
    pub async fn refresh(&self) -> Result<DashboardSummary> {
        let projects = load_snapshot(&self.database, self.settings.filter).await?;
        Ok(build_summary(&projects))
    }

    /// Refreshes and renders in one step.
    pub async fn refresh_rendered(&self) -> Result<String> {
        let summary = self.refresh().await?;
        info!(
            projects = summary.total_projects,
            reminders = summary.reminders.len(),
            "Dashboard refreshed"
        );
        render::render_summary(&summary, self.settings.reminder_limit)
    }
}

/// Refreshes the dashboard every `refresh_interval_secs` until Ctrl-C.
///
/// A failed refresh is logged and retried on the next tick.
pub async fn run(data: DashboardData) -> Result<()> {
    let period = Duration::from_secs(data.settings.refresh_interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Dashboard running: refresh every {}s, showing {:?} plantations",
        period.as_secs(),
        data.settings.filter
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => match data.refresh_rendered().await {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => error!("Dashboard refresh failed: {e}"),
            },
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Shutting down dashboard");
                return Ok(());
            }
        }
    }
}
