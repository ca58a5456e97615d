//! Plain-text rendering of a [`DashboardSummary`].

use crate::{
    core::report::{DashboardSummary, ProjectRow, format_date_or_na, format_quality, format_yield},
    errors::Result,
};
use std::fmt::Write;

/// Renders the whole dashboard: headline counts, project table, and reminders.
///
/// At most `reminder_limit` reminders are listed; the rest are summarised in one line.
pub fn render_summary(summary: &DashboardSummary, reminder_limit: usize) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "Plantation Dashboard")?;
    writeln!(
        out,
        "Projects: {} ({} active, {} completed) | Planned: {} | Awaiting plan: {}",
        summary.total_projects,
        summary.active_projects,
        summary.completed_projects,
        summary.planned_projects,
        summary.unplanned_projects
    )?;

    if summary.rows.is_empty() {
        writeln!(out, "\nNo plantations found.")?;
    } else {
        writeln!(out)?;
        for row in &summary.rows {
            writeln!(out, "{}", render_row(row))?;
        }
    }

    writeln!(out, "\nReminders")?;
    if summary.reminders.is_empty() {
        writeln!(out, "  No upcoming tasks.")?;
        return Ok(out);
    }

    for task in summary.reminders.iter().take(reminder_limit) {
        writeln!(
            out,
            "  {} | {:<12} | {} | {}",
            task.date.format("%Y-%m-%d"),
            task.kind.as_str(),
            task.project,
            task.details
        )?;
    }

    let hidden = summary.reminders.len().saturating_sub(reminder_limit);
    if hidden > 0 {
        writeln!(out, "  ... and {hidden} more")?;
    }

    Ok(out)
}

/// One line of the project table.
#[must_use]
pub fn render_row(row: &ProjectRow) -> String {
    let status = if row.completed { "completed" } else { "active" };

    format!(
        "{} [{}, {}] harvest {} | soil {} | fertilizer {} | pest control {} | yield {}",
        row.project_name,
        row.crop_type,
        status,
        row.harvest_date.format("%Y-%m-%d"),
        format_quality(row.soil_quality),
        format_date_or_na(row.next_fertilizer),
        format_date_or_na(row.next_pest_control),
        format_yield(row.estimated_yield)
    )
}
