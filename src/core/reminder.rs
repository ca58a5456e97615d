//! Reminder aggregation across every planning on the dashboard.
//!
//! A reminder is a fertilizer or pest-control entry with its reminder flag set. Reminders
//! are derived on every read and never stored. The due date is the entry's own date;
//! the "3 days before" / "2 days before" wording on the form is a label only.

use crate::core::merge::MergedProject;
use crate::models::{Planning, iso_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of entry raised the reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    /// A fertilizer schedule entry
    Fertilizer,
    /// A pest-control entry
    #[serde(rename = "Pest Control")]
    PestControl,
}

impl ReminderKind {
    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fertilizer => "Fertilizer",
            Self::PestControl => "Pest Control",
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upcoming task on the reminder list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderTask {
    /// Stable key: the sub-record's id, or a key built from its position
    pub id: String,
    /// Fertilizer or pest control
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    /// Due date
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    /// Name of the plantation the task belongs to
    pub project: String,
    /// `"<type> (<method>)"` for fertilizer, `"<method> - <product>"` for pest control
    pub details: String,
}

/// Collects every flagged entry across the projects, sorted by due date.
///
/// Entries without a date are skipped. Entries due on the same day keep their
/// project order, fertilizer before pest control.
#[must_use]
pub fn aggregate_reminders(projects: &[MergedProject]) -> Vec<ReminderTask> {
    let mut tasks: Vec<ReminderTask> = projects
        .iter()
        .filter_map(|project| {
            project
                .planning
                .as_ref()
                .map(|planning| (project.plantation.project_name.as_str(), planning))
        })
        .flat_map(|(project_name, planning)| planning_reminders(project_name, planning))
        .collect();

    // stable: equal dates keep emission order
    tasks.sort_by_key(|task| task.date);
    tasks
}

/// Flagged entries of one planning, in entry order (fertilizer first).
pub fn planning_reminders<'a>(
    project_name: &'a str,
    planning: &'a Planning,
) -> impl Iterator<Item = ReminderTask> + 'a {
    let fertilizers = planning
        .fertilizer_schedules
        .iter()
        .enumerate()
        .filter(|(_, schedule)| schedule.reminder)
        .filter_map(move |(index, schedule)| {
            Some(ReminderTask {
                id: sub_record_key(schedule.id.as_deref(), &planning.id, "fertilizer", index),
                kind: ReminderKind::Fertilizer,
                date: schedule.date?,
                project: project_name.to_string(),
                details: format!("{} ({})", schedule.fertilizer_type, schedule.method),
            })
        });

    let pests = planning
        .pest_controls
        .iter()
        .enumerate()
        .filter(|(_, control)| control.reminder)
        .filter_map(move |(index, control)| {
            Some(ReminderTask {
                id: sub_record_key(control.id.as_deref(), &planning.id, "pest", index),
                kind: ReminderKind::PestControl,
                date: control.date?,
                project: project_name.to_string(),
                details: format!("{} - {}", control.method, control.product),
            })
        });

    fertilizers.chain(pests)
}

fn sub_record_key(id: Option<&str>, planning_id: &str, kind: &str, index: usize) -> String {
    id.map_or_else(|| format!("{planning_id}:{kind}:{index}"), ToString::to_string)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::merge::merge;
    use crate::test_utils::{fertilizer, pest, planning_record, plantation_record, ymd};

    fn project_with(name: &str, planning: Option<Planning>) -> MergedProject {
        MergedProject {
            plantation: plantation_record(name, name, false),
            planning,
        }
    }

    #[test]
    fn test_aggregate_reminders_empty() {
        assert!(aggregate_reminders(&[]).is_empty());
        assert!(aggregate_reminders(&[project_with("a", None)]).is_empty());
    }

    #[test]
    fn test_only_flagged_entries_sorted_by_date() {
        let mut planning = planning_record("p1", "a");
        planning.fertilizer_schedules = vec![
            fertilizer("f1", Some(ymd(2025, 3, 1)), true),
            fertilizer("f2", Some(ymd(2025, 1, 1)), false),
        ];
        planning.pest_controls = vec![pest("c1", Some(ymd(2025, 2, 15)), true)];

        let tasks = aggregate_reminders(&[project_with("a", Some(planning))]);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].kind, ReminderKind::PestControl);
        assert_eq!(tasks[0].date, ymd(2025, 2, 15));
        assert_eq!(tasks[0].id, "c1");
        assert_eq!(tasks[1].kind, ReminderKind::Fertilizer);
        assert_eq!(tasks[1].date, ymd(2025, 3, 1));
        assert_eq!(tasks[1].id, "f1");
    }

    #[test]
    fn test_detail_strings_and_project_name() {
        let mut planning = planning_record("p1", "a");
        planning.fertilizer_schedules = vec![fertilizer("f1", Some(ymd(2025, 3, 1)), true)];
        planning.pest_controls = vec![pest("c1", Some(ymd(2025, 3, 2)), true)];
        let project = MergedProject {
            plantation: plantation_record("a", "North Ridge", false),
            planning: Some(planning),
        };

        let tasks = aggregate_reminders(&[project]);

        assert_eq!(tasks[0].details, "Urea (Broadcast)");
        assert_eq!(tasks[0].project, "North Ridge");
        assert_eq!(tasks[1].details, "Spraying - Neem oil");
        assert_eq!(tasks[1].project, "North Ridge");
    }

    #[test]
    fn test_uses_raw_entry_date_without_offset() {
        let mut planning = planning_record("p1", "a");
        planning.fertilizer_schedules = vec![fertilizer("f1", Some(ymd(2025, 3, 10)), true)];

        let tasks = aggregate_reminders(&[project_with("a", Some(planning))]);

        assert_eq!(tasks[0].date, ymd(2025, 3, 10));
    }

    #[test]
    fn test_entries_without_date_are_skipped() {
        let mut planning = planning_record("p1", "a");
        planning.fertilizer_schedules = vec![
            fertilizer("f1", None, true),
            fertilizer("f2", Some(ymd(2025, 5, 5)), true),
        ];
        planning.pest_controls = vec![pest("c1", None, true)];

        let tasks = aggregate_reminders(&[project_with("a", Some(planning))]);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "f2");
    }

    #[test]
    fn test_missing_sub_record_ids_get_positional_keys() {
        let mut planning = planning_record("p1", "a");
        let mut schedule = fertilizer("ignored", Some(ymd(2025, 5, 5)), true);
        schedule.id = None;
        let mut control = pest("ignored", Some(ymd(2025, 5, 6)), true);
        control.id = None;
        planning.fertilizer_schedules = vec![fertilizer("f0", None, false), schedule];
        planning.pest_controls = vec![control];

        let tasks = aggregate_reminders(&[project_with("a", Some(planning))]);

        assert_eq!(tasks[0].id, "p1:fertilizer:1");
        assert_eq!(tasks[1].id, "p1:pest:0");
    }

    #[test]
    fn test_same_day_tasks_keep_project_order() {
        let day = ymd(2025, 6, 1);
        let mut first = planning_record("p1", "a");
        first.pest_controls = vec![pest("a-pest", Some(day), true)];
        let mut second = planning_record("p2", "b");
        second.fertilizer_schedules = vec![fertilizer("b-fert", Some(day), true)];

        let tasks =
            aggregate_reminders(&[project_with("a", Some(first)), project_with("b", Some(second))]);

        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a-pest", "b-fert"]);
    }

    #[test]
    fn test_merge_then_aggregate_is_repeatable() {
        let plantations = vec![
            plantation_record("a", "Alpha", false),
            plantation_record("b", "Beta", false),
        ];
        let mut pa = planning_record("pa", "a");
        pa.fertilizer_schedules = vec![fertilizer("f1", Some(ymd(2025, 4, 1)), true)];
        let mut pb = planning_record("pb", "b");
        pb.pest_controls = vec![pest("c1", Some(ymd(2025, 3, 1)), true)];
        let plannings = vec![pa, pb];

        let first = aggregate_reminders(&merge(&plantations, &plannings));
        let second = aggregate_reminders(&merge(&plantations, &plannings));

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_reminder_serializes_with_wire_labels() {
        let task = ReminderTask {
            id: "c1".to_string(),
            kind: ReminderKind::PestControl,
            date: ymd(2025, 2, 15),
            project: "Alpha".to_string(),
            details: "Spraying - Neem oil".to_string(),
        };

        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["type"], "Pest Control");
        assert_eq!(value["date"], "2025-02-15");
    }
}
