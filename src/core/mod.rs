//! Core planning logic.
//!
//! `soil`, `harvest`, `merge`, `reminder`, and `report` are pure functions over plain
//! records. `plantation`, `planning`, and `snapshot` are the store operations that feed
//! them.

/// Harvest date projection
pub mod harvest;
/// Plantation/planning join
pub mod merge;
/// Planning store operations
pub mod planning;
/// Plantation store operations
pub mod plantation;
/// Reminder aggregation
pub mod reminder;
/// Dashboard metrics and summaries
pub mod report;
/// Concurrent snapshot loading
pub mod snapshot;
/// Soil quality scoring
pub mod soil;
