//! Application settings loaded from config.toml
//!
//! The file has an optional `[dashboard]` table controlling the refresh shell and an
//! optional list of `[[plantations]]` used to seed an empty store. Every key has a
//! default, so a missing file is not an error.

use crate::{
    core::{merge::CompletionFilter, plantation::NewPlantation},
    errors::{Error, Result},
    models::iso_date,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::{debug, info};

/// Default refresh period: five minutes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Default number of reminders rendered per refresh.
pub const DEFAULT_REMINDER_LIMIT: usize = 10;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Refresh shell settings
    #[serde(default)]
    pub dashboard: DashboardSettings,
    /// Plantations to seed on startup
    #[serde(default)]
    pub plantations: Vec<NewPlantation>,
}

/// Settings for the dashboard refresh loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Seconds between refreshes
    pub refresh_interval_secs: u64,
    /// Which plantations the dashboard shows
    pub filter: CompletionFilter,
    /// How many reminders to render
    pub reminder_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            filter: CompletionFilter::default(),
            reminder_limit: DEFAULT_REMINDER_LIMIT,
        }
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Reads a seed date written either as a bare TOML date (`2025-01-15`) or as a string.
///
/// Datetimes with a time of day or an offset are rejected.
pub(crate) fn seed_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<NaiveDate, D::Error> {
    use serde::de::Error as _;

    match toml::Value::deserialize(deserializer)? {
        toml::Value::Datetime(toml::value::Datetime {
            date: Some(date),
            time: None,
            offset: None,
        }) => NaiveDate::from_ymd_opt(
            i32::from(date.year),
            u32::from(date.month),
            u32::from(date.day),
        )
        .ok_or_else(|| D::Error::custom(format!("invalid date: {date}"))),
        toml::Value::String(raw) => iso_date::parse(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {raw}"))),
        other => Err(D::Error::custom(format!(
            "expected a date like 2025-01-15, got {other}"
        ))),
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A seed plantation is missing a required field
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {path:?}");
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path`, or the defaults when the file doesn't exist.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!("No config file at {path:?}; using defaults");
        Ok(Config::default())
    }
}
