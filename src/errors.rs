//! Unified error type for the planner.
//!
//! The pure planning computations never fail; everything here comes from the
//! store, the configuration layer, or malformed wire payloads.

use thiserror::Error;

/// All errors surfaced by the store, configuration, and dashboard shell.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Error bubbled up from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Malformed JSON payload or stored JSON column
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing rendered output failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Input rejected before it reached the store
    #[error("Invalid input: {message}")]
    Validation {
        /// Which field failed and why
        message: String,
    },

    /// No plantation with this id
    #[error("Plantation not found: {id}")]
    PlantationNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No planning with this id
    #[error("Planning not found: {id}")]
    PlanningNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// A plantation already has its planning
    #[error("Plantation {project_id} already has a planning")]
    DuplicatePlanning {
        /// The plantation the second planning was created for
        project_id: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
