/// Database connection and table creation
pub mod database;

/// Dashboard settings and seed plantations from config.toml
pub mod settings;
