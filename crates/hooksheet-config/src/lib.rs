//! Hooksheet configuration
//!
//! Layered settings for the cheat sheet viewer: defaults, user and project
//! files, an explicit file, environment variables and runtime overrides.

pub mod error;
pub mod sheet_config;

pub use error::{ConfigError, Result};
pub use sheet_config::{find_project_config, ConfigLayer, ConfigLoader, SheetConfig};
