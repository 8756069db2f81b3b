//! Configuration for the cheat sheet
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following priority order (highest to lowest):
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`HOOKSHEET_*`)
//! 3. Explicit config file (`--config PATH`)
//! 4. Project-level config (`.hooksheet/config.{yaml,json,toml}`, searched upwards)
//! 5. User-level config (`<config dir>/hooksheet/config.{yaml,json,toml}`)
//! 6. Built-in defaults
//!
//! # Configuration File Format
//!
//! ```yaml
//! copy_ack_ms: 1500
//! tick_ms: 100
//! mouse: true
//! show_numbers: true
//! log_level: info
//! catalog: ~/cheatsheets/rust.yaml
//! ```
//!
//! Every key is optional; a file only overrides the keys it sets. A relative
//! `catalog` is resolved against the directory of the file that sets it, and
//! a leading `~` expands to the home directory.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

const APP_DIR: &str = "hooksheet";
const PROJECT_DIR: &str = ".hooksheet";
const CONFIG_STEMS: [&str; 4] = ["config.yaml", "config.yml", "config.json", "config.toml"];
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Cheat sheet configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetConfig {
    /// How long the "copied" acknowledgment stays visible, in milliseconds
    pub copy_ack_ms: u64,
    /// Event loop tick interval in milliseconds
    pub tick_ms: u64,
    /// Enable mouse capture
    pub mouse: bool,
    /// Catalog file replacing the built-in catalog
    pub catalog: Option<PathBuf>,
    /// Show two-digit card numbers
    pub show_numbers: bool,
    /// Default tracing level
    pub log_level: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            copy_ack_ms: 1500,
            tick_ms: 100,
            mouse: true,
            catalog: None,
            show_numbers: true,
            log_level: "info".to_string(),
        }
    }
}

/// A partial configuration; `None` leaves the lower layer untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub copy_ack_ms: Option<u64>,
    pub tick_ms: Option<u64>,
    pub mouse: Option<bool>,
    pub catalog: Option<PathBuf>,
    pub show_numbers: Option<bool>,
    pub log_level: Option<String>,
}

impl ConfigLayer {
    /// Read a layer from a YAML, JSON or TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        let mut layer: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                ConfigError::Parse(format!("Failed to parse YAML config {}: {}", path.display(), e))
            })?,
            Some("json") => serde_json::from_str(&content).map_err(|e| {
                ConfigError::Parse(format!("Failed to parse JSON config {}: {}", path.display(), e))
            })?,
            Some("toml") => toml::from_str(&content).map_err(|e| {
                ConfigError::Parse(format!("Failed to parse TOML config {}: {}", path.display(), e))
            })?,
            _ => {
                return Err(ConfigError::Parse(format!(
                    "Unsupported config format: {}",
                    path.display()
                )))
            }
        };

        // relative catalog paths belong to the file that names them
        if let Some(catalog) = layer.catalog.take() {
            layer.catalog = Some(resolve_path(catalog, path.parent()));
        }

        tracing::debug!("Loaded config layer from {}", path.display());
        Ok(layer)
    }

    /// Read a layer from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read a layer from `HOOKSHEET_*` variables through a lookup function
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layer = Self::default();

        if let Some(value) = lookup("HOOKSHEET_COPY_ACK_MS") {
            layer.copy_ack_ms = Some(parse_var("HOOKSHEET_COPY_ACK_MS", &value)?);
        }

        if let Some(value) = lookup("HOOKSHEET_MOUSE") {
            layer.mouse = Some(parse_var("HOOKSHEET_MOUSE", &value)?);
        }

        if let Some(value) = lookup("HOOKSHEET_CATALOG") {
            if !value.trim().is_empty() {
                layer.catalog = Some(resolve_path(PathBuf::from(value), None));
            }
        }

        if let Some(value) = lookup("HOOKSHEET_LOG_LEVEL") {
            layer.log_level = Some(value.trim().to_lowercase());
        }

        Ok(layer)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Expand a leading `~` and anchor a relative path at `base`
fn resolve_path(path: PathBuf, base: Option<&Path>) -> PathBuf {
    let path = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path,
        },
        Err(_) => path,
    };

    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("Invalid value for {name}: {value:?}")))
}

impl SheetConfig {
    /// Apply a layer on top of this configuration
    pub fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(copy_ack_ms) = layer.copy_ack_ms {
            self.copy_ack_ms = copy_ack_ms;
        }
        if let Some(tick_ms) = layer.tick_ms {
            self.tick_ms = tick_ms;
        }
        if let Some(mouse) = layer.mouse {
            self.mouse = mouse;
        }
        if layer.catalog.is_some() {
            self.catalog = layer.catalog;
        }
        if let Some(show_numbers) = layer.show_numbers {
            self.show_numbers = show_numbers;
        }
        if let Some(log_level) = layer.log_level {
            self.log_level = log_level.trim().to_lowercase();
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.copy_ack_ms == 0 {
            return Err(ConfigError::Validation(
                "copy_ack_ms must be greater than 0".to_string(),
            ));
        }

        if self.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "tick_ms must be greater than 0".to_string(),
            ));
        }

        // A tick longer than the acknowledgment would skip its revert
        if self.tick_ms > self.copy_ack_ms {
            return Err(ConfigError::Validation(format!(
                "tick_ms ({}) must not exceed copy_ack_ms ({})",
                self.tick_ms, self.copy_ack_ms
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown log level {:?}, expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    pub fn copy_ack_duration(&self) -> Duration {
        Duration::from_millis(self.copy_ack_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Directory holding the user-level config
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    }

    /// Default log file location
    pub fn default_log_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("hooksheet.log")
    }
}

/// First existing config file inside a directory
fn config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_STEMS
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Search `.hooksheet/` upwards from `start`
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if let Some(path) = config_file_in(&current.join(PROJECT_DIR)) {
            return Some(path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Builds a [`SheetConfig`] from every configuration source
///
/// Sources default to the real user directory, current directory and process
/// environment; each can be replaced for tests.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_dir: Option<PathBuf>,
    project_start: Option<PathBuf>,
    explicit: Option<PathBuf>,
    use_env: bool,
    overrides: ConfigLayer,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            user_dir: SheetConfig::user_config_dir(),
            project_start: std::env::current_dir().ok(),
            explicit: None,
            use_env: true,
            overrides: ConfigLayer::default(),
        }
    }

    /// Replace the user config directory (`None` disables the user layer)
    pub fn user_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_dir = dir;
        self
    }

    /// Replace the directory the project search starts from
    pub fn project_start(mut self, dir: Option<PathBuf>) -> Self {
        self.project_start = dir;
        self
    }

    /// Load an explicit config file on top of user and project files
    pub fn explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn use_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    /// Runtime overrides, applied last
    pub fn overrides(mut self, overrides: ConfigLayer) -> Self {
        self.overrides = overrides;
        self
    }

    /// Merge all layers and validate the result
    pub fn load(&self) -> Result<SheetConfig> {
        let mut config = SheetConfig::default();

        if let Some(path) = self.user_dir.as_deref().and_then(config_file_in) {
            config = config.merge(ConfigLayer::from_file(&path)?);
        }

        if let Some(path) = self.project_start.as_deref().and_then(find_project_config) {
            config = config.merge(ConfigLayer::from_file(&path)?);
        }

        if let Some(path) = &self.explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            config = config.merge(ConfigLayer::from_file(path)?);
        }

        if self.use_env {
            config = config.merge(ConfigLayer::from_env()?);
        }

        config = config.merge(self.overrides.clone());

        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }
}
