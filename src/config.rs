use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::fileio::DELIMITER;

/// File used by Save/Load when no other path is configured
pub const DEFAULT_DATA_FILE: &str = "seats.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// One entry of the seat catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub price: u64,
    pub capacity: usize,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, price: u64, capacity: usize) -> Self {
        Self { name: name.into(), price, capacity }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("VIP", 1000, 100),
        CategorySpec::new("Economy", 500, 400),
    ]
}

/// Startup configuration. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            categories: default_categories(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Category names end up in the seat file, so they must survive a round trip
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid("at least one category is required".to_string()));
        }

        let mut seen = HashSet::new();
        for spec in &self.categories {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::Invalid("category name cannot be empty".to_string()));
            }
            // the menu trims what the user types, so a padded name could never be matched
            if spec.name != spec.name.trim() {
                return Err(ConfigError::Invalid(format!(
                    "category name '{}' has leading or trailing whitespace",
                    spec.name
                )));
            }
            if spec.name.contains(DELIMITER as char) || spec.name.contains(['\n', '\r']) {
                return Err(ConfigError::Invalid(format!(
                    "category name '{}' contains a delimiter or line break",
                    spec.name
                )));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate category '{}'", spec.name)));
            }
        }
        Ok(())
    }
}
