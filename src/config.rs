//! Process configuration
//!
//! A YAML file names the dataset and the parameters of the fixed analytical
//! questions (thresholds, limits, featured actor names). The file path comes
//! from `CINEGRAPH_CONFIG`; every field has a default so the dashboard runs
//! without any file at all. `CINEGRAPH_DATASET` overrides the dataset path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path to the film dataset (JSON array of documents)
    pub dataset: PathBuf,
    /// Logical collection name, used only for logging
    pub collection: String,
    /// Actor whose co-stars, coworker films and recommendations are shown
    pub featured_actor: String,
    /// Endpoints of the shortest-path question
    pub path_from: String,
    pub path_to: String,
    /// How many films to keep per decade in the rating ranking
    pub top_per_decade: usize,
    /// "Prolific director" cutoff: strictly more films than this
    pub min_films_per_director: u64,
    /// Cap on genre-based recommendations
    pub recommendation_limit: usize,
    /// Thresholds of the score/revenue intersection filter
    pub metascore_threshold: f64,
    pub revenue_threshold: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/films.json"),
            collection: "films".to_string(),
            featured_actor: "Anne Hathaway".to_string(),
            path_from: "Anne Hathaway".to_string(),
            path_to: "Matthew McConaughey".to_string(),
            top_per_decade: 3,
            min_films_per_director: 5,
            recommendation_limit: 5,
            metascore_threshold: 80.0,
            revenue_threshold: 50.0,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration from the environment.
    ///
    /// `CINEGRAPH_CONFIG` points at a YAML file; without it the defaults
    /// apply. `CINEGRAPH_DATASET` overrides the dataset path either way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os("CINEGRAPH_CONFIG") {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(dataset) = std::env::var_os("CINEGRAPH_DATASET") {
            config.dataset = PathBuf::from(dataset);
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("dataset path is empty".to_string()));
        }
        if self.collection.is_empty() {
            return Err(ConfigError::Invalid("collection name is empty".to_string()));
        }
        if self.top_per_decade == 0 {
            return Err(ConfigError::Invalid(
                "top_per_decade must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
