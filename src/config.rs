use serde::Deserialize;
use std::time::Duration;

use crate::models::{Coordinate, InvalidCoordinate};

/// Allowed range for waiting on a device location fix
pub const MIN_LOCATION_TIMEOUT_SECS: u64 = 7;
pub const MAX_LOCATION_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid reference location: {0}")]
    InvalidReference(#[from] InvalidCoordinate),

    #[error("LOCATION_TIMEOUT_SECS must be between 7 and 10, got {0}")]
    LocationTimeout(u64),

    #[error("DEFAULT_RESULT_COUNT must be positive")]
    ResultCount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // City center used when the user's position is unknown
    #[serde(default = "default_reference_latitude")]
    pub reference_latitude: f64,

    #[serde(default = "default_reference_longitude")]
    pub reference_longitude: f64,

    // Number of nearest points returned when the client does not ask for k
    #[serde(default = "default_result_count")]
    pub default_result_count: usize,

    #[serde(default = "default_location_timeout_secs")]
    pub location_timeout_secs: u64,

    // Comma-separated list of user ids allowed into the admin inbox
    #[serde(default)]
    pub admin_user_ids: Vec<String>,

    // JSON catalog to load instead of the embedded one
    #[serde(default)]
    pub catalog_path: Option<String>,

    // Directory of the durable request store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reference_point()?;

        if !(MIN_LOCATION_TIMEOUT_SECS..=MAX_LOCATION_TIMEOUT_SECS)
            .contains(&self.location_timeout_secs)
        {
            return Err(ConfigError::LocationTimeout(self.location_timeout_secs));
        }

        if self.default_result_count == 0 {
            return Err(ConfigError::ResultCount);
        }

        Ok(())
    }

    pub fn reference_point(&self) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::new(self.reference_latitude, self.reference_longitude)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            reference_latitude: default_reference_latitude(),
            reference_longitude: default_reference_longitude(),
            default_result_count: default_result_count(),
            location_timeout_secs: default_location_timeout_secs(),
            admin_user_ids: Vec::new(),
            catalog_path: None,
            data_dir: default_data_dir(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_reference_latitude() -> f64 {
    44.6166
}

fn default_reference_longitude() -> f64 {
    33.5254
}

fn default_result_count() -> usize {
    5
}

fn default_location_timeout_secs() -> u64 {
    10
}

fn default_data_dir() -> String {
    "./data/store".to_string()
}
