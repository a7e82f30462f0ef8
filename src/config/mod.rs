//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::ScoreWeights;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Engagement score weighting.
///
/// The 60/40 acknowledgment/completion split is a product decision; this
/// is the one place it can be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementConfig {
    #[serde(default = "default_ack_weight")]
    pub ack_weight: f64,

    #[serde(default = "default_completion_weight")]
    pub completion_weight: f64,
}

fn default_ack_weight() -> f64 {
    0.6
}

fn default_completion_weight() -> f64 {
    0.4
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            ack_weight: default_ack_weight(),
            completion_weight: default_completion_weight(),
        }
    }
}

impl EngagementConfig {
    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            ack: self.ack_weight,
            completion: self.completion_weight,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub engagement: EngagementConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            engagement: EngagementConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.engagement;
        if !(0.0..=1.0).contains(&e.ack_weight) || !(0.0..=1.0).contains(&e.completion_weight) {
            return Err(ConfigError::ValidationError(
                "Engagement weights must be in [0, 1]".to_string(),
            ));
        }
        if (e.ack_weight + e.completion_weight - 1.0).abs() > 1e-9 {
            return Err(ConfigError::ValidationError(
                "Engagement weights must sum to 1.0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.engagement.ack_weight, 0.6);
        assert_eq!(config.engagement.completion_weight, 0.4);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_weights() {
        let mut config = AppConfig::default();
        config.engagement.ack_weight = 0.9;
        // 0.9 + 0.4 != 1.0
        assert!(config.validate().is_err());

        config.engagement.ack_weight = 1.5;
        config.engagement.completion_weight = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_weights_conversion() {
        let config = EngagementConfig::default();
        let w = config.weights();
        assert_eq!(w.ack, 0.6);
        assert_eq!(w.completion, 0.4);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.engagement.ack_weight, parsed.engagement.ack_weight);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: AppConfig = toml::from_str("log_level = \"debug\"").unwrap();
        assert_eq!(parsed.log_level, "debug");
        assert_eq!(parsed.engagement.ack_weight, 0.6);
        assert_eq!(parsed.server.port, 8080);
    }
}
