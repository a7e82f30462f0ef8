//! Filesystem data lake operations.
//!
//! JSONL is the source of truth for all entities. Data is partitioned by
//! team: `normalized/<team_id>/` holds that team's roster, games, points,
//! views, acknowledgments, and tags, while `normalized/teams.jsonl` is the
//! team index.

use std::path::PathBuf;
use thiserror::Error;

mod jsonl;

pub use jsonl::*;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0:?}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }

    /// Partition directory for a single team.
    pub fn team_dir(&self, team_id: &str) -> PathBuf {
        self.normalized_dir().join(team_id)
    }

    /// The global team index file.
    pub fn teams_path(&self) -> PathBuf {
        self.normalized_dir().join("teams.jsonl")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.normalized_dir(), PathBuf::from("/data/normalized"));
        assert_eq!(config.team_dir("t1"), PathBuf::from("/data/normalized/t1"));
        assert_eq!(
            config.teams_path(),
            PathBuf::from("/data/normalized/teams.jsonl")
        );
        assert_eq!(config.logs_dir(), PathBuf::from("/data/logs"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
