//! Local fixture files for the command-line harness.
//!
//! The engine itself never touches the filesystem. The CLI reads
//! already-fetched data from a directory laid out as:
//! - `matches/<match_id>.jsonl`: one game per line, in play order
//! - `tournaments.jsonl`: tournament records
//! - `beatmaps.jsonl`: beatmap metadata for legacy comparisons

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::MatchId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record on line {line} of {path:?}: {source}")]
    Line {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
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

    pub fn matches_dir(&self) -> PathBuf {
        self.data_dir.join("matches")
    }

    pub fn match_path(&self, match_id: MatchId) -> PathBuf {
        self.matches_dir().join(format!("{}.jsonl", match_id))
    }

    pub fn tournaments_path(&self) -> PathBuf {
        self.data_dir.join("tournaments.jsonl")
    }

    pub fn beatmaps_path(&self) -> PathBuf {
        self.data_dir.join("beatmaps.jsonl")
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

        assert_eq!(config.matches_dir(), PathBuf::from("/data/matches"));
        assert_eq!(
            config.match_path(111_222_333),
            PathBuf::from("/data/matches/111222333.jsonl")
        );
        assert_eq!(
            config.tournaments_path(),
            PathBuf::from("/data/tournaments.jsonl")
        );
        assert_eq!(config.beatmaps_path(), PathBuf::from("/data/beatmaps.jsonl"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
