//! Persisted form of a match.
//!
//! A [`Snapshot`] is the game id plus the current phase, which already holds
//! everything (RNG position included) needed to continue the match. Two
//! encodings are offered: compact `bincode` and human-readable JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::GameId;
use crate::phase::Phase;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised while encoding, decoding or storing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("binary snapshot error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("json snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("snapshot file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// A match frozen at one phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub game_id: GameId,
    pub phase: Phase,
}

impl Snapshot {
    #[must_use]
    pub fn new(game_id: GameId, phase: Phase) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            game_id,
            phase,
        }
    }

    fn checked(self) -> Result<Self, SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(self)
        } else {
            Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            })
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize::<Self>(bytes)?.checked()
    }

    /// Encode as pretty JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str::<Self>(json)?.checked()
    }

    /// Write the bincode encoding to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes()?).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read a bincode snapshot from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }
}
