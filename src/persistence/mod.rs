//! High score persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Write to a temp file, then rename over the save (old save kept as backup)
//! - Corrupt primary falls back to the backup
//!
//! Stores never surface failures to the simulation: problems are logged and
//! the game keeps running with what it has.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current envelope format version
pub const SAVE_VERSION: u32 = 1;

/// Errors from reading or writing persisted data
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
    UnsupportedVersion { found: u32 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "malformed save data: {e}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported save version: {found} (expected {SAVE_VERSION})")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Where the best score lives between runs
pub trait HighScoreStore {
    /// Best score recorded so far (0 if none)
    fn load_high_score(&self) -> u64;

    /// Record a new best score. Failures are handled by the store.
    fn save_high_score(&mut self, score: u64);
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: u64,
    /// Number of saves received
    pub saves: usize,
}

impl MemoryStore {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> u64 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u64) {
        self.high_score = score;
        self.saves += 1;
    }
}

/// On-disk envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    high_score: u64,
}

/// JSON file store with backup rotation
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        self.path.with_extension("bak")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn read_envelope(path: &Path) -> Result<SaveEnvelope, StoreError> {
        let json = fs::read_to_string(path)?;
        let envelope: SaveEnvelope = serde_json::from_str(&json)?;
        if envelope.version != SAVE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: envelope.version,
            });
        }
        Ok(envelope)
    }

    /// Load the high score, trying the backup if the primary is unreadable
    pub fn try_load(&self) -> Result<u64, StoreError> {
        match Self::read_envelope(&self.path) {
            Ok(envelope) => Ok(envelope.high_score),
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                match Self::read_envelope(&self.backup_path()) {
                    Ok(envelope) => Ok(envelope.high_score),
                    Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(0),
                    Err(e) => Err(e),
                }
            }
            Err(primary) => {
                log::warn!("High score file {:?} unreadable: {}", self.path, primary);
                Self::read_envelope(&self.backup_path())
                    .map(|envelope| envelope.high_score)
                    .map_err(|_| primary)
            }
        }
    }

    /// Write the high score: tmp → save, old save → backup
    pub fn try_save(&self, high_score: u64) -> Result<(), StoreError> {
        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            high_score,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path())?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> u64 {
        match self.try_load() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(e) => {
                log::warn!("Could not load high score, starting fresh: {}", e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) {
        match self.try_save(score) {
            Ok(()) => log::debug!("High score {} saved to {:?}", score, self.path),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
    }
}
