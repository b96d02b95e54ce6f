//! Abstract persisted-record storage
//!
//! The engine reads and writes two independent records: the high score (a
//! single non-negative integer) and the achievement/stat bundle. How those
//! records are actually stored is the host's business; the engine only sees
//! this trait. Load failures are always treated as "no prior data", never
//! propagated - the simulation must keep ticking with defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::progress::{AchievementId, Stats};

/// Storage-layer failure. Only the save path surfaces errors; callers log
/// and continue.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Unlock flag for a single achievement, as persisted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AchievementFlag {
    pub unlocked: bool,
}

/// The persisted achievement/stat record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressBundle {
    pub achievements: BTreeMap<AchievementId, AchievementFlag>,
    pub stats: Stats,
}

/// Two-record persisted store: high score and progress bundle.
pub trait ProgressStore {
    /// `None` means no prior record (missing or corrupt - both fine).
    fn load_progress(&self) -> Option<ProgressBundle>;
    fn save_progress(&mut self, bundle: &ProgressBundle) -> Result<(), StoreError>;
    fn load_high_score(&self) -> Option<u32>;
    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// In-memory store for tests and the headless demo.
#[derive(Debug, Default)]
pub struct MemoryStore {
    progress: Option<ProgressBundle>,
    high_score: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load_progress(&self) -> Option<ProgressBundle> {
        self.progress.clone()
    }

    fn save_progress(&mut self, bundle: &ProgressBundle) -> Result<(), StoreError> {
        self.progress = Some(bundle.clone());
        Ok(())
    }

    fn load_high_score(&self) -> Option<u32> {
        self.high_score
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.high_score = Some(score);
        Ok(())
    }
}

/// JSON-file store: `progress.json` and `highscore.json` under one directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn progress_path(&self) -> PathBuf {
        self.dir.join("progress.json")
    }

    fn high_score_path(&self) -> PathBuf {
        self.dir.join("highscore.json")
    }
}

impl ProgressStore for JsonFileStore {
    fn load_progress(&self) -> Option<ProgressBundle> {
        let json = fs::read_to_string(self.progress_path()).ok()?;
        match serde_json::from_str(&json) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                log::warn!("corrupt progress record, starting fresh: {e}");
                None
            }
        }
    }

    fn save_progress(&mut self, bundle: &ProgressBundle) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(bundle)?;
        fs::write(self.progress_path(), json)?;
        Ok(())
    }

    fn load_high_score(&self) -> Option<u32> {
        let json = fs::read_to_string(self.high_score_path()).ok()?;
        serde_json::from_str(&json).ok()
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.high_score_path(), score.to_string())?;
        Ok(())
    }
}

/// Convenience: is an id unlocked in a bundle?
impl ProgressBundle {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements
            .get(&id)
            .map(|f| f.unlocked)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load_progress().is_none());
        assert!(store.load_high_score().is_none());

        let mut bundle = ProgressBundle::default();
        bundle
            .achievements
            .insert(AchievementId::FirstJump, AchievementFlag { unlocked: true });
        bundle.stats.total_jumps = 7;
        store.save_progress(&bundle).unwrap();
        store.save_high_score(420).unwrap();

        let loaded = store.load_progress().unwrap();
        assert!(loaded.is_unlocked(AchievementId::FirstJump));
        assert_eq!(loaded.stats.total_jumps, 7);
        assert_eq!(store.load_high_score(), Some(420));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        let mut bundle = ProgressBundle::default();
        bundle.stats.total_dodges = 12;
        store.save_progress(&bundle).unwrap();
        store.save_high_score(99).unwrap();

        let store2 = JsonFileStore::new(dir.path());
        assert_eq!(store2.load_progress().unwrap().stats.total_dodges, 12);
        assert_eq!(store2.load_high_score(), Some(99));
    }

    #[test]
    fn test_file_store_corrupt_record_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("progress.json"), "{ nope").unwrap();
        fs::write(dir.path().join("highscore.json"), "not a number").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load_progress().is_none());
        assert!(store.load_high_score().is_none());
    }

    #[test]
    fn test_missing_dir_yields_none() {
        let store = JsonFileStore::new("/definitely/not/a/real/dir");
        assert!(store.load_progress().is_none());
        assert!(store.load_high_score().is_none());
    }
}
