//! Where level definitions and progression live between sessions.

use std::io;
use std::path::{Path, PathBuf};

use super::presets::builtin_levels;
use super::types::{Level, LevelProgression};
use crate::utils::persistence::{data_dir, load_json, load_json_or_default, save_json};

pub const PRESETS_FILE: &str = "presets.json";
pub const CUSTOM_LEVELS_FILE: &str = "custom_levels.json";
pub const PROGRESSION_FILE: &str = "progression.json";

/// Backing store for [`super::LevelManager`]. Loads never fail; they fall
/// back to defaults. Saves report I/O errors.
pub trait LevelStore {
    fn load_presets(&self) -> Vec<Level>;
    fn load_custom_levels(&self) -> Vec<Level>;
    /// Inserts or replaces by id.
    fn save_custom_level(&mut self, level: &Level) -> io::Result<()>;
    /// Returns false if no level had that id.
    fn delete_custom_level(&mut self, level_id: &str) -> io::Result<bool>;
    fn load_progression(&self) -> LevelProgression;
    fn save_progression(&mut self, progression: &LevelProgression) -> io::Result<()>;
}

/// JSON files under a root directory (`~/.serpent/` by default).
#[derive(Debug, Clone)]
pub struct JsonLevelStore {
    root: PathBuf,
}

impl JsonLevelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted in the user's data directory.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(data_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Strict read for read-modify-write: a corrupt file is an error, not
    /// an empty list.
    fn read_custom_levels(&self) -> io::Result<Vec<Level>> {
        Ok(load_json::<Vec<Level>>(&self.path(CUSTOM_LEVELS_FILE))?.unwrap_or_default())
    }

    fn write_custom_levels(&self, levels: &[Level]) -> io::Result<()> {
        save_json(&self.path(CUSTOM_LEVELS_FILE), &levels)
    }
}

impl LevelStore for JsonLevelStore {
    fn load_presets(&self) -> Vec<Level> {
        let path = self.path(PRESETS_FILE);
        match load_json::<Vec<Level>>(&path) {
            Ok(Some(levels)) if !levels.is_empty() => levels,
            Ok(_) => builtin_levels(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "bad preset file, using built-in levels");
                builtin_levels()
            }
        }
    }

    fn load_custom_levels(&self) -> Vec<Level> {
        load_json_or_default(&self.path(CUSTOM_LEVELS_FILE))
    }

    fn save_custom_level(&mut self, level: &Level) -> io::Result<()> {
        let mut levels = self.read_custom_levels()?;
        match levels.iter_mut().find(|l| l.id == level.id) {
            Some(existing) => *existing = level.clone(),
            None => levels.push(level.clone()),
        }
        self.write_custom_levels(&levels)
    }

    fn delete_custom_level(&mut self, level_id: &str) -> io::Result<bool> {
        let mut levels = self.read_custom_levels()?;
        let before = levels.len();
        levels.retain(|l| l.id != level_id);
        if levels.len() == before {
            return Ok(false);
        }
        self.write_custom_levels(&levels)?;
        Ok(true)
    }

    fn load_progression(&self) -> LevelProgression {
        load_json_or_default(&self.path(PROGRESSION_FILE))
    }

    fn save_progression(&mut self, progression: &LevelProgression) -> io::Result<()> {
        save_json(&self.path(PROGRESSION_FILE), progression)
    }
}

/// In-process store. Starts with the built-in presets.
#[derive(Debug, Clone)]
pub struct MemoryLevelStore {
    presets: Vec<Level>,
    custom: Vec<Level>,
    progression: LevelProgression,
}

impl Default for MemoryLevelStore {
    fn default() -> Self {
        Self::with_presets(builtin_levels())
    }
}

impl MemoryLevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presets(presets: Vec<Level>) -> Self {
        Self {
            presets,
            custom: Vec::new(),
            progression: LevelProgression::default(),
        }
    }

    pub fn progression(&self) -> &LevelProgression {
        &self.progression
    }
}

impl LevelStore for MemoryLevelStore {
    fn load_presets(&self) -> Vec<Level> {
        self.presets.clone()
    }

    fn load_custom_levels(&self) -> Vec<Level> {
        self.custom.clone()
    }

    fn save_custom_level(&mut self, level: &Level) -> io::Result<()> {
        match self.custom.iter_mut().find(|l| l.id == level.id) {
            Some(existing) => *existing = level.clone(),
            None => self.custom.push(level.clone()),
        }
        Ok(())
    }

    fn delete_custom_level(&mut self, level_id: &str) -> io::Result<bool> {
        let before = self.custom.len();
        self.custom.retain(|l| l.id != level_id);
        Ok(self.custom.len() != before)
    }

    fn load_progression(&self) -> LevelProgression {
        self.progression.clone()
    }

    fn save_progression(&mut self, progression: &LevelProgression) -> io::Result<()> {
        self.progression = progression.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_preset_file_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLevelStore::new(dir.path());
        assert_eq!(store.load_presets(), builtin_levels());
    }

    #[test]
    fn test_corrupt_preset_file_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PRESETS_FILE), "[{").unwrap();
        let store = JsonLevelStore::new(dir.path());
        assert_eq!(store.load_presets().len(), builtin_levels().len());
    }

    #[test]
    fn test_preset_file_overrides_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let only = vec![Level::new("solo", "Solo", 1)];
        save_json(&dir.path().join(PRESETS_FILE), &only).unwrap();
        let store = JsonLevelStore::new(dir.path());
        assert_eq!(store.load_presets(), only);
    }

    #[test]
    fn test_custom_level_upsert_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonLevelStore::new(dir.path());
        let mut level = Level::new("c1", "Mine", 0);
        store.save_custom_level(&level).unwrap();
        level.name = "Mine v2".to_string();
        store.save_custom_level(&level).unwrap();

        let loaded = store.load_custom_levels();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Mine v2");

        assert!(store.delete_custom_level("c1").unwrap());
        assert!(!store.delete_custom_level("c1").unwrap());
        assert!(store.load_custom_levels().is_empty());
    }

    #[test]
    fn test_corrupt_custom_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonLevelStore::new(dir.path());
        store.save_custom_level(&Level::new("a", "A", 0)).unwrap();

        let path = dir.path().join(CUSTOM_LEVELS_FILE);
        let mut damaged = fs::read_to_string(&path).unwrap();
        damaged.push('x');
        fs::write(&path, &damaged).unwrap();

        let err = store.save_custom_level(&Level::new("b", "B", 0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = store.delete_custom_level("a").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(fs::read_to_string(&path).unwrap(), damaged);

        // Plain loads still degrade to an empty list.
        assert!(store.load_custom_levels().is_empty());
    }

    #[test]
    fn test_progression_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonLevelStore::new(dir.path());
        let mut progression = LevelProgression::default();
        progression.unlock_through(4);
        store.save_progression(&progression).unwrap();

        let reopened = JsonLevelStore::new(dir.path());
        assert_eq!(reopened.load_progression().highest_unlocked_level, 4);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryLevelStore::new();
        assert!(!store.load_presets().is_empty());
        store.save_custom_level(&Level::new("x", "X", 0)).unwrap();
        assert_eq!(store.load_custom_levels().len(), 1);
        assert!(store.delete_custom_level("x").unwrap());
        assert!(!store.delete_custom_level("x").unwrap());
    }
}
