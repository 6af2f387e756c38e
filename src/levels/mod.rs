//! Levels: definitions, storage, built-in presets and progression.

mod manager;
mod presets;
mod storage;
mod types;
mod validation;

pub use manager::{LevelCompletionOutcome, LevelManager};
pub use presets::builtin_levels;
pub use storage::{
    JsonLevelStore, LevelStore, MemoryLevelStore, CUSTOM_LEVELS_FILE, PRESETS_FILE,
    PROGRESSION_FILE,
};
pub use types::{Level, LevelCompletion, LevelProgression, LevelSettings};
pub use validation::validate_level;
