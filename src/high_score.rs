//! Best score across all runs, kept in `high_score.json`.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::GameState;
use crate::utils::persistence::{load_json_or_default, save_json};

pub const HIGH_SCORE_FILE: &str = "high_score.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScore {
    pub score: u32,
    /// Unix timestamp (seconds) of the run that set it.
    pub achieved_at: Option<i64>,
}

impl HighScore {
    /// Missing or unreadable files count as no high score yet.
    pub fn load(dir: &Path) -> Self {
        load_json_or_default(&dir.join(HIGH_SCORE_FILE))
    }

    pub fn save(&self, dir: &Path) -> io::Result<()> {
        save_json(&dir.join(HIGH_SCORE_FILE), self)
    }

    /// Offers a finished run. Sets `is_new_high_score` and returns true if it
    /// beat the record.
    pub fn submit(&mut self, state: &mut GameState) -> bool {
        if state.score <= self.score {
            return false;
        }
        tracing::info!(previous = self.score, score = state.score, "new high score");
        self.score = state.score;
        self.achieved_at = Some(chrono::Utc::now().timestamp());
        state.is_new_high_score = true;
        true
    }
}
