//! Level catalogue, unlock progression and victory tracking.

use std::io;
use std::sync::Arc;

use super::storage::LevelStore;
use super::types::{Level, LevelCompletion, LevelProgression};
use super::validation::validate_level;
use crate::engine::GameState;
use crate::victory::{VictoryCondition, VictoryConditionType};

/// What changed when a level was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelCompletionOutcome {
    pub new_best_score: bool,
    pub new_best_time: bool,
    /// Set when the unlock frontier moved, to the newly unlocked level number.
    pub unlocked_level: Option<u32>,
}

/// Owns cached level lists and the player's progression.
///
/// Lists are loaded once on construction; call [`LevelManager::reload`] to
/// pick up changes made behind the store's back.
pub struct LevelManager<S: LevelStore> {
    store: S,
    presets: Vec<Arc<Level>>,
    custom: Vec<Arc<Level>>,
    progression: LevelProgression,
    current_level: Option<Arc<Level>>,
}

impl<S: LevelStore> LevelManager<S> {
    pub fn new(store: S) -> Self {
        let mut manager = Self {
            store,
            presets: Vec::new(),
            custom: Vec::new(),
            progression: LevelProgression::default(),
            current_level: None,
        };
        manager.reload();
        manager
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reload(&mut self) {
        let mut presets = self.store.load_presets();
        presets.sort_by_key(|l| l.level_number);
        self.presets = presets.into_iter().map(Arc::new).collect();
        self.custom = self
            .store
            .load_custom_levels()
            .into_iter()
            .map(Arc::new)
            .collect();
        self.progression = self.store.load_progression();
        tracing::debug!(
            presets = self.presets.len(),
            custom = self.custom.len(),
            highest_unlocked = self.progression.highest_unlocked_level,
            "levels loaded"
        );
    }

    // ── Catalogue ─────────────────────────────────────────────────────

    /// Campaign levels in level-number order.
    pub fn preset_levels(&self) -> &[Arc<Level>] {
        &self.presets
    }

    pub fn custom_levels(&self) -> &[Arc<Level>] {
        &self.custom
    }

    /// Presets the player may start.
    pub fn unlocked_levels(&self) -> Vec<Arc<Level>> {
        self.presets
            .iter()
            .filter(|l| self.is_level_unlocked(l))
            .cloned()
            .collect()
    }

    pub fn find_level(&self, level_id: &str) -> Option<Arc<Level>> {
        self.presets
            .iter()
            .chain(self.custom.iter())
            .find(|l| l.id == level_id)
            .cloned()
    }

    /// Custom levels are always playable.
    pub fn is_level_unlocked(&self, level: &Level) -> bool {
        level.is_custom || level.is_unlocked || self.progression.is_unlocked(level.level_number)
    }

    // ── Current level ─────────────────────────────────────────────────

    pub fn current_level(&self) -> Option<&Arc<Level>> {
        self.current_level.as_ref()
    }

    pub fn set_current_level(&mut self, level: Option<Arc<Level>>) {
        self.current_level = level;
    }

    /// Makes an unlocked level current. `None` if unknown or locked.
    pub fn select_level(&mut self, level_id: &str) -> Option<Arc<Level>> {
        let level = self.find_level(level_id)?;
        if !self.is_level_unlocked(&level) {
            tracing::debug!(level_id, "level is locked");
            return None;
        }
        self.current_level = Some(level.clone());
        self.mark_played();
        Some(level)
    }

    /// The unlocked preset after the current one.
    pub fn next_level(&self) -> Option<Arc<Level>> {
        let current = self.current_level.as_ref()?;
        if current.is_custom {
            return None;
        }
        self.presets
            .iter()
            .find(|l| l.level_number == current.level_number + 1)
            .filter(|l| self.is_level_unlocked(l))
            .cloned()
    }

    // ── Progress ──────────────────────────────────────────────────────

    pub fn progression(&self) -> &LevelProgression {
        &self.progression
    }

    pub fn completion(&self, level_id: &str) -> Option<&LevelCompletion> {
        self.progression.completion(level_id)
    }

    /// Has the run met its level's goal? Uses the manager's current level,
    /// falling back to the one the engine is running.
    pub fn check_victory_condition(&self, state: &GameState) -> bool {
        match self.active_level(state) {
            Some(level) => level.victory_condition.check_condition(
                state,
                state.food_collected,
                state.total_food_spawned,
            ),
            None => false,
        }
    }

    /// Percentage towards the goal, `0..=100`. Combined goals average their
    /// active parts.
    pub fn level_progress(&self, state: &GameState) -> u32 {
        match self.active_level(state) {
            Some(level) => progress_towards(&level.victory_condition, state),
            None => 0,
        }
    }

    /// Records a clear for the active level. Returns `None` if there is no
    /// active level or this run was already recorded.
    pub fn complete_level(&mut self, state: &mut GameState) -> Option<LevelCompletionOutcome> {
        if state.is_level_completed {
            return None;
        }
        let level = self.active_level(state)?.clone();
        state.is_level_completed = true;

        let now = chrono::Utc::now().timestamp();
        let (new_best_score, new_best_time) = self
            .progression
            .completions
            .entry(level.id.clone())
            .or_default()
            .record(state.score, state.level_time, now);

        let unlocked_level = if level.is_custom {
            None
        } else {
            let next = level.level_number + 1;
            self.progression.unlock_through(next).then_some(next)
        };
        self.progression.last_played_time = Some(now);

        tracing::info!(
            level_id = %level.id,
            score = state.score,
            time = state.level_time,
            new_best_score,
            new_best_time,
            "level completed"
        );
        if let Some(next) = unlocked_level {
            tracing::info!(level_number = next, "level unlocked");
        }

        self.persist_progression();

        Some(LevelCompletionOutcome {
            new_best_score,
            new_best_time,
            unlocked_level,
        })
    }

    pub fn mark_played(&mut self) {
        self.progression.last_played_time = Some(chrono::Utc::now().timestamp());
        self.persist_progression();
    }

    pub fn reset_progression(&mut self) {
        self.progression = LevelProgression::default();
        self.persist_progression();
    }

    // ── Editor ────────────────────────────────────────────────────────

    /// Validates and stores a user level. A blank id gets a fresh uuid.
    pub fn save_custom_level(&mut self, mut level: Level) -> io::Result<Arc<Level>> {
        if level.id.trim().is_empty() {
            level.id = uuid::Uuid::new_v4().to_string();
        }
        level.is_custom = true;
        validate_level(&level).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        self.store.save_custom_level(&level)?;

        let level = Arc::new(level);
        match self.custom.iter_mut().find(|l| l.id == level.id) {
            Some(existing) => *existing = level.clone(),
            None => self.custom.push(level.clone()),
        }
        Ok(level)
    }

    pub fn delete_custom_level(&mut self, level_id: &str) -> io::Result<bool> {
        let removed = self.store.delete_custom_level(level_id)?;
        self.custom.retain(|l| l.id != level_id);
        if self.current_level.as_ref().is_some_and(|l| l.id == level_id) {
            self.current_level = None;
        }
        Ok(removed)
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn active_level<'a>(&'a self, state: &'a GameState) -> Option<&'a Arc<Level>> {
        self.current_level.as_ref().or(state.current_level.as_ref())
    }

    fn persist_progression(&mut self) {
        if let Err(e) = self.store.save_progression(&self.progression) {
            tracing::warn!(error = %e, "failed to save level progression");
        }
    }
}

fn percent(current: u64, target: u64) -> u32 {
    if target == 0 {
        return 100;
    }
    (current * 100 / target).min(100) as u32
}

fn food_percent(collected: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        percent(collected as u64, total as u64)
    }
}

fn progress_towards(condition: &VictoryCondition, state: &GameState) -> u32 {
    let score = || percent(state.score as u64, condition.target_score as u64);
    let length = || percent(state.snake_length() as u64, condition.target_length as u64);
    let food = || food_percent(state.food_collected, state.total_food_spawned);

    match condition.condition_type {
        VictoryConditionType::TargetScore => score(),
        VictoryConditionType::TargetLength => length(),
        VictoryConditionType::CollectAllFood => food(),
        VictoryConditionType::Combined => {
            let mut parts = Vec::with_capacity(3);
            if condition.target_score > 0 {
                parts.push(score());
            }
            if condition.target_length > 0 {
                parts.push(length());
            }
            if condition.must_collect_all_food {
                parts.push(food());
            }
            if parts.is_empty() {
                0
            } else {
                parts.iter().sum::<u32>() / parts.len() as u32
            }
        }
    }
}
