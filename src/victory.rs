//! Level victory conditions.

use serde::{Deserialize, Serialize};

use crate::engine::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryConditionType {
    TargetScore,
    TargetLength,
    CollectAllFood,
    Combined,
}

/// What the player has to achieve to clear a level.
///
/// In `Combined` mode a zero target (or `false` for the food flag) switches
/// that criterion off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryCondition {
    #[serde(rename = "type")]
    pub condition_type: VictoryConditionType,
    #[serde(default)]
    pub target_score: u32,
    #[serde(default)]
    pub target_length: u32,
    #[serde(default)]
    pub must_collect_all_food: bool,
    /// Upper bound on how much food the level spawns in total.
    #[serde(default)]
    pub food_spawn_count: Option<u32>,
}

impl Default for VictoryCondition {
    fn default() -> Self {
        Self::target_score(100)
    }
}

impl VictoryCondition {
    pub fn target_score(score: u32) -> Self {
        Self {
            condition_type: VictoryConditionType::TargetScore,
            target_score: score,
            target_length: 0,
            must_collect_all_food: false,
            food_spawn_count: None,
        }
    }

    pub fn target_length(length: u32) -> Self {
        Self {
            condition_type: VictoryConditionType::TargetLength,
            target_length: length,
            ..Self::target_score(0)
        }
    }

    pub fn collect_all_food(food_spawn_count: Option<u32>) -> Self {
        Self {
            condition_type: VictoryConditionType::CollectAllFood,
            must_collect_all_food: true,
            food_spawn_count,
            ..Self::target_score(0)
        }
    }

    pub fn combined(target_score: u32, target_length: u32, must_collect_all_food: bool) -> Self {
        Self {
            condition_type: VictoryConditionType::Combined,
            target_score,
            target_length,
            must_collect_all_food,
            food_spawn_count: None,
        }
    }

    pub fn with_food_spawn_count(mut self, count: u32) -> Self {
        self.food_spawn_count = Some(count);
        self
    }

    /// True when clearing the level means eating every spawned food. Such
    /// levels ignore `food_spawn_count` when spawning.
    pub fn requires_all_food(&self) -> bool {
        match self.condition_type {
            VictoryConditionType::CollectAllFood => true,
            VictoryConditionType::Combined => self.must_collect_all_food,
            _ => false,
        }
    }

    pub fn check_condition(
        &self,
        state: &GameState,
        food_collected: u32,
        total_food_spawned: u32,
    ) -> bool {
        match self.condition_type {
            VictoryConditionType::TargetScore => self.score_met(state),
            VictoryConditionType::TargetLength => self.length_met(state),
            VictoryConditionType::CollectAllFood => {
                self.must_collect_all_food && all_food_met(food_collected, total_food_spawned)
            }
            VictoryConditionType::Combined => {
                let score_ok = self.target_score == 0 || self.score_met(state);
                let length_ok = self.target_length == 0 || self.length_met(state);
                let food_ok = !self.must_collect_all_food
                    || all_food_met(food_collected, total_food_spawned);
                score_ok && length_ok && food_ok
            }
        }
    }

    pub fn description(&self) -> String {
        match self.condition_type {
            VictoryConditionType::TargetScore => format!("Reach {} points", self.target_score),
            VictoryConditionType::TargetLength => {
                format!("Grow to length {}", self.target_length)
            }
            VictoryConditionType::CollectAllFood => match self.food_spawn_count {
                Some(count) => format!("Collect all {} food", count),
                None => "Collect all food".to_string(),
            },
            VictoryConditionType::Combined => {
                let mut parts = Vec::new();
                if self.target_score > 0 {
                    parts.push(format!("reach {} points", self.target_score));
                }
                if self.target_length > 0 {
                    parts.push(format!("grow to length {}", self.target_length));
                }
                if self.must_collect_all_food {
                    parts.push("collect all food".to_string());
                }
                if parts.is_empty() {
                    "Complete the level".to_string()
                } else {
                    parts.join(", ")
                }
            }
        }
    }

    fn score_met(&self, state: &GameState) -> bool {
        state.score >= self.target_score
    }

    fn length_met(&self, state: &GameState) -> bool {
        state.snake.len() >= self.target_length as usize
    }
}

/// Nothing spawned yet never counts as "all collected".
fn all_food_met(food_collected: u32, total_food_spawned: u32) -> bool {
    total_food_spawned > 0 && food_collected >= total_food_spawned
}
