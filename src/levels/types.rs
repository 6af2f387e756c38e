//! Level definitions and per-level progress records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::constants::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SNAKE_LENGTH, MIN_SPEED_LEVEL,
    NORMAL_FOOD_COUNT,
};
use crate::core::{Difficulty, Direction, Point};
use crate::obstacles::Obstacle;
use crate::victory::VictoryCondition;

/// Board and starting parameters for a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Head position at the start of a run.
    pub snake_start: Point,
    pub snake_direction: Direction,
    pub initial_snake_length: u32,
    /// Food kept on the board at once.
    pub food_count: u32,
    pub default_difficulty: Difficulty,
    pub initial_speed: i32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            snake_start: Point::new(DEFAULT_GRID_WIDTH / 2, DEFAULT_GRID_HEIGHT / 2),
            snake_direction: Direction::Right,
            initial_snake_length: DEFAULT_SNAKE_LENGTH,
            food_count: NORMAL_FOOD_COUNT,
            default_difficulty: Difficulty::Medium,
            initial_speed: MIN_SPEED_LEVEL,
        }
    }
}

impl LevelSettings {
    /// Cells of the starting body, head first, extending away from the
    /// direction of travel.
    pub fn starting_body(&self) -> Vec<Point> {
        let back = self.snake_direction.opposite().delta();
        let cells = i64::from(self.grid_width.max(1)) * i64::from(self.grid_height.max(1));
        let length = i64::from(self.initial_snake_length.max(1)).min(cells);
        (0..i32::try_from(length).unwrap_or(i32::MAX))
            .map(|i| Point::new(self.snake_start.x + back.x * i, self.snake_start.y + back.y * i))
            .collect()
    }
}

/// A playable level. Treated as read-only while a run is in progress; the
/// engine works on its own copy of the obstacle list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level_number: u32,
    #[serde(default)]
    pub is_unlocked: bool,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub victory_condition: VictoryCondition,
    #[serde(default)]
    pub settings: LevelSettings,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    /// When non-empty, food always appears on exactly these cells.
    #[serde(default)]
    pub fixed_food_positions: Vec<Point>,
}

impl Level {
    pub fn new(id: impl Into<String>, name: impl Into<String>, level_number: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            level_number,
            is_unlocked: level_number <= 1,
            is_custom: false,
            victory_condition: VictoryCondition::default(),
            settings: LevelSettings::default(),
            obstacles: Vec::new(),
            fixed_food_positions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_settings(mut self, settings: LevelSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_victory_condition(mut self, condition: VictoryCondition) -> Self {
        self.victory_condition = condition;
        self
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_fixed_food(mut self, positions: Vec<Point>) -> Self {
        self.fixed_food_positions = positions;
        self
    }
}

/// Best results for one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCompletion {
    pub is_completed: bool,
    pub best_score: u32,
    /// Fastest clear in seconds.
    pub best_time: Option<u32>,
    pub completion_count: u32,
    /// Unix timestamp (seconds).
    pub last_completed_time: Option<i64>,
}

impl LevelCompletion {
    /// Records a clear. Returns `(new_best_score, new_best_time)`.
    pub fn record(&mut self, score: u32, time_seconds: u32, now: i64) -> (bool, bool) {
        let first = !self.is_completed;
        let new_best_score = first || score > self.best_score;
        let new_best_time = match self.best_time {
            Some(best) => time_seconds < best,
            None => true,
        };

        self.is_completed = true;
        self.best_score = self.best_score.max(score);
        if new_best_time {
            self.best_time = Some(time_seconds);
        }
        self.completion_count += 1;
        self.last_completed_time = Some(now);

        (new_best_score, new_best_time)
    }
}

/// Saved progress across all levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelProgression {
    /// Keyed by level id.
    pub completions: HashMap<String, LevelCompletion>,
    pub highest_unlocked_level: u32,
    /// Unix timestamp (seconds).
    pub last_played_time: Option<i64>,
}

impl Default for LevelProgression {
    fn default() -> Self {
        Self {
            completions: HashMap::new(),
            highest_unlocked_level: 1,
            last_played_time: None,
        }
    }
}

impl LevelProgression {
    pub fn completion(&self, level_id: &str) -> Option<&LevelCompletion> {
        self.completions.get(level_id)
    }

    pub fn is_completed(&self, level_id: &str) -> bool {
        self.completion(level_id).is_some_and(|c| c.is_completed)
    }

    pub fn is_unlocked(&self, level_number: u32) -> bool {
        level_number <= self.highest_unlocked_level
    }

    /// Raises the unlock frontier to `level_number`. Returns true if it moved.
    pub fn unlock_through(&mut self, level_number: u32) -> bool {
        if level_number > self.highest_unlocked_level {
            self.highest_unlocked_level = level_number;
            true
        } else {
            false
        }
    }

    pub fn completed_count(&self) -> usize {
        self.completions.values().filter(|c| c.is_completed).count()
    }
}
