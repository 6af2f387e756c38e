//! Mutable per-session game state.

use std::sync::Arc;

use crate::collections::LinkedList;
use crate::core::{Difficulty, Direction, Point};
use crate::levels::Level;

/// Everything the renderer and the level manager read about a session.
/// The engine mutates it on every tick.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Body segments, head first.
    pub snake: LinkedList<Point>,
    pub foods: Vec<Point>,
    pub direction: Direction,
    pub score: u32,
    /// Speed tier in `[1, 10]`.
    pub speed_level: i32,
    pub difficulty: Difficulty,
    pub is_game_over: bool,
    pub is_paused: bool,
    pub is_waiting_to_start: bool,
    pub is_new_high_score: bool,

    // Level-scoped
    pub current_level: Option<Arc<Level>>,
    pub is_level_completed: bool,
    /// Whole seconds spent playing the current level.
    pub level_time: u32,
    pub food_collected: u32,
    pub total_food_spawned: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            snake: LinkedList::new(),
            foods: Vec::new(),
            direction: Direction::Right,
            score: 0,
            speed_level: 1,
            difficulty: Difficulty::Medium,
            is_game_over: false,
            is_paused: false,
            is_waiting_to_start: true,
            is_new_high_score: false,
            current_level: None,
            is_level_completed: false,
            level_time: 0,
            food_collected: 0,
            total_food_spawned: 0,
        }
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.front().copied()
    }

    pub fn snake_length(&self) -> usize {
        self.snake.len()
    }

    /// Running means started, not paused and not over.
    pub fn is_running(&self) -> bool {
        !self.is_waiting_to_start && !self.is_paused && !self.is_game_over
    }

    pub(crate) fn reset_level_counters(&mut self) {
        self.is_level_completed = false;
        self.level_time = 0;
        self.food_collected = 0;
        self.total_food_spawned = 0;
    }
}
