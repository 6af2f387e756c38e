//! Tick-driven simulation: movement, collisions, food and obstacle effects.
//!
//! The driver calls, once per tick and in this order:
//! [`GameEngine::move_snake`], [`GameEngine::check_collisions`],
//! [`GameEngine::update_dynamic_obstacles`]. [`GameEngine::update_level_time`]
//! is called once per second by a separate ticker. The engine does not gate
//! movement on `is_paused`; a paused driver simply stops ticking.

use std::sync::Arc;

use super::state::GameState;
use crate::core::constants::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, EASY_FOOD_COUNT, FOOD_SPAWN_ATTEMPTS_PER_FOOD,
    HARD_BASE_INTERVAL_MS, MAX_SPEED_LEVEL, MIN_INTERVAL_MS, MIN_SPEED_LEVEL,
    NORMAL_BASE_INTERVAL_MS, NORMAL_FOOD_COUNT, SPEED_INTERVAL_REDUCTION_MS,
};
use crate::core::{Difficulty, Direction, Point, RandomSource, RngSource, SystemClock, TimeSource};
use crate::levels::{Level, LevelSettings};
use crate::obstacles::Obstacle;

/// Owns a session's [`GameState`] and the working copy of the level's
/// obstacles, and advances both one tick at a time.
pub struct GameEngine {
    state: GameState,
    obstacles: Vec<Obstacle>,
    random: Box<dyn RandomSource>,
    clock: Box<dyn TimeSource>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Box::new(RngSource::from_entropy()), Box::new(SystemClock))
    }
}

impl GameEngine {
    pub fn new(random: Box<dyn RandomSource>, clock: Box<dyn TimeSource>) -> Self {
        Self {
            state: GameState::new(),
            obstacles: Vec::new(),
            random,
            clock,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// The live obstacle set, after any removals this run.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// `(width, height)` of the active grid.
    pub fn grid_size(&self) -> (i32, i32) {
        match &self.state.current_level {
            Some(level) => (level.settings.grid_width, level.settings.grid_height),
            None => (DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
        }
    }

    pub fn base_points(&self) -> u32 {
        self.state.difficulty.base_points()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────

    /// Makes `level` active and resets level-scoped counters. Call
    /// [`GameEngine::initialize`] afterwards to lay out the board.
    pub fn set_level(&mut self, level: Arc<Level>) {
        tracing::info!(level_id = %level.id, name = %level.name, "level set");
        self.state.current_level = Some(level);
        self.reset_obstacles();
        self.state.reset_level_counters();
    }

    /// Resets the board for a fresh run, ready to start.
    pub fn initialize(&mut self) {
        let body = match self.state.current_level.clone() {
            Some(level) => {
                let settings = &level.settings;
                self.state.speed_level = settings
                    .initial_speed
                    .clamp(MIN_SPEED_LEVEL, MAX_SPEED_LEVEL);
                self.state.difficulty = settings.default_difficulty;
                self.state.direction = settings.snake_direction;
                self.reset_obstacles();
                self.state.reset_level_counters();
                settings.starting_body()
            }
            None => {
                let defaults = LevelSettings::default();
                self.state.direction = defaults.snake_direction;
                defaults.starting_body()
            }
        };

        self.state.snake.clear();
        self.state.snake.extend(body);

        self.state.score = 0;
        self.state.is_game_over = false;
        self.state.is_paused = false;
        self.state.is_waiting_to_start = true;
        self.state.is_new_high_score = false;

        self.state.foods.clear();
        self.spawn_food();
    }

    /// Leaves the waiting screen. From game over, starts a fresh run.
    pub fn start_game(&mut self) {
        if !self.state.is_waiting_to_start && !self.state.is_game_over {
            return;
        }
        if self.state.is_game_over {
            self.initialize();
        }
        self.state.is_waiting_to_start = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.state.is_game_over || self.state.is_waiting_to_start {
            return;
        }
        self.state.is_paused = !self.state.is_paused;
    }

    /// Rejected while waiting to start, after game over, or for a 180° turn.
    pub fn try_change_direction(&mut self, direction: Direction) -> bool {
        if self.state.is_waiting_to_start || self.state.is_game_over {
            return false;
        }
        if direction == self.state.direction.opposite() {
            return false;
        }
        self.state.direction = direction;
        true
    }

    // ── Per tick ──────────────────────────────────────────────────────

    /// Steps the snake one cell. A predicted collision ends the game and
    /// leaves the body exactly where it was.
    pub fn move_snake(&mut self) {
        if self.state.is_game_over {
            return;
        }
        let Some(head) = self.state.head() else {
            return;
        };
        let new_head = head + self.state.direction.delta();

        if self.will_collide(new_head) {
            tracing::debug!(x = new_head.x, y = new_head.y, score = self.state.score, "snake crashed");
            self.state.is_game_over = true;
            return;
        }

        self.state.snake.push_front(new_head);

        match self.state.foods.iter().rposition(|&f| f == new_head) {
            Some(index) => {
                let points = self.base_points() + self.state.speed_level.max(0) as u32;
                self.state.score += points;
                self.state.foods.remove(index);
                self.state.food_collected += 1;
                tracing::debug!(x = new_head.x, y = new_head.y, points, score = self.state.score, "food eaten");
                self.spawn_food();
            }
            None => {
                self.state.snake.pop_back();
                if self.fixed_food_missing() {
                    self.spawn_food();
                }
            }
        }
    }

    /// Re-validates the current head and applies obstacle effects.
    pub fn check_collisions(&mut self) {
        if self.state.is_game_over {
            return;
        }
        let Some(head) = self.state.head() else {
            return;
        };
        let (width, height) = self.grid_size();

        if !head.in_bounds(width, height) {
            tracing::debug!(x = head.x, y = head.y, "head outside grid");
            self.state.is_game_over = true;
            return;
        }
        if self.state.snake.iter().skip(1).any(|&segment| segment == head) {
            tracing::debug!(x = head.x, y = head.y, "head overlaps body");
            self.state.is_game_over = true;
            return;
        }

        self.resolve_obstacle_collisions(head);
    }

    pub fn update_dynamic_obstacles(&mut self) {
        let now = self.clock.now_millis();
        let (width, height) = self.grid_size();
        for obstacle in &mut self.obstacles {
            obstacle.update(width, height, now);
        }
    }

    /// Adds one second of level time while a level run is in progress.
    pub fn update_level_time(&mut self) {
        if self.state.current_level.is_some()
            && !self.state.is_paused
            && !self.state.is_waiting_to_start
            && !self.state.is_game_over
        {
            self.state.level_time += 1;
        }
    }

    /// Suggested tick period in milliseconds for the current speed tier.
    pub fn timer_interval(&self) -> i32 {
        let base = if self.state.difficulty == Difficulty::Hard {
            HARD_BASE_INTERVAL_MS
        } else {
            NORMAL_BASE_INTERVAL_MS
        };
        (base - (self.state.speed_level - 1) * SPEED_INTERVAL_REDUCTION_MS).max(MIN_INTERVAL_MS)
    }

    // ── Food ──────────────────────────────────────────────────────────

    /// Tops the board up with food. Fixed food positions win outright;
    /// otherwise random free cells are drawn, respecting the level's spawn cap
    /// unless the level is won by eating everything.
    pub fn spawn_food(&mut self) {
        let level = self.state.current_level.clone();
        let target = match &level {
            Some(level) => level.settings.food_count,
            None if self.state.difficulty == Difficulty::Easy => EASY_FOOD_COUNT,
            None => NORMAL_FOOD_COUNT,
        };

        if let Some(level) = &level {
            if !level.fixed_food_positions.is_empty() {
                // A spot under the snake waits until the body has moved off it.
                for &position in &level.fixed_food_positions {
                    if !self.state.foods.contains(&position)
                        && !self.state.snake.contains(&position)
                    {
                        self.state.foods.push(position);
                        self.state.total_food_spawned += 1;
                    }
                }
                return;
            }
        }

        let mut to_spawn = target.saturating_sub(self.state.foods.len() as u32);
        if let Some(level) = &level {
            let condition = &level.victory_condition;
            if !condition.requires_all_food() {
                if let Some(cap) = condition.food_spawn_count {
                    if self.state.total_food_spawned >= cap {
                        return;
                    }
                    to_spawn = to_spawn.min(cap - self.state.total_food_spawned);
                }
            }
        }
        if to_spawn == 0 {
            return;
        }

        let (width, height) = self.grid_size();
        let mut attempts = target * FOOD_SPAWN_ATTEMPTS_PER_FOOD;
        let mut placed = 0;
        while placed < to_spawn && attempts > 0 {
            attempts -= 1;
            let x = self.random.next(width);
            let y = self.random.next(height);
            let position = Point::new(x, y);
            if self.is_occupied(position) {
                continue;
            }
            self.state.foods.push(position);
            self.state.total_food_spawned += 1;
            placed += 1;
        }

        if placed < to_spawn {
            tracing::debug!(placed, wanted = to_spawn, "no room left for food");
        }
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn reset_obstacles(&mut self) {
        let now = self.clock.now_millis();
        self.obstacles = match &self.state.current_level {
            Some(level) => level.obstacles.clone(),
            None => Vec::new(),
        };
        for obstacle in &mut self.obstacles {
            obstacle.reset_timer(now);
        }
    }

    /// Would moving the head to `position` kill the snake? Probes obstacles
    /// without interacting, so pass counters are untouched.
    fn will_collide(&self, position: Point) -> bool {
        let (width, height) = self.grid_size();
        if !position.in_bounds(width, height) {
            return true;
        }
        if self.state.snake.contains(&position) {
            return true;
        }
        self.obstacles
            .iter()
            .any(|o| o.position() == position && o.is_deadly())
    }

    fn fixed_food_missing(&self) -> bool {
        self.state.current_level.as_ref().is_some_and(|level| {
            level
                .fixed_food_positions
                .iter()
                .any(|p| !self.state.foods.contains(p))
        })
    }

    fn is_occupied(&self, position: Point) -> bool {
        self.state.snake.contains(&position)
            || self.state.foods.contains(&position)
            || self.obstacles.iter().any(|o| o.position() == position)
    }

    fn resolve_obstacle_collisions(&mut self, head: Point) {
        let mut to_remove = Vec::new();

        for index in 0..self.obstacles.len() {
            if self.obstacles[index].position() != head {
                continue;
            }
            let result = self.obstacles[index].interact();

            if result.is_deadly {
                tracing::debug!(x = head.x, y = head.y, "hit a wall");
                self.state.is_game_over = true;
                return;
            }
            if result.should_remove {
                to_remove.push(index);
            }
            if result.speed_change != 0 {
                self.state.speed_level = self
                    .state
                    .speed_level
                    .saturating_add(result.speed_change)
                    .clamp(MIN_SPEED_LEVEL, MAX_SPEED_LEVEL);
            }
            // Bonus only lands while food is on the board.
            if result.score_multiplier != 1 && !self.state.foods.is_empty() {
                let bonus = self.base_points() as i64 * (result.score_multiplier as i64 - 1);
                let total = (self.state.score as i64).saturating_add(bonus).max(0);
                self.state.score = u32::try_from(total).unwrap_or(u32::MAX);
            }
            if let Some(target) = result.teleport_target {
                self.teleport_snake(target);
            }
            if !result.message.is_empty() {
                tracing::debug!(message = %result.message, "obstacle effect");
            }
        }

        for index in to_remove.into_iter().rev() {
            self.obstacles.remove(index);
        }
    }

    /// Shifts the whole body so the head lands on `target`.
    fn teleport_snake(&mut self, target: Point) {
        let Some(head) = self.state.head() else {
            return;
        };
        let offset = target - head;
        let moved: Vec<Point> = self.state.snake.iter().map(|&p| p + offset).collect();
        self.state.snake.clear();
        self.state.snake.extend(moved);
    }
}
