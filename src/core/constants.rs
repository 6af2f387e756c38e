// Tick timing (milliseconds)
pub const NORMAL_BASE_INTERVAL_MS: i32 = 200;
pub const HARD_BASE_INTERVAL_MS: i32 = 120;
pub const SPEED_INTERVAL_REDUCTION_MS: i32 = 15;
pub const MIN_INTERVAL_MS: i32 = 40;

// Speed tiers
pub const MIN_SPEED_LEVEL: i32 = 1;
pub const MAX_SPEED_LEVEL: i32 = 10;
pub const DEFAULT_SPEED_BOOST: i32 = 2;

// Scoring (points per food before the speed bonus)
pub const EASY_BASE_POINTS: u32 = 10;
pub const MEDIUM_BASE_POINTS: u32 = 20;
pub const HARD_BASE_POINTS: u32 = 30;

// Food
pub const EASY_FOOD_COUNT: u32 = 3;
pub const NORMAL_FOOD_COUNT: u32 = 2;
pub const FOOD_SPAWN_ATTEMPTS_PER_FOOD: u32 = 200;

// Grid and snake defaults when no level is active
pub const DEFAULT_GRID_WIDTH: i32 = 30;
pub const DEFAULT_GRID_HEIGHT: i32 = 20;
pub const DEFAULT_SNAKE_LENGTH: u32 = 3;

// Obstacles
pub const DEFAULT_DYNAMIC_MOVE_INTERVAL_MS: i64 = 500;

// Editor limits
pub const MIN_GRID_DIMENSION: i32 = 10;
pub const MAX_GRID_DIMENSION: i32 = 100;
