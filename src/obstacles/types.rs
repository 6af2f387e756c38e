//! Obstacle data structures.

use serde::{Deserialize, Serialize};

use crate::core::constants::DEFAULT_DYNAMIC_MOVE_INTERVAL_MS;
use crate::core::Point;

/// Tag naming every obstacle behavior. Special-effect obstacles carry one of
/// the four effect tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleType {
    Static,
    Destructible,
    Dynamic,
    SpeedUp,
    SpeedDown,
    ScoreMultiplier,
    Teleport,
}

impl ObstacleType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "Wall",
            Self::Destructible => "Breakable Wall",
            Self::Dynamic => "Moving Wall",
            Self::SpeedUp => "Speed Up",
            Self::SpeedDown => "Slow Down",
            Self::ScoreMultiplier => "Score Multiplier",
            Self::Teleport => "Teleport",
        }
    }

    pub fn is_special_effect(&self) -> bool {
        matches!(
            self,
            Self::SpeedUp | Self::SpeedDown | Self::ScoreMultiplier | Self::Teleport
        )
    }
}

/// Outcome of the snake head entering an obstacle's cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleInteractionResult {
    pub is_deadly: bool,
    pub should_remove: bool,
    pub can_pass_through: bool,
    pub speed_change: i32,
    /// 1 means no bonus.
    pub score_multiplier: i32,
    pub teleport_target: Option<Point>,
    pub message: String,
}

impl Default for ObstacleInteractionResult {
    fn default() -> Self {
        Self {
            is_deadly: false,
            should_remove: false,
            can_pass_through: false,
            speed_change: 0,
            score_multiplier: 1,
            teleport_target: None,
            message: String::new(),
        }
    }
}

impl ObstacleInteractionResult {
    pub fn deadly() -> Self {
        Self {
            is_deadly: true,
            message: "Crashed!".to_string(),
            ..Default::default()
        }
    }

    pub fn pass_through() -> Self {
        Self {
            can_pass_through: true,
            ..Default::default()
        }
    }

    pub fn remove_after_pass() -> Self {
        Self {
            can_pass_through: true,
            should_remove: true,
            message: "Wall destroyed!".to_string(),
            ..Default::default()
        }
    }

    pub fn speed_boost(amount: i32) -> Self {
        let message = if amount >= 0 {
            format!("Speed +{}", amount)
        } else {
            format!("Speed {}", amount)
        };
        Self {
            can_pass_through: true,
            speed_change: amount,
            message,
            ..Default::default()
        }
    }

    pub fn multiply_score(multiplier: i32) -> Self {
        Self {
            can_pass_through: true,
            score_multiplier: multiplier,
            message: format!("Score x{}", multiplier),
            ..Default::default()
        }
    }

    pub fn teleport(target: Point) -> Self {
        Self {
            can_pass_through: true,
            teleport_target: Some(target),
            message: "Teleported!".to_string(),
            ..Default::default()
        }
    }
}

/// Plain wall. Always lethal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticObstacle {
    pub position: Point,
}

/// Wall that lets the snake through a limited number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestructibleObstacle {
    pub position: Point,
    pub remaining_passes: u32,
    pub max_passes: u32,
}

impl DestructibleObstacle {
    pub fn new(position: Point, max_passes: u32) -> Self {
        Self {
            position,
            remaining_passes: max_passes,
            max_passes,
        }
    }
}

fn default_move_interval_ms() -> i64 {
    DEFAULT_DYNAMIC_MOVE_INTERVAL_MS
}

fn default_loop_path() -> bool {
    true
}

/// Lethal wall that walks along a fixed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicObstacle {
    pub position: Point,
    pub path: Vec<Point>,
    #[serde(default)]
    pub current_path_index: usize,
    #[serde(default = "default_move_interval_ms")]
    pub move_interval_ms: i64,
    #[serde(default = "default_loop_path")]
    pub loop_path: bool,
    /// Clock reading of the last step. Runtime only.
    #[serde(skip)]
    pub last_move_ms: i64,
}

impl DynamicObstacle {
    /// An empty path becomes a single-point path at `position`.
    pub fn new(position: Point, path: Vec<Point>) -> Self {
        let path = if path.is_empty() { vec![position] } else { path };
        Self {
            position,
            path,
            current_path_index: 0,
            move_interval_ms: DEFAULT_DYNAMIC_MOVE_INTERVAL_MS,
            loop_path: true,
            last_move_ms: 0,
        }
    }

    pub fn with_interval(mut self, move_interval_ms: i64) -> Self {
        self.move_interval_ms = move_interval_ms;
        self
    }

    pub fn with_loop(mut self, loop_path: bool) -> Self {
        self.loop_path = loop_path;
        self
    }
}

/// Pass-through tile that changes speed, boosts score or teleports the snake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialEffectObstacle {
    pub position: Point,
    pub effect: ObstacleType,
    #[serde(default)]
    pub speed_change_amount: i32,
    #[serde(default = "default_score_multiplier")]
    pub score_multiplier_value: i32,
    #[serde(default)]
    pub teleport_destination: Option<Point>,
}

fn default_score_multiplier() -> i32 {
    1
}

impl SpecialEffectObstacle {
    pub fn new(position: Point, effect: ObstacleType) -> Self {
        Self {
            position,
            effect,
            speed_change_amount: 0,
            score_multiplier_value: 1,
            teleport_destination: None,
        }
    }

    pub fn create_speed_up(position: Point, amount: i32) -> Self {
        Self {
            speed_change_amount: amount.saturating_abs(),
            ..Self::new(position, ObstacleType::SpeedUp)
        }
    }

    /// `amount` is stored negated, so both `3` and `-3` slow the snake by 3.
    pub fn create_speed_down(position: Point, amount: i32) -> Self {
        Self {
            speed_change_amount: -amount.saturating_abs(),
            ..Self::new(position, ObstacleType::SpeedDown)
        }
    }

    pub fn create_score_multiplier(position: Point, multiplier: i32) -> Self {
        Self {
            score_multiplier_value: multiplier,
            ..Self::new(position, ObstacleType::ScoreMultiplier)
        }
    }

    pub fn create_teleport(position: Point, destination: Point) -> Self {
        Self {
            teleport_destination: Some(destination),
            ..Self::new(position, ObstacleType::Teleport)
        }
    }
}

/// Every obstacle a level can contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Obstacle {
    Static(StaticObstacle),
    Destructible(DestructibleObstacle),
    Dynamic(DynamicObstacle),
    SpecialEffect(SpecialEffectObstacle),
}

impl Obstacle {
    pub fn wall(position: Point) -> Self {
        Self::Static(StaticObstacle { position })
    }

    pub fn destructible(position: Point, max_passes: u32) -> Self {
        Self::Destructible(DestructibleObstacle::new(position, max_passes))
    }

    pub fn dynamic(position: Point, path: Vec<Point>) -> Self {
        Self::Dynamic(DynamicObstacle::new(position, path))
    }

    pub fn speed_up(position: Point, amount: i32) -> Self {
        Self::SpecialEffect(SpecialEffectObstacle::create_speed_up(position, amount))
    }

    pub fn speed_down(position: Point, amount: i32) -> Self {
        Self::SpecialEffect(SpecialEffectObstacle::create_speed_down(position, amount))
    }

    pub fn score_multiplier(position: Point, multiplier: i32) -> Self {
        Self::SpecialEffect(SpecialEffectObstacle::create_score_multiplier(
            position, multiplier,
        ))
    }

    pub fn teleport(position: Point, destination: Point) -> Self {
        Self::SpecialEffect(SpecialEffectObstacle::create_teleport(position, destination))
    }
}
