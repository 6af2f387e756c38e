//! Level obstacles: lethal walls, breakable walls, moving walls and effect tiles.

mod logic;
mod types;

pub use types::{
    DestructibleObstacle, DynamicObstacle, Obstacle, ObstacleInteractionResult, ObstacleType,
    SpecialEffectObstacle, StaticObstacle,
};
