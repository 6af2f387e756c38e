//! Built-in campaign levels, used when no preset file is installed.

use super::types::{Level, LevelSettings};
use crate::core::{Difficulty, Point};
use crate::obstacles::{DynamicObstacle, Obstacle};
use crate::victory::VictoryCondition;

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// 2x2 block of walls with its top-left corner at `(x, y)`.
fn pillar(x: i32, y: i32) -> Vec<Obstacle> {
    vec![
        Obstacle::wall(p(x, y)),
        Obstacle::wall(p(x + 1, y)),
        Obstacle::wall(p(x, y + 1)),
        Obstacle::wall(p(x + 1, y + 1)),
    ]
}

/// Path that walks `from..=to` along a row and back again.
fn there_and_back_row(y: i32, from: i32, to: i32) -> Vec<Point> {
    (from..=to).chain((from + 1..to).rev()).map(|x| p(x, y)).collect()
}

fn there_and_back_column(x: i32, from: i32, to: i32) -> Vec<Point> {
    (from..=to).chain((from + 1..to).rev()).map(|y| p(x, y)).collect()
}

fn patroller(path: Vec<Point>, interval_ms: i64) -> Obstacle {
    let start = path.first().copied().unwrap_or_default();
    Obstacle::Dynamic(DynamicObstacle::new(start, path).with_interval(interval_ms))
}

pub fn builtin_levels() -> Vec<Level> {
    vec![
        open_field(),
        four_pillars(),
        brittle_maze(),
        patrol(),
        rush_hour(),
        wormholes(),
    ]
}

fn open_field() -> Level {
    Level::new("preset-01-open-field", "Open Field", 1)
        .with_description("No walls, no tricks. Warm up.")
        .with_settings(LevelSettings {
            default_difficulty: Difficulty::Easy,
            food_count: 3,
            ..Default::default()
        })
        .with_victory_condition(VictoryCondition::target_score(100))
}

fn four_pillars() -> Level {
    let obstacles = [pillar(5, 4), pillar(23, 4), pillar(5, 14), pillar(23, 14)].concat();
    Level::new("preset-02-four-pillars", "Four Pillars", 2)
        .with_description("Stone pillars guard the corners.")
        .with_victory_condition(VictoryCondition::target_length(10))
        .with_obstacles(obstacles)
}

fn brittle_maze() -> Level {
    let mut obstacles: Vec<Obstacle> = (5..=14)
        .map(|y| Obstacle::destructible(p(20, y), 2))
        .collect();
    obstacles.extend((0..=5).map(|y| Obstacle::wall(p(10, y))));
    obstacles.extend((14..=19).map(|y| Obstacle::wall(p(10, y))));

    Level::new("preset-03-brittle-maze", "Brittle Maze", 3)
        .with_description("Cracked walls give way after two passes.")
        .with_victory_condition(VictoryCondition::collect_all_food(Some(10)))
        .with_obstacles(obstacles)
}

fn patrol() -> Level {
    let obstacles = vec![
        patroller(there_and_back_row(4, 4, 25), 300),
        patroller(there_and_back_row(15, 4, 25), 400),
        patroller(there_and_back_column(27, 2, 17), 350),
    ];
    Level::new("preset-04-patrol", "Patrol", 4)
        .with_description("Moving walls sweep the field. Time your crossings.")
        .with_victory_condition(VictoryCondition::target_score(300).with_food_spawn_count(25))
        .with_obstacles(obstacles)
}

fn rush_hour() -> Level {
    let mut obstacles = vec![
        Obstacle::speed_up(p(5, 5), 2),
        Obstacle::speed_up(p(24, 14), 2),
        Obstacle::speed_down(p(24, 5), 2),
        Obstacle::speed_down(p(5, 14), 2),
        Obstacle::score_multiplier(p(15, 3), 3),
        Obstacle::score_multiplier(p(15, 16), 2),
    ];
    obstacles.extend((2..=6).map(|x| Obstacle::wall(p(x, 10))));
    obstacles.extend((23..=27).map(|x| Obstacle::wall(p(x, 10))));

    Level::new("preset-05-rush-hour", "Rush Hour", 5)
        .with_description("Speed pads and score boosters. Mind the lanes.")
        .with_settings(LevelSettings {
            initial_speed: 2,
            ..Default::default()
        })
        .with_victory_condition(VictoryCondition::combined(250, 12, false))
        .with_obstacles(obstacles)
}

fn wormholes() -> Level {
    let mut obstacles = vec![
        Obstacle::teleport(p(3, 3), p(26, 16)),
        Obstacle::teleport(p(26, 3), p(3, 16)),
    ];
    obstacles.extend((12..=18).map(|x| Obstacle::wall(p(x, 5))));
    obstacles.extend((12..=18).map(|x| Obstacle::wall(p(x, 15))));

    Level::new("preset-06-wormholes", "Wormholes", 6)
        .with_description("Portals fold the board. Food always returns to the corners.")
        .with_settings(LevelSettings {
            default_difficulty: Difficulty::Hard,
            ..Default::default()
        })
        .with_victory_condition(VictoryCondition::combined(200, 8, false))
        .with_obstacles(obstacles)
        .with_fixed_food(vec![p(1, 1), p(28, 1), p(1, 18), p(28, 18)])
}
