//! Engine scenario integration tests
//!
//! Drives `GameEngine` through the public API the way a front-end does:
//! set a level, initialize, start, then tick move/check/update.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serpent::core::{Direction, ManualClock, Point, RngSource};
use serpent::engine::GameEngine;
use serpent::levels::{Level, LevelSettings};
use serpent::obstacles::{DynamicObstacle, Obstacle};
use serpent::victory::VictoryCondition;
use std::sync::Arc;

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

fn new_engine(seed: u64) -> (GameEngine, ManualClock) {
    let clock = ManualClock::new(1_000);
    let engine = GameEngine::new(
        Box::new(RngSource(ChaCha8Rng::seed_from_u64(seed))),
        Box::new(clock.clone()),
    );
    (engine, clock)
}

/// Started on `level`, with the food parked far from row 10.
fn started(level: Level) -> (GameEngine, ManualClock) {
    let (mut engine, clock) = new_engine(11);
    engine.set_level(Arc::new(level));
    engine.initialize();
    engine.start_game();
    engine.state_mut().foods = vec![p(0, 0), p(29, 19)];
    (engine, clock)
}

fn tick(engine: &mut GameEngine) {
    engine.move_snake();
    engine.check_collisions();
    engine.update_dynamic_obstacles();
}

fn body(engine: &GameEngine) -> Vec<Point> {
    engine.state().snake.iter().copied().collect()
}

fn original_snake() -> Vec<Point> {
    vec![p(15, 10), p(14, 10), p(13, 10)]
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_collect_all_food_spawns_food_count_not_cap() {
    let level = Level::new("food", "Food", 1)
        .with_settings(LevelSettings {
            grid_width: 30,
            grid_height: 20,
            food_count: 2,
            ..Default::default()
        })
        .with_victory_condition(VictoryCondition::collect_all_food(Some(10)));

    let (mut engine, _) = new_engine(1);
    engine.set_level(Arc::new(level));
    engine.initialize();

    assert_eq!(engine.state().foods.len(), 2);
    assert_eq!(engine.state().total_food_spawned, 2);
}

#[test]
fn test_static_wall_ends_game_without_moving() {
    let (mut engine, _) =
        started(Level::new("wall", "Wall", 1).with_obstacles(vec![Obstacle::wall(p(16, 10))]));
    assert_eq!(body(&engine), original_snake());

    engine.move_snake();

    assert!(engine.state().is_game_over);
    assert_eq!(body(&engine), original_snake());
}

#[test]
fn test_destructible_with_one_pass_is_consumed() {
    let (mut engine, _) = started(
        Level::new("brick", "Brick", 1)
            .with_obstacles(vec![Obstacle::destructible(p(16, 10), 1)]),
    );

    engine.move_snake();
    engine.check_collisions();

    assert!(!engine.state().is_game_over);
    assert_eq!(engine.state().head(), Some(p(16, 10)));
    assert!(engine.obstacles().is_empty());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_straight_line_advances_by_direction() {
    let (mut engine, _) = started(Level::new("open", "Open", 1));
    engine.try_change_direction(Direction::Down);
    for _ in 0..9 {
        let head = engine.state().head().unwrap();
        tick(&mut engine);
        assert!(!engine.state().is_game_over);
        assert_eq!(engine.state().head().unwrap(), head + Direction::Down.delta());
    }
    tick(&mut engine);
    assert!(engine.state().is_game_over, "row 20 is off the grid");
}

#[test]
fn test_eating_grows_scores_and_respawns() {
    let (mut engine, _) = started(Level::new("open", "Open", 1));
    engine.state_mut().foods = vec![p(16, 10), p(3, 3)];
    let base = engine.base_points();
    let speed = engine.state().speed_level as u32;

    tick(&mut engine);

    let state = engine.state();
    assert_eq!(state.snake_length(), 4);
    assert_eq!(state.score, base + speed);
    assert_eq!(state.foods.len(), 2);
    assert!(state.foods.iter().all(|&f| f != p(16, 10)));
    assert_eq!(state.food_collected, 1);
    assert_eq!(state.total_food_spawned, 2 + 1);
}

#[test]
fn test_destructible_three_passes() {
    let (mut engine, _) = started(
        Level::new("brick", "Brick", 1)
            .with_obstacles(vec![Obstacle::destructible(p(16, 10), 3)]),
    );
    let square = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    tick(&mut engine);
    for lap in 0..2 {
        assert_eq!(engine.obstacles().len(), 1, "still standing before lap {}", lap);
        for d in square {
            assert!(engine.try_change_direction(d));
            tick(&mut engine);
            assert!(!engine.state().is_game_over);
        }
    }
    assert_eq!(engine.state().head(), Some(p(16, 10)));
    assert!(engine.obstacles().is_empty());
}

#[test]
fn test_teleport_keeps_spacing() {
    let (mut engine, _) = started(
        Level::new("warp", "Warp", 1)
            .with_obstacles(vec![Obstacle::teleport(p(16, 10), p(4, 17))]),
    );
    tick(&mut engine);
    assert_eq!(body(&engine), vec![p(4, 17), p(3, 17), p(2, 17)]);

    tick(&mut engine);
    assert_eq!(body(&engine), vec![p(5, 17), p(4, 17), p(3, 17)]);
}

#[test]
fn test_speed_pads_clamp() {
    let (mut engine, _) = started(
        Level::new("slow", "Slow", 1).with_obstacles(vec![Obstacle::speed_down(p(16, 10), 5)]),
    );
    engine.state_mut().speed_level = 2;
    tick(&mut engine);
    assert_eq!(engine.state().speed_level, 1);

    let (mut engine, _) = started(
        Level::new("fast", "Fast", 1).with_obstacles(vec![
            Obstacle::speed_up(p(16, 10), 0),
            Obstacle::speed_up(p(17, 10), 0),
        ]),
    );
    tick(&mut engine);
    tick(&mut engine);
    assert_eq!(engine.state().speed_level, 5, "default boost is +2");
    assert_eq!(engine.obstacles().len(), 2, "pads are not consumed");
}

#[test]
fn test_moving_wall_blocks_path_when_it_arrives() {
    let patrol = DynamicObstacle::new(p(20, 5), vec![p(20, 5), p(20, 10)]).with_interval(200);
    let (mut engine, clock) =
        started(Level::new("patrol", "Patrol", 1).with_obstacles(vec![Obstacle::Dynamic(patrol)]));

    clock.advance(200);
    tick(&mut engine);
    assert_eq!(engine.obstacles()[0].position(), p(20, 10));

    // Head is at (16, 10); walk into the wall.
    for _ in 0..3 {
        tick(&mut engine);
    }
    assert_eq!(engine.state().head(), Some(p(19, 10)));
    engine.move_snake();
    assert!(engine.state().is_game_over);
}

#[test]
fn test_direction_rules() {
    let (mut engine, _) = new_engine(2);
    engine.initialize();
    assert!(!engine.try_change_direction(Direction::Up));

    engine.start_game();
    assert!(!engine.try_change_direction(Direction::Left));
    assert!(engine.try_change_direction(Direction::Down));
    assert!(!engine.try_change_direction(Direction::Up));
    assert!(engine.try_change_direction(Direction::Left));
}

#[test]
fn test_restart_after_game_over_resets_run() {
    let (mut engine, _) = started(
        Level::new("wall", "Wall", 1).with_obstacles(vec![Obstacle::destructible(p(16, 10), 1)]),
    );
    tick(&mut engine);
    assert!(engine.obstacles().is_empty());
    engine.state_mut().is_game_over = true;

    engine.start_game();
    let state = engine.state();
    assert!(!state.is_game_over);
    assert!(!state.is_waiting_to_start);
    assert_eq!(state.score, 0);
    assert_eq!(body(&engine), original_snake());
    assert_eq!(engine.obstacles().len(), 1, "fresh copy of the level's obstacles");
}

#[test]
fn test_free_play_without_level() {
    let (mut engine, _) = new_engine(3);
    engine.initialize();
    engine.start_game();
    assert_eq!(body(&engine), original_snake());
    assert_eq!(engine.grid_size(), (30, 20));
    assert!(engine.is_running());
    for _ in 0..5 {
        engine.update_level_time();
    }
    assert_eq!(engine.state().level_time, 0);
}
