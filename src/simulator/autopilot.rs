//! Greedy autopilot: head for the nearest food without boxing itself in.

use std::collections::{HashSet, VecDeque};

use crate::core::{Direction, Point};
use crate::engine::GameEngine;

/// Picks the next heading. Safe moves that keep enough room to fit the body
/// win over cramped ones, then the closest food decides. Falls back to the
/// current heading when every move is fatal.
pub fn choose_direction(engine: &GameEngine) -> Direction {
    let state = engine.state();
    let Some(head) = state.head() else {
        return state.direction;
    };
    let blocked = blocked_cells(engine);
    let needed = state.snake_length();

    Direction::ALL
        .iter()
        .copied()
        .filter(|&d| d != state.direction.opposite())
        .filter_map(|d| {
            let next = head + d.delta();
            if !is_free(engine, &blocked, next) {
                return None;
            }
            let room = reachable_cells(engine, &blocked, next, needed);
            let cramped = room < needed;
            let distance = nearest_food_distance(&state.foods, next);
            Some((cramped, distance, d != state.direction, d))
        })
        .min_by_key(|&(cramped, distance, turning, _)| (cramped, distance, turning))
        .map(|(_, _, _, d)| d)
        .unwrap_or(state.direction)
}

/// Cells that kill on entry: the body and deadly obstacles.
fn blocked_cells(engine: &GameEngine) -> HashSet<Point> {
    let mut blocked: HashSet<Point> = engine.state().snake.iter().copied().collect();
    blocked.extend(
        engine
            .obstacles()
            .iter()
            .filter(|o| o.is_deadly())
            .map(|o| o.position()),
    );
    blocked
}

fn is_free(engine: &GameEngine, blocked: &HashSet<Point>, cell: Point) -> bool {
    let (width, height) = engine.grid_size();
    cell.in_bounds(width, height) && !blocked.contains(&cell)
}

/// Flood fill from `start`, stopping once `limit` cells are found.
fn reachable_cells(
    engine: &GameEngine,
    blocked: &HashSet<Point>,
    start: Point,
    limit: usize,
) -> usize {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        if seen.len() >= limit {
            break;
        }
        for d in Direction::ALL {
            let next = cell + d.delta();
            if is_free(engine, blocked, next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

fn nearest_food_distance(foods: &[Point], from: Point) -> i32 {
    foods
        .iter()
        .map(|f| f.manhattan_distance(from))
        .min()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, RngSource};
    use crate::levels::Level;
    use crate::obstacles::Obstacle;
    use std::sync::Arc;

    fn engine_on(level: Level) -> GameEngine {
        let mut engine = GameEngine::new(
            Box::new(RngSource::seeded(3)),
            Box::new(ManualClock::new(0)),
        );
        engine.set_level(Arc::new(level));
        engine.initialize();
        engine.start_game();
        engine
    }

    #[test]
    fn test_heads_towards_food() {
        let mut engine = engine_on(Level::new("a", "A", 1));
        engine.state_mut().foods = vec![Point::new(15, 2)];
        assert_eq!(choose_direction(&engine), Direction::Up);

        engine.state_mut().foods = vec![Point::new(25, 10)];
        assert_eq!(choose_direction(&engine), Direction::Right);
    }

    #[test]
    fn test_avoids_walls_in_front() {
        let mut engine = engine_on(
            Level::new("a", "A", 1).with_obstacles(vec![Obstacle::wall(Point::new(16, 10))]),
        );
        engine.state_mut().foods = vec![Point::new(25, 10)];
        let d = choose_direction(&engine);
        assert!(d == Direction::Up || d == Direction::Down);
    }

    #[test]
    fn test_never_reverses() {
        let mut engine = engine_on(Level::new("a", "A", 1));
        engine.state_mut().foods = vec![Point::new(2, 10)];
        assert_ne!(choose_direction(&engine), Direction::Left);
    }

    #[test]
    fn test_keeps_heading_when_trapped() {
        let mut engine = engine_on(Level::new("a", "A", 1).with_obstacles(vec![
            Obstacle::wall(Point::new(16, 10)),
            Obstacle::wall(Point::new(15, 9)),
            Obstacle::wall(Point::new(15, 11)),
        ]));
        engine.state_mut().foods = vec![Point::new(0, 0)];
        assert_eq!(choose_direction(&engine), Direction::Right);
    }
}
