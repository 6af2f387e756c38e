use super::types::Level;
use crate::core::constants::{MAX_GRID_DIMENSION, MAX_SPEED_LEVEL, MIN_GRID_DIMENSION, MIN_SPEED_LEVEL};
use crate::obstacles::Obstacle;

/// Checks a level before it is saved from the editor. Returns the first
/// problem found as a user-facing message.
pub fn validate_level(level: &Level) -> Result<(), String> {
    let s = &level.settings;
    let dims = MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION;

    if level.name.trim().is_empty() {
        return Err("Level name must not be empty".to_string());
    }
    if !dims.contains(&s.grid_width) {
        return Err(format!(
            "Grid width must be between {} and {}",
            MIN_GRID_DIMENSION, MAX_GRID_DIMENSION
        ));
    }
    if !dims.contains(&s.grid_height) {
        return Err(format!(
            "Grid height must be between {} and {}",
            MIN_GRID_DIMENSION, MAX_GRID_DIMENSION
        ));
    }
    if s.initial_snake_length < 1 {
        return Err("Snake must start with at least one segment".to_string());
    }
    if i64::from(s.initial_snake_length) > i64::from(s.grid_width) * i64::from(s.grid_height) {
        return Err("Starting snake does not fit in the grid".to_string());
    }
    if !s.snake_start.in_bounds(s.grid_width, s.grid_height) {
        return Err("Snake start must be inside the grid".to_string());
    }

    let body = s.starting_body();
    if body.iter().any(|p| !p.in_bounds(s.grid_width, s.grid_height)) {
        return Err("Starting snake does not fit in the grid".to_string());
    }
    if s.food_count < 1 {
        return Err("Level needs at least one food".to_string());
    }
    if !(MIN_SPEED_LEVEL..=MAX_SPEED_LEVEL).contains(&s.initial_speed) {
        return Err(format!(
            "Initial speed must be between {} and {}",
            MIN_SPEED_LEVEL, MAX_SPEED_LEVEL
        ));
    }

    for obstacle in &level.obstacles {
        let at = obstacle.position();
        if !at.in_bounds(s.grid_width, s.grid_height) {
            return Err(format!("Obstacle at ({}, {}) is outside the grid", at.x, at.y));
        }
        if body.contains(&at) {
            return Err(format!("Obstacle at ({}, {}) overlaps the starting snake", at.x, at.y));
        }
        match obstacle {
            Obstacle::Dynamic(o) => {
                if o.path.iter().any(|p| !p.in_bounds(s.grid_width, s.grid_height)) {
                    return Err(format!("Moving wall at ({}, {}) leaves the grid", at.x, at.y));
                }
            }
            Obstacle::SpecialEffect(o) => {
                if let Some(dest) = o.teleport_destination {
                    if !dest.in_bounds(s.grid_width, s.grid_height) {
                        return Err(format!(
                            "Teleport at ({}, {}) points outside the grid",
                            at.x, at.y
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(food) = level
        .fixed_food_positions
        .iter()
        .find(|p| !p.in_bounds(s.grid_width, s.grid_height))
    {
        return Err(format!("Food at ({}, {}) is outside the grid", food.x, food.y));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Point};
    use crate::levels::LevelSettings;

    fn level() -> Level {
        Level::new("v", "Valid", 1)
    }

    fn settings(f: impl FnOnce(&mut LevelSettings)) -> Level {
        let mut s = LevelSettings::default();
        f(&mut s);
        level().with_settings(s)
    }

    #[test]
    fn test_default_level_is_valid() {
        assert_eq!(validate_level(&level()), Ok(()));
    }

    #[test]
    fn test_grid_limits() {
        assert!(validate_level(&settings(|s| s.grid_width = 9)).is_err());
        assert!(validate_level(&settings(|s| s.grid_height = 101)).is_err());
        assert!(validate_level(&settings(|s| {
            s.grid_width = 100;
            s.grid_height = 10;
            s.snake_start = Point::new(50, 5);
        }))
        .is_ok());
    }

    #[test]
    fn test_start_and_body_must_fit() {
        assert!(validate_level(&settings(|s| s.snake_start = Point::new(30, 5))).is_err());
        let err = validate_level(&settings(|s| {
            s.snake_start = Point::new(1, 5);
            s.snake_direction = Direction::Right;
            s.initial_snake_length = 3;
        }))
        .unwrap_err();
        assert!(err.contains("does not fit"));
    }

    #[test]
    fn test_snake_longer_than_grid_is_rejected() {
        for length in [601, 2_147_483_648, 3_000_000_000, u32::MAX] {
            let err = validate_level(&settings(|s| s.initial_snake_length = length)).unwrap_err();
            assert!(err.contains("does not fit"), "{}", length);
        }
    }

    #[test]
    fn test_food_and_speed() {
        assert!(validate_level(&settings(|s| s.food_count = 0)).is_err());
        assert!(validate_level(&settings(|s| s.initial_speed = 0)).is_err());
        assert!(validate_level(&settings(|s| s.initial_speed = 11)).is_err());
    }

    #[test]
    fn test_obstacle_placement() {
        let outside = level().with_obstacles(vec![Obstacle::wall(Point::new(-1, 0))]);
        assert!(validate_level(&outside).is_err());

        let on_snake = level().with_obstacles(vec![Obstacle::wall(Point::new(14, 10))]);
        assert!(validate_level(&on_snake).unwrap_err().contains("overlaps"));

        let bad_portal =
            level().with_obstacles(vec![Obstacle::teleport(Point::new(2, 2), Point::new(40, 2))]);
        assert!(validate_level(&bad_portal).is_err());

        let bad_path = level().with_obstacles(vec![Obstacle::dynamic(
            Point::new(2, 2),
            vec![Point::new(2, 2), Point::new(2, 25)],
        )]);
        assert!(validate_level(&bad_path).is_err());
    }

    #[test]
    fn test_fixed_food_in_bounds() {
        let bad = level().with_fixed_food(vec![Point::new(3, 3), Point::new(3, 20)]);
        assert!(validate_level(&bad).is_err());
    }

    #[test]
    fn test_blank_name() {
        let mut l = level();
        l.name = "  ".to_string();
        assert!(validate_level(&l).is_err());
    }
}
