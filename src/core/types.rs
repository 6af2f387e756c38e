//! Grid coordinates, movement directions and difficulty levels.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use super::constants::{EASY_BASE_POINTS, HARD_BASE_POINTS, MEDIUM_BASE_POINTS};

/// A cell on the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the point lies inside `[0, width) x [0, height)`.
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }

    pub fn manhattan_distance(&self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Cardinal direction of travel. Y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector for this direction.
    pub fn delta(&self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// Maps a unit vector back to a direction. Anything else is `None`.
    pub fn from_delta(delta: Point) -> Option<Self> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// Difficulty setting. Controls points per food, the timer base and the
/// default food count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Medium)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Points awarded per food, before the speed-level bonus.
    pub fn base_points(&self) -> u32 {
        match self {
            Self::Easy => EASY_BASE_POINTS,
            Self::Medium => MEDIUM_BASE_POINTS,
            Self::Hard => HARD_BASE_POINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_direction_delta_sums_to_zero_with_opposite() {
        for d in Direction::ALL {
            assert_eq!(d.delta() + d.opposite().delta(), Point::new(0, 0));
        }
    }

    #[test]
    fn test_direction_from_delta() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_delta(d.delta()), Some(d));
        }
        assert_eq!(Direction::from_delta(Point::new(1, 1)), None);
        assert_eq!(Direction::from_delta(Point::new(0, 0)), None);
    }

    #[test]
    fn test_point_bounds() {
        assert!(Point::new(0, 0).in_bounds(30, 20));
        assert!(Point::new(29, 19).in_bounds(30, 20));
        assert!(!Point::new(30, 19).in_bounds(30, 20));
        assert!(!Point::new(-1, 5).in_bounds(30, 20));
        assert!(!Point::new(5, 20).in_bounds(30, 20));
    }

    #[test]
    fn test_difficulty_from_index() {
        assert_eq!(Difficulty::from_index(0), Difficulty::Easy);
        assert_eq!(Difficulty::from_index(1), Difficulty::Medium);
        assert_eq!(Difficulty::from_index(2), Difficulty::Hard);
        assert_eq!(Difficulty::from_index(99), Difficulty::Medium);
    }

    #[test]
    fn test_base_points_increase_with_difficulty() {
        assert!(Difficulty::Easy.base_points() < Difficulty::Medium.base_points());
        assert!(Difficulty::Medium.base_points() < Difficulty::Hard.base_points());
    }
}
