//! Obstacle behavior: interaction with the snake head and time-driven movement.

use super::types::*;
use crate::core::constants::DEFAULT_SPEED_BOOST;
use crate::core::Point;

impl Obstacle {
    pub fn position(&self) -> Point {
        match self {
            Self::Static(o) => o.position,
            Self::Destructible(o) => o.position,
            Self::Dynamic(o) => o.position,
            Self::SpecialEffect(o) => o.position,
        }
    }

    pub fn obstacle_type(&self) -> ObstacleType {
        match self {
            Self::Static(_) => ObstacleType::Static,
            Self::Destructible(_) => ObstacleType::Destructible,
            Self::Dynamic(_) => ObstacleType::Dynamic,
            Self::SpecialEffect(o) => o.effect,
        }
    }

    /// Resolves the snake head entering this obstacle's cell. Destructible
    /// walls consume a pass on every call, so call this once per entry.
    pub fn interact(&mut self) -> ObstacleInteractionResult {
        match self {
            Self::Static(_) | Self::Dynamic(_) => ObstacleInteractionResult::deadly(),
            Self::Destructible(o) => o.interact(),
            Self::SpecialEffect(o) => o.interact(),
        }
    }

    /// Whether [`Obstacle::interact`] would kill the snake, without consuming
    /// anything.
    pub fn is_deadly(&self) -> bool {
        matches!(self, Self::Static(_) | Self::Dynamic(_))
    }

    /// Advances time-driven obstacles. No-op for everything but dynamic walls.
    pub fn update(&mut self, grid_width: i32, grid_height: i32, now_ms: i64) {
        if let Self::Dynamic(o) = self {
            o.update(grid_width, grid_height, now_ms);
        }
    }

    /// Restarts the movement timer of dynamic walls from `now_ms`.
    pub fn reset_timer(&mut self, now_ms: i64) {
        if let Self::Dynamic(o) = self {
            o.last_move_ms = now_ms;
        }
    }
}

impl DestructibleObstacle {
    pub fn interact(&mut self) -> ObstacleInteractionResult {
        self.remaining_passes = self.remaining_passes.saturating_sub(1);
        if self.remaining_passes == 0 {
            ObstacleInteractionResult::remove_after_pass()
        } else {
            ObstacleInteractionResult {
                message: format!("{} passes left", self.remaining_passes),
                ..ObstacleInteractionResult::pass_through()
            }
        }
    }
}

impl DynamicObstacle {
    /// Steps one point along the path once `move_interval_ms` has elapsed.
    /// Out-of-grid path points are skipped, but the path index still advances.
    pub fn update(&mut self, grid_width: i32, grid_height: i32, now_ms: i64) {
        if self.path.is_empty() || now_ms - self.last_move_ms < self.move_interval_ms {
            return;
        }
        self.last_move_ms = now_ms;

        self.current_path_index += 1;
        if self.current_path_index >= self.path.len() {
            if self.loop_path {
                self.current_path_index = 0;
            } else {
                // End of a one-way path: park on the last point.
                self.current_path_index = self.path.len() - 1;
                return;
            }
        }

        let target = self.path[self.current_path_index];
        if target.in_bounds(grid_width, grid_height) {
            self.position = target;
        } else {
            tracing::trace!(x = target.x, y = target.y, "moving wall skipped off-grid path point");
        }
    }
}

impl SpecialEffectObstacle {
    pub fn interact(&self) -> ObstacleInteractionResult {
        match self.effect {
            ObstacleType::SpeedUp => {
                let amount = if self.speed_change_amount != 0 {
                    self.speed_change_amount
                } else {
                    DEFAULT_SPEED_BOOST
                };
                ObstacleInteractionResult::speed_boost(amount)
            }
            ObstacleType::SpeedDown => {
                let amount = if self.speed_change_amount != 0 {
                    self.speed_change_amount
                } else {
                    -DEFAULT_SPEED_BOOST
                };
                ObstacleInteractionResult::speed_boost(amount)
            }
            ObstacleType::ScoreMultiplier => {
                ObstacleInteractionResult::multiply_score(self.score_multiplier_value)
            }
            ObstacleType::Teleport => match self.teleport_destination {
                Some(target) => ObstacleInteractionResult::teleport(target),
                None => ObstacleInteractionResult::pass_through(),
            },
            // Non-effect tag on an effect tile: harmless.
            ObstacleType::Static | ObstacleType::Destructible | ObstacleType::Dynamic => {
                ObstacleInteractionResult::pass_through()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_static_is_deadly() {
        let mut wall = Obstacle::wall(p(1, 1));
        assert!(wall.is_deadly());
        let r = wall.interact();
        assert!(r.is_deadly);
        assert!(!r.can_pass_through);
    }

    #[test]
    fn test_destructible_counts_down_then_removes() {
        let mut wall = Obstacle::destructible(p(1, 1), 3);
        assert!(!wall.is_deadly());

        let first = wall.interact();
        assert!(first.can_pass_through && !first.should_remove);
        let second = wall.interact();
        assert!(second.can_pass_through && !second.should_remove);
        let third = wall.interact();
        assert!(third.can_pass_through && third.should_remove);

        match wall {
            Obstacle::Destructible(d) => assert_eq!(d.remaining_passes, 0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_destructible_with_zero_passes_removes_immediately() {
        let mut wall = DestructibleObstacle::new(p(0, 0), 0);
        let r = wall.interact();
        assert!(r.should_remove);
        assert_eq!(wall.remaining_passes, 0);
    }

    #[test]
    fn test_is_deadly_does_not_consume_passes() {
        let wall = Obstacle::destructible(p(1, 1), 1);
        for _ in 0..5 {
            assert!(!wall.is_deadly());
        }
        match wall {
            Obstacle::Destructible(d) => assert_eq!(d.remaining_passes, 1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dynamic_is_deadly_regardless_of_phase() {
        let mut wall = Obstacle::dynamic(p(1, 1), vec![p(1, 1), p(2, 1)]);
        assert!(wall.interact().is_deadly);
        wall.update(10, 10, 10_000);
        assert!(wall.interact().is_deadly);
    }

    #[test]
    fn test_dynamic_waits_for_interval() {
        let mut wall = DynamicObstacle::new(p(1, 1), vec![p(1, 1), p(2, 1), p(3, 1)]);
        wall.last_move_ms = 1_000;

        wall.update(10, 10, 1_499);
        assert_eq!(wall.position, p(1, 1));

        wall.update(10, 10, 1_500);
        assert_eq!(wall.position, p(2, 1));
        assert_eq!(wall.current_path_index, 1);

        // Timer restarted from the step
        wall.update(10, 10, 1_800);
        assert_eq!(wall.position, p(2, 1));
        wall.update(10, 10, 2_000);
        assert_eq!(wall.position, p(3, 1));
    }

    #[test]
    fn test_dynamic_loops() {
        let mut wall = DynamicObstacle::new(p(1, 1), vec![p(1, 1), p(2, 1)]).with_interval(100);
        wall.update(10, 10, 100);
        assert_eq!(wall.position, p(2, 1));
        wall.update(10, 10, 200);
        assert_eq!(wall.position, p(1, 1));
        assert_eq!(wall.current_path_index, 0);
    }

    #[test]
    fn test_dynamic_stops_at_end_without_loop() {
        let mut wall = DynamicObstacle::new(p(1, 1), vec![p(1, 1), p(2, 1)])
            .with_interval(100)
            .with_loop(false);
        wall.update(10, 10, 100);
        assert_eq!(wall.position, p(2, 1));
        wall.update(10, 10, 200);
        wall.update(10, 10, 300);
        assert_eq!(wall.position, p(2, 1));
        assert_eq!(wall.current_path_index, 1);
    }

    #[test]
    fn test_dynamic_skips_off_grid_point_but_advances_index() {
        let mut wall =
            DynamicObstacle::new(p(1, 1), vec![p(1, 1), p(50, 1), p(3, 1)]).with_interval(100);
        wall.update(10, 10, 100);
        assert_eq!(wall.position, p(1, 1));
        assert_eq!(wall.current_path_index, 1);
        // Next step goes to the following point, not a retry of the skipped one
        wall.update(10, 10, 200);
        assert_eq!(wall.position, p(3, 1));
        assert_eq!(wall.current_path_index, 2);
    }

    #[test]
    fn test_update_is_noop_for_static_walls() {
        let mut wall = Obstacle::wall(p(4, 4));
        wall.update(10, 10, 1_000_000);
        assert_eq!(wall.position(), p(4, 4));
    }

    #[test]
    fn test_reset_timer() {
        let mut wall = Obstacle::dynamic(p(1, 1), vec![p(1, 1), p(2, 1)]);
        wall.reset_timer(10_000);
        wall.update(10, 10, 10_100);
        assert_eq!(wall.position(), p(1, 1));
        wall.update(10, 10, 10_500);
        assert_eq!(wall.position(), p(2, 1));
    }

    #[test]
    fn test_speed_effects_use_defaults_when_unset() {
        let up = SpecialEffectObstacle::new(p(0, 0), ObstacleType::SpeedUp);
        assert_eq!(up.interact().speed_change, 2);
        let down = SpecialEffectObstacle::new(p(0, 0), ObstacleType::SpeedDown);
        assert_eq!(down.interact().speed_change, -2);
    }

    #[test]
    fn test_speed_effects_use_configured_amount() {
        assert_eq!(Obstacle::speed_up(p(0, 0), 4).interact().speed_change, 4);
        assert_eq!(Obstacle::speed_down(p(0, 0), 5).interact().speed_change, -5);
    }

    #[test]
    fn test_score_multiplier_result() {
        let r = Obstacle::score_multiplier(p(0, 0), 3).interact();
        assert_eq!(r.score_multiplier, 3);
        assert!(r.can_pass_through);
        assert!(!r.is_deadly);
    }

    #[test]
    fn test_teleport_with_and_without_destination() {
        let r = Obstacle::teleport(p(0, 0), p(7, 8)).interact();
        assert_eq!(r.teleport_target, Some(p(7, 8)));

        let bare = SpecialEffectObstacle::new(p(0, 0), ObstacleType::Teleport);
        let r = bare.interact();
        assert!(r.can_pass_through);
        assert!(r.teleport_target.is_none());
    }

    #[test]
    fn test_effect_tile_with_non_effect_tag_is_harmless() {
        let odd = SpecialEffectObstacle::new(p(0, 0), ObstacleType::Static);
        let r = odd.interact();
        assert!(!r.is_deadly);
        assert!(r.can_pass_through);
        assert!(!Obstacle::SpecialEffect(odd).is_deadly());
    }
}
