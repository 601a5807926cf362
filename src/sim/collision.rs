//! Wall and player-ball collision response

use glam::Vec2;

use super::state::{Ball, Field, World};
use crate::contact_angle;

/// Which axes reflected during a wall check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Reflect the ball off any wall its edge has crossed, then clamp it inside.
///
/// Axes are independent: a corner hit flips both components.
pub fn ball_wall_collision(ball: &mut Ball, field: &Field) -> WallHit {
    let r = ball.radius;
    let hit = WallHit {
        x: ball.pos.x - r < 0.0 || ball.pos.x + r > field.width,
        y: ball.pos.y - r < 0.0 || ball.pos.y + r > field.height,
    };

    if hit.x {
        ball.vel.x = -ball.vel.x;
    }
    if hit.y {
        ball.vel.y = -ball.vel.y;
    }
    ball.pos = field.clamp(ball.pos, r);

    hit
}

/// Outcome of the player-ball overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Circles don't overlap
    None,
    /// Kick held: ball launched along the contact angle
    Kicked { angle: f32 },
    /// Passive touch while moving: ball nudged along the move direction
    Pushed { angle: f32 },
    /// Passive touch while standing still: ball velocity untouched
    Touched { angle: f32 },
}

/// Resolve an overlap between player and ball.
///
/// The player (not the ball) is moved back along the contact angle by the
/// overlap. `move_dir` is the normalized move vector, or zero when idle.
pub fn player_ball_collision(
    world: &mut World,
    move_dir: Vec2,
    kick: bool,
    dt_scale: f32,
) -> Contact {
    let kick_speed = world.kick_speed();
    let player = &mut world.player;
    let ball = &mut world.ball;

    let d = ball.pos - player.pos;
    let distance = d.length();
    let min_distance = player.radius + ball.radius;
    if distance >= min_distance {
        return Contact::None;
    }

    let angle = contact_angle(d);
    let normal = Vec2::new(angle.cos(), angle.sin());
    let overlap = min_distance - distance;

    player.pos -= normal * overlap;
    // Pushed off a ball pinned against a wall must not leave the field
    player.pos = world.field.clamp(player.pos, player.radius);

    if kick {
        ball.vel = normal * kick_speed;
        return Contact::Kicked { angle };
    }

    if move_dir == Vec2::ZERO {
        log::trace!("Passive touch with no move direction; ball velocity kept");
        return Contact::Touched { angle };
    }

    let max = world.max_speed;
    let pushed = ball.vel + move_dir * world.push_strength * dt_scale;
    let clamped = Vec2::new(pushed.x.clamp(-max, max), pushed.y.clamp(-max, max));
    if clamped.is_finite() {
        ball.vel = clamped;
        Contact::Pushed { angle }
    } else {
        log::warn!("Dropping non-finite push result {clamped:?}");
        Contact::Touched { angle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PhysicsTuning;

    fn world() -> World {
        World::new(Field::new(800.0, 600.0), &PhysicsTuning::default())
    }

    #[test]
    fn test_ball_reflects_off_right_wall() {
        let field = Field::new(800.0, 600.0);
        let mut ball = Ball::new(Vec2::new(795.0, 300.0), 8.0, 0.98);
        ball.vel = Vec2::new(5.0, 0.0);

        let hit = ball_wall_collision(&mut ball, &field);
        assert!(hit.x && !hit.y);
        assert_eq!(ball.vel, Vec2::new(-5.0, 0.0));
        assert_eq!(ball.pos.x, 792.0);
    }

    #[test]
    fn test_ball_reflects_both_axes_in_corner() {
        let field = Field::new(800.0, 600.0);
        let mut ball = Ball::new(Vec2::new(3.0, 2.0), 8.0, 0.98);
        ball.vel = Vec2::new(-1.0, -2.0);

        let hit = ball_wall_collision(&mut ball, &field);
        assert!(hit.x && hit.y);
        assert_eq!(ball.vel, Vec2::new(1.0, 2.0));
        assert_eq!(ball.pos, Vec2::new(8.0, 8.0));
    }

    #[test]
    fn test_ball_touching_wall_does_not_reflect() {
        let field = Field::new(800.0, 600.0);
        let mut ball = Ball::new(Vec2::new(8.0, 300.0), 8.0, 0.98);
        ball.vel = Vec2::new(-1.0, 0.0);

        let hit = ball_wall_collision(&mut ball, &field);
        assert!(!hit.any());
        assert_eq!(ball.vel.x, -1.0);
    }

    #[test]
    fn test_no_contact_when_apart() {
        let mut w = world();
        w.ball.pos = w.player.pos + Vec2::new(23.0, 0.0);
        let before = w.clone();
        let contact = player_ball_collision(&mut w, Vec2::X, true, 1.0);
        assert_eq!(contact, Contact::None);
        assert_eq!(w, before);
    }

    #[test]
    fn test_kick_overrides_velocity() {
        let mut w = world();
        w.ball.pos = w.player.pos + Vec2::new(0.0, 20.0);
        w.ball.vel = Vec2::new(-4.0, 3.0);

        let contact = player_ball_collision(&mut w, Vec2::ZERO, true, 1.0);
        assert!(matches!(contact, Contact::Kicked { .. }));
        assert!(w.ball.vel.x.abs() < 1e-5);
        assert!((w.ball.vel.y - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_player_pushed_back_ball_stays() {
        let mut w = world();
        let ball_pos = w.player.pos + Vec2::new(20.0, 0.0);
        w.ball.pos = ball_pos;
        let player_before = w.player.pos;

        player_ball_collision(&mut w, Vec2::ZERO, false, 1.0);
        assert_eq!(w.ball.pos, ball_pos);
        // Overlap was 23 - 20 = 3, pushed directly away from the ball
        assert!((w.player.pos.x - (player_before.x - 3.0)).abs() < 1e-4);
        assert!((w.player.pos.y - player_before.y).abs() < 1e-4);
        assert!((w.ball.pos - w.player.pos).length() >= 23.0 - 1e-4);
    }

    #[test]
    fn test_passive_push_follows_move_direction_and_clamps() {
        let mut w = world();
        // Ball below the player, player moving left: push is along -x, not +y
        w.ball.pos = w.player.pos + Vec2::new(0.0, 10.0);
        w.ball.vel = Vec2::new(-4.8, 0.0);

        let contact = player_ball_collision(&mut w, Vec2::NEG_X, false, 1.0);
        assert!(matches!(contact, Contact::Pushed { .. }));
        assert_eq!(w.ball.vel, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_passive_push_clamps_each_axis() {
        let mut w = world();
        w.ball.pos = w.player.pos + Vec2::new(10.0, 0.0);
        w.ball.vel = Vec2::new(7.0, -9.0);
        let dir = Vec2::new(1.0, 1.0).normalize();

        player_ball_collision(&mut w, dir, false, 1.0);
        assert_eq!(w.ball.vel.x, 5.0);
        assert!(w.ball.vel.y >= -5.0 && w.ball.vel.y <= 5.0);
    }

    #[test]
    fn test_stationary_touch_keeps_velocity_finite() {
        let mut w = world();
        w.ball.vel = Vec2::new(7.0, 0.0);

        let contact = player_ball_collision(&mut w, Vec2::ZERO, false, 1.0);
        assert!(matches!(contact, Contact::Touched { .. }));
        assert_eq!(w.ball.vel, Vec2::new(7.0, 0.0));
        assert!(w.ball.vel.is_finite());
    }

    #[test]
    fn test_coincident_centers_kick_along_positive_x() {
        let mut w = world();
        let contact = player_ball_collision(&mut w, Vec2::ZERO, true, 1.0);
        assert_eq!(contact, Contact::Kicked { angle: 0.0 });
        assert_eq!(w.ball.vel, Vec2::new(7.5, 0.0));
        assert_eq!(w.player.pos, Vec2::new(377.0, 300.0));
    }

    #[test]
    fn test_pushback_never_leaves_field() {
        let mut w = world();
        w.ball.pos = Vec2::new(20.0, 300.0);
        w.player.pos = Vec2::new(15.0, 300.0);
        player_ball_collision(&mut w, Vec2::ZERO, false, 1.0);
        assert!(w.player.pos.x >= w.player.radius);
    }
}
