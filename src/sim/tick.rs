//! Per-frame physics step
//!
//! The stages run in a fixed order; later stages read what earlier ones wrote.

use glam::Vec2;

use super::collision::{Contact, WallHit, ball_wall_collision, player_ball_collision};
use super::state::World;
use crate::input::InputState;

/// What happened during one step (for logging and hosts)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvents {
    pub wall: WallHit,
    pub contact: Contact,
}

impl Default for StepEvents {
    fn default() -> Self {
        Self {
            wall: WallHit::default(),
            contact: Contact::None,
        }
    }
}

/// Normalized move direction from the pressed directions, or zero
pub fn move_direction(input: &InputState) -> Vec2 {
    // normalize_or_zero keeps diagonals at unit length
    input.move_axes().normalize_or_zero()
}

/// Advance the world by one step.
///
/// `dt_scale` is the number of reference frames this step covers; 1.0
/// reproduces the display-coupled behavior (one frame's worth of motion per
/// call). The input table is copied up front so adapters writing during the
/// step can't tear it.
pub fn tick(world: &mut World, input: &InputState, dt_scale: f32) -> StepEvents {
    let input = input.snapshot();
    let dt_scale = if dt_scale.is_finite() { dt_scale.max(0.0) } else { 0.0 };

    // 1. Move the player along the normalized input direction
    let move_dir = move_direction(&input);
    if move_dir != Vec2::ZERO {
        world.player.pos += move_dir * world.player.speed * dt_scale;
    }

    // 2. Walls stop the player dead
    world.player.pos = world.field.clamp(world.player.pos, world.player.radius);

    // 3. Friction, then coast
    let ball = &mut world.ball;
    ball.vel *= ball.friction.powf(dt_scale);
    ball.pos += ball.vel * dt_scale;

    // 4. Ball off the walls
    let wall = ball_wall_collision(&mut world.ball, &world.field);

    // 5. Player against ball
    let contact = player_ball_collision(world, move_dir, input.kick(), dt_scale);

    world.frame += 1;

    StepEvents { wall, contact }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use crate::settings::PhysicsTuning;
    use crate::sim::state::Field;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(Field::new(800.0, 600.0), &PhysicsTuning::default())
    }

    fn pressed(actions: &[Action]) -> InputState {
        let mut input = InputState::new();
        for &a in actions {
            input.set_pressed(a, true);
        }
        input
    }

    /// Park the ball in a far corner so it can't interfere
    fn ball_out_of_the_way(w: &mut World) {
        w.ball.pos = Vec2::new(700.0, 500.0);
        w.ball.vel = Vec2::ZERO;
    }

    #[test]
    fn test_idle_player_stays_put() {
        let mut w = world();
        ball_out_of_the_way(&mut w);
        let start = w.player.pos;
        tick(&mut w, &InputState::new(), 1.0);
        assert_eq!(w.player.pos, start);
        assert_eq!(w.frame, 1);
    }

    #[test]
    fn test_diagonal_is_not_faster() {
        let mut w = world();
        ball_out_of_the_way(&mut w);
        let start = w.player.pos;
        tick(&mut w, &pressed(&[Action::Up, Action::Right]), 1.0);
        let moved = w.player.pos - start;
        assert!((moved.length() - w.player.speed).abs() < 1e-4);
        assert!(moved.x > 0.0 && moved.y < 0.0);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut w = world();
        ball_out_of_the_way(&mut w);
        let start = w.player.pos;
        tick(&mut w, &pressed(&[Action::Left, Action::Right]), 1.0);
        assert_eq!(w.player.pos, start);
    }

    #[test]
    fn test_player_stops_at_wall() {
        let mut w = world();
        ball_out_of_the_way(&mut w);
        w.player.pos = Vec2::new(16.0, 300.0);
        tick(&mut w, &pressed(&[Action::Left]), 1.0);
        assert_eq!(w.player.pos.x, w.player.radius);
    }

    #[test]
    fn test_friction_decay() {
        let mut w = world();
        w.player.pos = Vec2::new(100.0, 100.0);
        w.ball.pos = Vec2::new(400.0, 300.0);
        w.ball.vel = Vec2::new(2.0, -1.0);
        let v0 = w.ball.vel.length();

        for n in 1..=20 {
            tick(&mut w, &InputState::new(), 1.0);
            let expected = v0 * 0.98_f32.powi(n);
            assert!((w.ball.vel.length() - expected).abs() < 1e-4);
            assert!(w.ball.vel.x > 0.0 && w.ball.vel.y < 0.0);
        }
    }

    #[test]
    fn test_wall_reflection_within_one_frame() {
        let mut w = world();
        w.player.pos = Vec2::new(100.0, 100.0);
        w.ball.friction = 1.0;
        w.ball.pos = Vec2::new(788.0, 300.0);
        w.ball.vel = Vec2::new(5.0, 0.0);

        let events = tick(&mut w, &InputState::new(), 1.0);
        assert!(events.wall.x);
        assert_eq!(w.ball.vel, Vec2::new(-5.0, 0.0));
        assert_eq!(w.ball.pos.x, 792.0);
    }

    #[test]
    fn test_kick_from_initial_state() {
        let mut w = world();
        let events = tick(&mut w, &pressed(&[Action::Kick]), 1.0);
        assert_eq!(events.contact, Contact::Kicked { angle: 0.0 });
        assert_eq!(w.ball.vel, Vec2::new(7.5, 0.0));
    }

    #[test]
    fn test_stationary_overlap_stays_finite() {
        let mut w = world();
        for _ in 0..50 {
            tick(&mut w, &InputState::new(), 1.0);
            assert!(w.ball.vel.is_finite());
            assert!(w.ball.pos.is_finite());
        }
    }

    #[test]
    fn test_half_step_moves_half_as_far() {
        let mut w = world();
        ball_out_of_the_way(&mut w);
        let start = w.player.pos;
        tick(&mut w, &pressed(&[Action::Down]), 0.5);
        assert!((w.player.pos.y - start.y - 1.25).abs() < 1e-5);
    }

    #[test]
    fn test_non_finite_dt_scale_is_ignored() {
        let mut w = world();
        ball_out_of_the_way(&mut w);
        let before = w.player.pos;
        tick(&mut w, &pressed(&[Action::Down]), f32::NAN);
        assert_eq!(w.player.pos, before);
        assert!(w.ball.vel.is_finite());
    }

    fn arb_input() -> impl Strategy<Value = InputState> {
        prop::collection::vec(any::<bool>(), 5).prop_map(|bits| {
            let mut input = InputState::new();
            for (action, on) in Action::ALL.into_iter().zip(bits) {
                input.set_pressed(action, on);
            }
            input
        })
    }

    proptest! {
        #[test]
        fn prop_entities_stay_in_bounds(
            inputs in prop::collection::vec(arb_input(), 1..200),
            bx in 8.0f32..792.0,
            by in 8.0f32..592.0,
            vx in -7.5f32..7.5,
            vy in -7.5f32..7.5,
        ) {
            let mut w = world();
            w.ball.pos = Vec2::new(bx, by);
            w.ball.vel = Vec2::new(vx, vy);
            for input in &inputs {
                tick(&mut w, input, 1.0);
                prop_assert!(w.in_bounds(), "out of bounds at frame {}: {:?}", w.frame, w);
                prop_assert!(w.ball.vel.is_finite());
            }
        }

        #[test]
        fn prop_move_direction_is_unit_or_zero(input in arb_input()) {
            let dir = move_direction(&input);
            prop_assert!(dir == Vec2::ZERO || (dir.length() - 1.0).abs() < 1e-6);
        }
    }
}
