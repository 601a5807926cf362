//! Entity model: the player, the ball and the field they share

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_to_field;
use crate::settings::PhysicsTuning;

/// The controllable circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Displacement per reference frame
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self { pos, radius, speed }
    }
}

/// The ball: coasts under friction, bounces off walls, gets pushed and kicked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Velocity multiplier per reference frame, in (0, 1]
    pub friction: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, friction: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            friction,
        }
    }
}

/// Rectangular play area, origin top-left, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Clamp a circle center so the circle lies fully inside
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        clamp_to_field(pos, radius, self.size())
    }

    /// True if the whole circle lies inside the field
    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }
}

/// Everything the physics step mutates and the renderer reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub field: Field,
    pub player: Player,
    pub ball: Ball,
    /// Per-axis cap for passive pushes
    pub max_speed: f32,
    pub kick_multiplier: f32,
    pub push_strength: f32,
    /// Steps taken since creation
    pub frame: u64,
}

impl World {
    /// Both entities start at the field center, ball at rest
    pub fn new(field: Field, tuning: &PhysicsTuning) -> Self {
        let center = field.center();
        Self {
            field,
            player: Player::new(center, tuning.player_radius, tuning.player_speed),
            ball: Ball::new(center, tuning.ball_radius, tuning.ball_friction),
            max_speed: tuning.max_speed,
            kick_multiplier: tuning.kick_multiplier,
            push_strength: tuning.push_strength,
            frame: 0,
        }
    }

    pub fn kick_speed(&self) -> f32 {
        self.max_speed * self.kick_multiplier
    }

    /// Both circles fully inside the field
    pub fn in_bounds(&self) -> bool {
        self.field.contains(self.player.pos, self.player.radius)
            && self.field.contains(self.ball.pos, self.ball.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_starts_centered_at_rest() {
        let world = World::new(Field::new(800.0, 600.0), &PhysicsTuning::default());
        assert_eq!(world.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(world.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(world.ball.vel, Vec2::ZERO);
        assert_eq!(world.frame, 0);
        assert!(world.in_bounds());
    }

    #[test]
    fn test_field_contains_edges() {
        let field = Field::new(100.0, 50.0);
        assert!(field.contains(Vec2::new(10.0, 10.0), 10.0));
        assert!(field.contains(Vec2::new(90.0, 40.0), 10.0));
        assert!(!field.contains(Vec2::new(9.9, 25.0), 10.0));
        assert!(!field.contains(Vec2::new(50.0, 40.1), 10.0));
    }
}
