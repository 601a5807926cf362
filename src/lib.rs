//! Kickabout - a single-player ball field
//!
//! Core modules:
//! - `input`: Action table written by keyboard/touch adapters
//! - `sim`: Per-frame physics (player movement, ball friction, walls, kicks)
//! - `renderer`: Draw list, CPU raster surface and WebGPU presenter
//! - `driver`: Frame loop glue (step then render, every display tick)
//! - `platform`: Browser/native environment queries
//! - `settings`: Data-driven tuning and palette

pub mod driver;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, FrameReport, Session};
pub use input::{Action, InputState};
pub use settings::{FrameTiming, Palette, PhysicsTuning, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default field size (the canvas normally supplies this)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Displacement per reference frame
    pub const PLAYER_SPEED: f32 = 2.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Velocity multiplier applied once per reference frame
    pub const BALL_FRICTION: f32 = 0.98;
    /// Per-axis cap for passive pushes; kicks launch at a multiple of it
    pub const MAX_SPEED: f32 = 5.0;
    pub const KICK_MULTIPLIER: f32 = 1.5;
    /// Velocity added along the move direction on a passive touch
    pub const PUSH_STRENGTH: f32 = 0.5;

    /// Refresh rate one reference frame corresponds to
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Largest dt_scale accepted in elapsed-time mode (tab switches, hitches)
    pub const MAX_DT_SCALE: f32 = 4.0;
}

/// Clamp a circle center so the whole circle stays inside `[0, size.x] x [0, size.y]`
#[inline]
pub fn clamp_to_field(pos: Vec2, radius: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.max(radius).min(size.x - radius),
        pos.y.max(radius).min(size.y - radius),
    )
}

/// Angle of a vector, with the zero vector mapped to 0 radians
#[inline]
pub fn contact_angle(d: Vec2) -> f32 {
    if d == Vec2::ZERO { 0.0 } else { d.y.atan2(d.x) }
}
