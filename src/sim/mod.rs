//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - State is passed in explicitly (no globals)
//! - Input is read from a snapshot taken at step start
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Contact, WallHit, ball_wall_collision, player_ball_collision};
pub use state::{Ball, Field, Player, World};
pub use tick::{StepEvents, move_direction, tick};
