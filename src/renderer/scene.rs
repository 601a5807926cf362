//! Frame description: what to draw, independent of the backend

use glam::Vec2;

use crate::settings::Palette;
use crate::sim::World;

/// A single drawing operation, in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    /// Reset every pixel to transparent black
    Clear,
    FillRect { min: Vec2, max: Vec2, color: [f32; 4] },
    Line { from: Vec2, to: Vec2, width: f32, color: [f32; 4] },
    FillCircle { center: Vec2, radius: f32, color: [f32; 4] },
}

/// Build the draw list for the current world: field, halfway line, ball, player.
///
/// Back to front; later commands paint over earlier ones.
pub fn build_scene(world: &World, palette: &Palette) -> Vec<DrawCmd> {
    let size = world.field.size();
    let half_x = size.x / 2.0;

    vec![
        DrawCmd::Clear,
        DrawCmd::FillRect {
            min: Vec2::ZERO,
            max: size,
            color: palette.field,
        },
        DrawCmd::Line {
            from: Vec2::new(half_x, 0.0),
            to: Vec2::new(half_x, size.y),
            width: palette.halfway_line_width,
            color: palette.halfway_line,
        },
        DrawCmd::FillCircle {
            center: world.ball.pos,
            radius: world.ball.radius,
            color: palette.ball,
        },
        DrawCmd::FillCircle {
            center: world.player.pos,
            radius: world.player.radius,
            color: palette.player,
        },
    ]
}
