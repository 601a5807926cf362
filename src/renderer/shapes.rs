//! Tessellation of draw commands into colored triangles

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::DrawCmd;
use super::vertex::Vertex;

/// Circle segment count, scaled with radius so small circles stay cheap
fn circle_segments(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(16, 96)
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
        color,
    )
}

/// Generate vertices for a thick line segment with flat ends
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(from + perp, to + perp, to - perp, from - perp, color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

/// Flatten a draw list into one triangle list (field coordinates).
///
/// `Clear` produces no geometry; the render pass clears instead.
pub fn tessellate(cmds: &[DrawCmd]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cmd in cmds {
        match *cmd {
            DrawCmd::Clear => {}
            DrawCmd::FillRect { min, max, color } => vertices.extend(rect(min, max, color)),
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend(line(from, to, width, color)),
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => vertices.extend(circle(center, radius, color, circle_segments(radius))),
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertices_on_rim() {
        let verts = circle(Vec2::new(10.0, 20.0), 5.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 20.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position) - Vec2::new(10.0, 20.0);
                assert!((d.length() - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_line_width() {
        let verts = line(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0), 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|&x| (x - 4.0).abs() < 1e-6 || (x - 6.0).abs() < 1e-6));
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_tessellate_skips_clear() {
        let cmds = [
            DrawCmd::Clear,
            DrawCmd::FillRect {
                min: Vec2::ZERO,
                max: Vec2::ONE,
                color: [1.0; 4],
            },
        ];
        assert_eq!(tessellate(&cmds).len(), 6);
    }
}
