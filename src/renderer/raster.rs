//! CPU raster surface
//!
//! RGBA8 framebuffer that executes a draw list directly. Used natively
//! (headless runs, snapshots) and in tests. Pixel (x, y) covers
//! `[x, x+1) x [y, y+1)` and is sampled at its center.

use std::fmt;

use glam::Vec2;

use super::scene::DrawCmd;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("raster surface must be non-empty, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}

/// Convert a 0..=1 color to 8-bit RGBA
pub fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Fixed-size RGBA8 pixel buffer, row-major, origin top-left
#[derive(Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![[0; 4]; (width as usize) * (height as usize)],
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Execute a draw list in order
    pub fn draw(&mut self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            match *cmd {
                DrawCmd::Clear => self.clear(),
                DrawCmd::FillRect { min, max, color } => self.fill_rect(min, max, color),
                DrawCmd::Line {
                    from,
                    to,
                    width,
                    color,
                } => self.line(from, to, width, color),
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => self.fill_circle(center, radius, color),
            }
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, color: [f32; 4]) {
        self.fill_where(min, max, color, |p| {
            p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
        });
    }

    /// Thick segment with flat ends
    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        let half = width / 2.0;
        let seg = to - from;
        let len_sq = seg.length_squared();
        let pad = Vec2::splat(half);
        self.fill_where(from.min(to) - pad, from.max(to) + pad, color, |p| {
            if len_sq == 0.0 {
                return false;
            }
            let t = (p - from).dot(seg) / len_sq;
            (0.0..=1.0).contains(&t) && (from + seg * t).distance(p) <= half
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let pad = Vec2::splat(radius);
        let r_sq = radius * radius;
        self.fill_where(center - pad, center + pad, color, |p| {
            p.distance_squared(center) <= r_sq
        });
    }

    /// Blend `color` over every pixel in the box whose center passes `inside`
    fn fill_where(&mut self, min: Vec2, max: Vec2, color: [f32; 4], inside: impl Fn(Vec2) -> bool) {
        if !(min.is_finite() && max.is_finite()) {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if inside(p) {
                    let idx = (y * self.width + x) as usize;
                    self.pixels[idx] = blend(self.pixels[idx], color);
                }
            }
        }
    }

    /// Binary PPM (P6) image, alpha dropped
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.pixels.len() * 3);
        for px in &self.pixels {
            out.extend_from_slice(&px[..3]);
        }
        out
    }
}

/// Source-over blend of a 0..=1 color onto an 8-bit pixel
fn blend(dst: [u8; 4], src: [f32; 4]) -> [u8; 4] {
    let a = src[3].clamp(0.0, 1.0);
    if a >= 1.0 {
        return to_rgba8(src);
    }
    let d = dst.map(|c| c as f32 / 255.0);
    let out_a = a + d[3] * (1.0 - a);
    let mix = |s: f32, d: f32| s.clamp(0.0, 1.0) * a + d * (1.0 - a);
    to_rgba8([mix(src[0], d[0]), mix(src[1], d[1]), mix(src[2], d[2]), out_a])
}
