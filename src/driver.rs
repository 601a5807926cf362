//! Frame driver
//!
//! Owns the session (input table + world) and runs physics then render once
//! per display tick. There is a single running state; the host stops the
//! loop by dropping the driver.

use glam::Vec2;

use crate::input::InputState;
use crate::renderer::{DrawCmd, Framebuffer, RenderState, build_scene};
use crate::settings::{PhysicsTuning, Settings};
use crate::sim::{Contact, Field, StepEvents, World, tick};

/// Something a finished frame can be drawn onto
pub trait Present {
    fn present(&mut self, scene: &[DrawCmd]);
}

impl Present for Framebuffer {
    fn present(&mut self, scene: &[DrawCmd]) {
        self.draw(scene);
    }
}

impl Present for RenderState {
    fn present(&mut self, scene: &[DrawCmd]) {
        match self.render(scene) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, reconfiguring");
                self.resize(self.size.0, self.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

/// Everything one frame reads and writes
#[derive(Debug, Clone)]
pub struct Session {
    pub world: World,
    pub input: InputState,
}

impl Session {
    pub fn new(field: Field, tuning: &PhysicsTuning) -> Self {
        Self {
            world: World::new(field, tuning),
            input: InputState::new(),
        }
    }
}

/// Summary of one driven frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub dt_scale: f32,
    pub events: StepEvents,
    /// Rolling estimate over the last `FPS_WINDOW` frames (0 until known)
    pub fps: u32,
}

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

pub struct FrameDriver {
    session: Session,
    settings: Settings,
    last_time_ms: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl FrameDriver {
    /// Field size comes from the host surface. A surface too small to hold
    /// the larger circle is widened to fit it.
    pub fn new(width: f32, height: f32, settings: Settings) -> Self {
        let field = fit_field(width, height, &settings.physics);
        log::info!(
            "Field {}x{}, timing {:?}",
            field.width,
            field.height,
            settings.timing
        );
        Self {
            session: Session::new(field, &settings.physics),
            settings,
            last_time_ms: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.session.world
    }

    /// Write side for input adapters
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.session.input
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Physics only
    pub fn step(&mut self, dt_scale: f32) -> FrameReport {
        let Session { world, input } = &mut self.session;
        let events = tick(world, input, dt_scale);

        if self.settings.log_events {
            log_events(world, &events);
        }

        FrameReport {
            frame: world.frame,
            dt_scale,
            events,
            fps: self.fps,
        }
    }

    /// Draw list for the current world
    pub fn scene(&self) -> Vec<DrawCmd> {
        build_scene(&self.session.world, &self.settings.palette)
    }

    /// One full frame: physics step, then render
    pub fn frame(&mut self, dt_scale: f32, target: &mut impl Present) -> FrameReport {
        let report = self.step(dt_scale);
        target.present(&self.scene());
        report
    }

    /// Animation-frame callback. `time_ms` is the host's frame timestamp;
    /// the configured timing mode turns it into a dt_scale.
    pub fn on_animation_frame(&mut self, time_ms: f64, target: &mut impl Present) -> FrameReport {
        let elapsed_s = match self.last_time_ms {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 1.0 / crate::consts::REFERENCE_HZ,
        };
        self.last_time_ms = Some(time_ms);
        self.track_fps(time_ms);

        let dt_scale = self.settings.timing.dt_scale(elapsed_s);
        let report = self.frame(dt_scale, target);
        if report.frame % FPS_WINDOW as u64 == 0 && report.fps > 0 {
            log::debug!("frame {}: {} fps", report.frame, report.fps);
        }
        report
    }

    fn track_fps(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

fn fit_field(width: f32, height: f32, tuning: &PhysicsTuning) -> Field {
    let min = 2.0 * tuning.player_radius.max(tuning.ball_radius);
    let fit = |v: f32| if v.is_finite() && v >= min { v } else { min };
    let field = Field::new(fit(width), fit(height));
    if field.width != width || field.height != height {
        log::warn!(
            "Surface {width}x{height} cannot hold a {min} wide circle, using {}x{}",
            field.width,
            field.height
        );
    }
    field
}

fn log_events(world: &World, events: &StepEvents) {
    if events.wall.any() {
        log::debug!(
            "frame {}: ball off wall at {:?}, vel {:?}",
            world.frame,
            world.ball.pos,
            world.ball.vel
        );
    }
    match events.contact {
        Contact::None => {}
        Contact::Kicked { angle } => log::debug!(
            "frame {}: kick at {:.1} deg, ball vel {:?}",
            world.frame,
            angle.to_degrees(),
            world.ball.vel
        ),
        Contact::Pushed { .. } => log::trace!(
            "frame {}: push, ball vel {:?}",
            world.frame,
            world.ball.vel
        ),
        Contact::Touched { .. } => log::trace!(
            "frame {}: touch, player at {:?}",
            world.frame,
            world.player.pos
        ),
    }
}

/// Field size used when the host has no opinion
pub fn default_field() -> Vec2 {
    Vec2::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
}
