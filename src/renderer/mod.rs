//! Rendering module
//!
//! `scene` turns the world into a backend-neutral draw list. Backends:
//! - `raster`: CPU framebuffer (native, headless, tests)
//! - `pipeline`: WebGPU presenter, fed by `shapes` tessellation

pub mod pipeline;
pub mod raster;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use raster::{Framebuffer, RasterError};
pub use scene::{DrawCmd, build_scene};
pub use vertex::Vertex;
