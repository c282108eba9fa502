//! Rendering module
//!
//! `scene` decides what to draw for a session; `pixel` rasterizes those
//! commands onto a half-block terminal grid.

pub mod pixel;
pub mod scene;

pub use pixel::{PixelBuf, PixelRenderer};
pub use scene::draw_scene;
