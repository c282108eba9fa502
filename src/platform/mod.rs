//! Platform abstraction layer
//!
//! The simulation talks to the outside world through three narrow traits:
//! - `InputSource`: discrete events drained once per frame
//! - `Renderer`: immediate-mode draw commands, presented once per frame
//! - `AudioSink`: fire-and-forget sound cues
//!
//! `terminal` provides the crossterm-backed input source and the scoped
//! terminal session guard.

pub mod terminal;

use std::io;

use glam::Vec2;

use crate::assets::Sprite;
use crate::sim::Rect;

pub use terminal::{TerminalGuard, TerminalInput};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Jump,
    Restart,
    /// Anything else; ignored by the game
    Other,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close / interrupt
    Quit,
    KeyDown(Key),
}

/// Source of input events
pub trait InputSource {
    /// Append every event that arrived since the last call to `out`.
    /// Must not block.
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> io::Result<()>;
}

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The run just ended
    GameOver,
    /// A wall was passed
    Score,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::GameOver => "game_over",
            Cue::Score => "score",
        }
    }
}

/// Fire-and-forget audio output
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const LIGHT_GREY: Color = Color::new(200, 200, 200);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Immediate-mode drawing in world coordinates
pub trait Renderer {
    /// Fill the whole frame
    fn clear(&mut self, color: Color);
    /// Draw a sprite with its top-left corner at `pos`, at its native size
    fn draw_image(&mut self, sprite: &Sprite, pos: Vec2);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw text with its top-left corner at `pos`; `size` is the line height
    fn draw_text(&mut self, text: &str, size: f32, color: Color, pos: Vec2);
    /// Width `text` would occupy at `size`, for centering
    fn text_width(&self, text: &str, size: f32) -> f32;
    /// Show the finished frame
    fn present(&mut self) -> io::Result<()>;
}
