//! Half-block pixel renderer for the terminal
//!
//! Each terminal cell shows two vertically stacked pixels using '▀' with the
//! foreground as the upper pixel and the background as the lower one. World
//! coordinates are scaled to fit the pixel grid.

use std::io::{self, Write};

use crossterm::style::{self, Color as TermColor};
use crossterm::{QueueableCommand, cursor, terminal};
use glam::Vec2;

use crate::assets::Sprite;
use crate::platform::{Color, Renderer};
use crate::sim::{Rect, World};

/// Glyph cell size of the bitmap font (3x5 plus one column of spacing)
const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;
const GLYPH_ADVANCE: i32 = GLYPH_W + 1;

/// Fallback when the terminal size cannot be queried
const DEFAULT_TERM_SIZE: (u16, u16) = (120, 40);

/// Pixel grid, two pixels per terminal row
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuf {
    width: usize,
    height: usize,
    px: Vec<Color>,
}

impl PixelBuf {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            px: vec![Color::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.px.resize(width * height, Color::BLACK);
    }

    pub fn fill(&mut self, color: Color) {
        self.px.fill(color);
    }

    /// Out-of-range writes are ignored
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.px[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.width + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set(px, py, color);
            }
        }
    }

    /// Write the whole grid to `out` starting at the top-left cell
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        out.queue(cursor::MoveTo(0, 0))?;
        let rows = self.height / 2;
        let mut fg: Option<Color> = None;
        let mut bg: Option<Color> = None;

        for row in 0..rows {
            for col in 0..self.width {
                let top = self.get(col, row * 2);
                let bottom = self.get(col, row * 2 + 1);

                if bg != Some(bottom) {
                    out.queue(style::SetBackgroundColor(term_color(bottom)))?;
                    bg = Some(bottom);
                }
                if top == bottom {
                    out.queue(style::Print(' '))?;
                } else {
                    if fg != Some(top) {
                        out.queue(style::SetForegroundColor(term_color(top)))?;
                        fg = Some(top);
                    }
                    out.queue(style::Print('\u{2580}'))?;
                }
            }
            if row + 1 < rows {
                out.queue(style::ResetColor)?;
                out.queue(style::Print("\r\n"))?;
                fg = None;
                bg = None;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// `Renderer` drawing into a `PixelBuf` and flushing to a writer
pub struct PixelRenderer<W: Write> {
    out: W,
    buf: PixelBuf,
    world: World,
    /// Re-query the terminal size at the start of every frame
    follow_terminal: bool,
    /// Size in pixels to switch to on the next `clear`
    pending: Option<(usize, usize)>,
}

impl PixelRenderer<io::Stdout> {
    /// Renderer for the real terminal, tracking its size
    pub fn stdout(world: World) -> Self {
        let (cols, rows) = terminal::size().unwrap_or(DEFAULT_TERM_SIZE);
        let mut renderer = Self::new(io::stdout(), cols, rows, world);
        renderer.follow_terminal = true;
        renderer
    }
}

impl<W: Write> PixelRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16, world: World) -> Self {
        Self {
            out,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            world,
            follow_terminal: false,
            pending: None,
        }
    }

    pub fn buffer(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Change the target size in terminal cells. Takes effect when the next
    /// frame starts so a frame is never presented at a size it wasn't drawn at.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let size = (cols as usize, rows as usize * 2);
        self.pending = (size != (self.buf.width(), self.buf.height())).then_some(size);
    }

    /// World units to pixels on each axis
    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.buf.width() as f32 / self.world.width,
            self.buf.height() as f32 / self.world.height,
        )
    }

    fn to_pixels(&self, p: Vec2) -> Vec2 {
        p * self.scale()
    }

    /// Pixel size of one font cell for a given line height
    fn glyph_scale(&self, size: f32) -> i32 {
        ((size * self.scale().y) / (GLYPH_H + 1) as f32).round().max(1.0) as i32
    }
}

impl<W: Write> Renderer for PixelRenderer<W> {
    fn clear(&mut self, color: Color) {
        if self.follow_terminal {
            if let Ok((cols, rows)) = terminal::size() {
                self.resize(cols, rows);
            }
        }
        if let Some((w, h)) = self.pending.take() {
            log::debug!("Render target resized to {w}x{h} pixels");
            self.buf.resize(w, h);
        }
        self.buf.fill(color);
    }

    fn draw_image(&mut self, sprite: &Sprite, pos: Vec2) {
        let origin = self.to_pixels(pos).round();
        let dest = self.to_pixels(Vec2::new(sprite.width() as f32, sprite.height() as f32));
        let (dw, dh) = (dest.x.round().max(1.0) as i32, dest.y.round().max(1.0) as i32);

        for dy in 0..dh {
            let sy = (dy as u32 * sprite.height()) / dh as u32;
            for dx in 0..dw {
                let sx = (dx as u32 * sprite.width()) / dw as u32;
                let [r, g, b, a] = sprite.pixel(sx, sy);
                if a >= 128 {
                    self.buf
                        .set(origin.x as i32 + dx, origin.y as i32 + dy, Color::new(r, g, b));
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let min = self.to_pixels(rect.pos).round();
        let max = self.to_pixels(rect.pos + rect.size).round();
        let w = ((max.x - min.x) as i32).max(1);
        let h = ((max.y - min.y) as i32).max(1);
        self.buf.fill_rect(min.x as i32, min.y as i32, w, h, color);
    }

    fn draw_text(&mut self, text: &str, size: f32, color: Color, pos: Vec2) {
        let scale = self.glyph_scale(size);
        let origin = self.to_pixels(pos).round();
        let mut x = origin.x as i32;
        let y = origin.y as i32;

        for ch in text.chars() {
            let rows = glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        self.buf.fill_rect(
                            x + col * scale,
                            y + row as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            x += GLYPH_ADVANCE * scale;
        }
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        let pixels = text.chars().count() as i32 * GLYPH_ADVANCE * self.glyph_scale(size);
        pixels as f32 / self.scale().x
    }

    fn present(&mut self) -> io::Result<()> {
        self.buf.render(&mut self.out)
    }
}

/// 3x5 bitmap font, one byte per row (low three bits, MSB on the left).
/// Lowercase letters draw as uppercase; unknown characters are blank.
#[rustfmt::skip]
fn glyph(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => [0; 5],
    }
}
