//! Startup asset loading
//!
//! Every asset is loaded before the first frame. A missing or undecodable file
//! is fatal: the caller reports the error and the game never starts.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use thiserror::Error;

use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::platform::Color;

/// Intro logo, drawn at native size
pub const LOGO_FILE: &str = "logo.png";
/// Player sprite, scaled to the player box on load
pub const PLAYER_FILE: &str = "player.png";
pub const GAME_OVER_SOUND_FILE: &str = "game_over.wav";
pub const SCORE_SOUND_FILE: &str = "score.wav";

/// Asset loading failures
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load sound '{}': {message}", path.display())]
    Sound { path: PathBuf, message: String },
}

/// Decoded RGBA image in world units (one pixel per unit)
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Sprite {
    /// Build from row-major RGBA pixels. Returns None on a size mismatch.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Opaque single-color sprite
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![[color.r, color.g, color.b, 255]; (width as usize) * (height as usize)],
        }
    }

    /// Load a PNG, optionally resized to `size`
    pub fn load(path: &Path, size: Option<(u32, u32)>) -> Result<Self, AssetError> {
        let img = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let img = match size {
            Some((w, h)) => img.resize_exact(w, h, FilterType::Triangle),
            None => img,
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Loaded image {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            pixels: rgba.pixels().map(|p| p.0).collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA at (x, y); out-of-range reads are transparent
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Images the scene needs
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub logo: Sprite,
    pub player: Sprite,
}

impl SceneAssets {
    /// Load all scene images from `dir`
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let logo = Sprite::load(&dir.join(LOGO_FILE), None)?;
        let player = Sprite::load(
            &dir.join(PLAYER_FILE),
            Some((PLAYER_WIDTH as u32, PLAYER_HEIGHT as u32)),
        )?;
        Ok(Self { logo, player })
    }
}
