//! Operator settings and preferences
//!
//! Read from `flap-gate.json` in the working directory when present. Gameplay
//! tuning is not configurable here; see `crate::consts`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{TARGET_FPS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::World;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding images and sounds
    pub asset_dir: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Simulation ===
    /// Fixed RNG seed for reproducible runs; random when absent
    pub seed: Option<u64>,
    /// Frames per second of the main loop
    pub target_fps: u32,
    /// Logical world size in world units
    pub world_width: f32,
    pub world_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            master_volume: 0.8,
            muted: false,
            seed: None,
            target_fps: TARGET_FPS,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    pub const FILE_NAME: &'static str = "flap-gate.json";

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load from `path`. A missing file means defaults; a malformed one logs
    /// a warning and also means defaults.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match Self::parse(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Playfield for a new session
    pub fn world(&self) -> World {
        World::new(self.world_width, self.world_height)
    }

    /// Length of one frame (a zero rate is treated as 1 fps)
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    /// Master volume clamped to 0.0 - 1.0
    pub fn volume(&self) -> f32 {
        self.master_volume.clamp(0.0, 1.0)
    }
}
