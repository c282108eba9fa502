//! Audio output using Kira
//!
//! Both cue sounds are decoded up front so a missing file fails at startup.
//! Without an output device the game keeps running silently.

use std::path::Path;

use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend};

use crate::assets::{AssetError, GAME_OVER_SOUND_FILE, SCORE_SOUND_FILE};
use crate::platform::{AudioSink, Cue};

/// Cue player for the game
pub struct GameAudio {
    manager: Option<AudioManager<DefaultBackend>>,
    game_over: StaticSoundData,
    score: StaticSoundData,
    master_volume: f32,
    muted: bool,
}

impl GameAudio {
    /// Decode the cue sounds from `dir` and open the default output device
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let game_over = load_sound(&dir.join(GAME_OVER_SOUND_FILE))?;
        let score = load_sound(&dir.join(SCORE_SOUND_FILE))?;

        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| log::warn!("No audio device available ({e}), running silent"))
            .ok();

        Ok(Self {
            manager,
            game_over,
            score,
            master_volume: 0.8,
            muted: false,
        })
    }

    /// Whether sound can actually be heard
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }
}

impl AudioSink for GameAudio {
    fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(manager) = &mut self.manager else {
            return;
        };

        let data = match cue {
            Cue::GameOver => &self.game_over,
            Cue::Score => &self.score,
        };

        if let Err(e) = manager.play(data.clone().volume(amplitude_to_db(vol))) {
            log::warn!("Failed to play '{}': {e}", cue.as_str());
        }
    }
}

fn load_sound(path: &Path) -> Result<StaticSoundData, AssetError> {
    let data = StaticSoundData::from_file(path).map_err(|e| AssetError::Sound {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    log::info!("Loaded sound {}", path.display());
    Ok(data)
}

/// Convert linear amplitude (0.0 - 1.0) to decibels
fn amplitude_to_db(amplitude: f32) -> Decibels {
    if amplitude <= 0.0 {
        Decibels(-60.0) // silence
    } else {
        Decibels((20.0 * amplitude.log10()).max(-60.0))
    }
}
