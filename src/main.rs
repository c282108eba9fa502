//! Flap Gate entry point
//!
//! Loads settings and assets, takes over the terminal and runs the game loop.
//! Asset problems are reported before the terminal is touched.

use std::fs::File;

use anyhow::{Context, Result};

use flap_gate::Settings;
use flap_gate::assets::SceneAssets;
use flap_gate::audio::GameAudio;
use flap_gate::game::Game;
use flap_gate::platform::{TerminalGuard, TerminalInput};
use flap_gate::renderer::PixelRenderer;

const LOG_FILE: &str = "flap-gate.log";

fn main() -> Result<()> {
    init_logging();
    log::info!("Flap Gate starting...");

    let settings = Settings::load();

    let assets = SceneAssets::load(&settings.asset_dir).context("loading images")?;
    let mut audio = GameAudio::load(&settings.asset_dir).context("loading sounds")?;
    audio.set_master_volume(settings.volume());
    audio.set_muted(settings.muted);
    if !audio.is_available() {
        log::info!("Sound disabled: no audio output device");
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut game = Game::new(settings.world(), seed);

    let guard = TerminalGuard::enter().context("entering raw terminal mode")?;
    let mut input = TerminalInput::new();
    let mut renderer = PixelRenderer::stdout(settings.world());

    let result = game.run(
        &mut input,
        &mut audio,
        &mut renderer,
        &assets,
        settings.frame_duration(),
    );

    // Always try to restore terminal state.
    let restored = guard.exit();
    result.context("running game loop")?;
    restored.context("restoring terminal")?;

    println!("Final score: {}", game.session().score);
    Ok(())
}

/// Logs go to a file in the temp dir; the terminal is busy drawing the game
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(std::env::temp_dir().join(LOG_FILE)) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}
