//! Per-frame simulation tick
//!
//! Advances the session by exactly one frame and drives the phase machine:
//! Intro -> Playing -> GameOver -> (restart) -> Intro.

use rand::Rng;

use super::collision::detect_collision;
use super::score::update_score;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap (only honored while playing)
    pub jump: bool,
    /// Start over (only honored after game over)
    pub restart: bool,
}

/// Advance the session by one frame, returning what happened
pub fn tick<R: Rng + ?Sized>(state: &mut GameSession, input: &TickInput, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Intro => {
            state.intro_frames += 1;
            if state.intro_frames > INTRO_FRAMES {
                log::info!("Intro finished after {} frames", state.intro_frames);
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => step_playing(state, input.jump, rng, &mut events),

        GamePhase::GameOver => {
            if input.restart {
                log::info!("Restarting (last score {})", state.score);
                state.reset();
            }
        }
    }

    events
}

fn step_playing<R: Rng + ?Sized>(
    state: &mut GameSession,
    jump: bool,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    state.player.step(jump);

    state.walls.tick_spawn(state.world, rng);
    state.walls.advance(WALL_SPEED);

    let collision = detect_collision(&state.player, &state.walls.walls, state.world);

    // Scoring runs regardless of this frame's collision
    update_score(
        &mut state.score,
        &state.player.hitbox,
        &mut state.walls.walls,
        events,
    );

    state.walls.prune();

    if let Some(collision) = collision {
        log::info!("Game over: {:?}, score {}", collision, state.score);
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Crashed(collision));
    }
}
