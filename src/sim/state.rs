//! Game state and core simulation types
//!
//! Everything that a restart must reset lives in `GameSession`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::rect::Rect;
use super::walls::WallStream;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Logo screen, leaves on its own after `INTRO_FRAMES`
    Intro,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Things that happened during a tick that the outside world may react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A wall was passed; carries the new score
    Scored { score: u32 },
    /// The run ended
    Crashed(Collision),
}

/// Logical playfield size (fixed for the lifetime of a session)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

impl World {
    /// Sizes below the minimum are raised so gap placement always has room
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(MIN_WORLD_WIDTH),
            height: height.max(MIN_WORLD_HEIGHT),
        }
    }

    /// Vertical midpoint, snapped to a whole unit
    pub fn mid_height(&self) -> f32 {
        (self.height / 2.0).floor()
    }
}

/// The player body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Drawn sprite box; its top-left corner is the player position
    pub rect: Rect,
    /// Shrunk collision box, always centered on `rect`
    pub hitbox: Rect,
    /// Vertical velocity (units/frame, positive is down)
    pub velocity: f32,
}

impl Player {
    /// Spawn position: fixed x, top edge at the world's vertical middle
    pub fn new(world: World) -> Self {
        Self::with_rect(Rect::new(
            PLAYER_X,
            world.mid_height(),
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        ))
    }

    pub fn with_rect(rect: Rect) -> Self {
        Self {
            rect,
            hitbox: rect.shrunk(Vec2::splat(PLAYER_HITBOX_SHRINK)),
            velocity: 0.0,
        }
    }

    /// Advance one frame. A jump assigns the impulse instead of adding gravity.
    pub fn step(&mut self, jump: bool) {
        if jump {
            self.velocity = JUMP_IMPULSE;
        } else {
            self.velocity += GRAVITY;
        }
        self.rect.pos.y += self.velocity;
        self.sync_hitbox();
    }

    /// Re-center the hitbox on the sprite box
    pub fn sync_hitbox(&mut self) {
        self.hitbox.set_center(self.rect.center());
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub world: World,
    pub phase: GamePhase,
    /// Walls passed this run
    pub score: u32,
    /// Frames spent on the intro screen
    pub intro_frames: u32,
    pub player: Player,
    pub walls: WallStream,
}

impl GameSession {
    pub fn new(world: World) -> Self {
        Self {
            world,
            phase: GamePhase::Intro,
            score: 0,
            intro_frames: 0,
            player: Player::new(world),
            walls: WallStream::new(world),
        }
    }

    /// Return to the exact state of a fresh session in the same world
    pub fn reset(&mut self) {
        *self = Self::new(self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_in_intro() {
        let session = GameSession::new(World::default());
        assert_eq!(session.phase, GamePhase::Intro);
        assert_eq!(session.score, 0);
        assert!(session.walls.is_empty());
        assert_eq!(session.player.rect.pos, Vec2::new(PLAYER_X, 540.0));
        assert_eq!(session.player.velocity, 0.0);
    }

    #[test]
    fn test_hitbox_centered_and_smaller() {
        let mut player = Player::new(World::default());
        for jump in [false, false, true, false, false, false] {
            player.step(jump);
            assert_eq!(player.hitbox.center(), player.rect.center());
            assert!(player.hitbox.width() < player.rect.width());
            assert!(player.hitbox.height() < player.rect.height());
        }
    }

    #[test]
    fn test_jump_assigns_impulse() {
        let mut player = Player::new(World::default());
        player.velocity = 12.0;
        player.step(true);
        assert_eq!(player.velocity, JUMP_IMPULSE);
        assert_eq!(player.rect.pos.y, 540.0 + JUMP_IMPULSE);
    }

    #[test]
    fn test_world_enforces_minimum_size() {
        let world = World::new(10.0, 10.0);
        assert_eq!(world.height, MIN_WORLD_HEIGHT);
        assert_eq!(world.width, MIN_WORLD_WIDTH);
    }

    #[test]
    fn test_serialized_session_snapshot() {
        let session = GameSession::new(World::default());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["phase"], "Intro");
        assert_eq!(json["score"], 0);
    }
}
