//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame
//! - Injected RNG only
//! - Walls kept in spawn order (which is also left-to-right order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;
pub mod walls;

pub use collision::{Collision, bounds_collision, detect_collision, wall_collision};
pub use rect::Rect;
pub use score::update_score;
pub use state::{GameEvent, GamePhase, GameSession, Player, World};
pub use tick::{TickInput, tick};
pub use walls::{Wall, WallStream, build_wall, next_gap_center};
