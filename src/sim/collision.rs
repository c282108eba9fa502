//! Collision detection
//!
//! Walls are tested against the shrunk hitbox, but the world bounds are tested
//! against the full sprite box. The asymmetry is part of how the game feels,
//! keep it.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Player, World};
use super::walls::Wall;

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// A wall segment; index into the live wall list
    Wall { index: usize },
    /// Sprite top reached the top of the world
    Ceiling,
    /// Sprite bottom reached the bottom of the world
    Floor,
}

/// Check whether a hitbox overlaps either segment of a wall
#[inline]
pub fn hits_wall(hitbox: &Rect, wall: &Wall) -> bool {
    hitbox.intersects(&wall.top) || hitbox.intersects(&wall.bottom)
}

/// First wall (in spawn order) the player's hitbox overlaps
pub fn wall_collision(player: &Player, walls: &[Wall]) -> Option<Collision> {
    walls
        .iter()
        .position(|wall| hits_wall(&player.hitbox, wall))
        .map(|index| Collision::Wall { index })
}

/// World-bound check on the sprite box (inclusive edges)
pub fn bounds_collision(player: &Player, world: World) -> Option<Collision> {
    if player.rect.top() <= 0.0 {
        Some(Collision::Ceiling)
    } else if player.rect.bottom() >= world.height {
        Some(Collision::Floor)
    } else {
        None
    }
}

/// Any collision this frame. Walls are reported ahead of bounds.
pub fn detect_collision(player: &Player, walls: &[Wall], world: World) -> Option<Collision> {
    wall_collision(player, walls).or_else(|| bounds_collision(player, world))
}
