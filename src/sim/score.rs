//! Scoring: one point per wall the player gets past

use super::rect::Rect;
use super::state::GameEvent;
use super::walls::Wall;

/// Award a point for every unpassed wall whose right edge is now strictly
/// left of the hitbox. Each wall scores at most once.
pub fn update_score(score: &mut u32, hitbox: &Rect, walls: &mut [Wall], events: &mut Vec<GameEvent>) {
    for wall in walls.iter_mut().filter(|w| !w.passed) {
        if wall.right() < hitbox.left() {
            wall.passed = true;
            *score += 1;
            events.push(GameEvent::Scored { score: *score });
        }
    }
}
