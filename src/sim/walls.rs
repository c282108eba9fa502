//! Wall generation, scrolling and pruning
//!
//! Each wall is a top and bottom segment with an opening between them. The
//! opening's center follows a bounded random walk so consecutive walls never
//! jump by more than `GAP_STEP`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::World;
use crate::consts::*;

/// A top/bottom segment pair scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Collision segment hanging from the top
    pub top: Rect,
    /// Collision segment standing on the bottom
    pub bottom: Rect,
    /// Vertical midpoint of the opening at creation time
    pub gap_center: f32,
    /// Set once the player clears the wall; never cleared again
    pub passed: bool,
}

impl Wall {
    pub fn advance(&mut self, dx: f32) {
        let delta = Vec2::new(-dx, 0.0);
        self.top.translate(delta);
        self.bottom.translate(delta);
    }

    /// Right edge used for scoring and pruning
    #[inline]
    pub fn right(&self) -> f32 {
        self.top.right()
    }

    /// Size of the opening between the segments
    pub fn opening(&self) -> f32 {
        self.bottom.top() - self.top.bottom()
    }

    /// Drawn segments, wider than the collision segments by the hitbox margin
    pub fn visual_segments(&self) -> [Rect; 2] {
        let grow = Vec2::new(-2.0 * WALL_HITBOX_MARGIN, 0.0);
        [self.top.shrunk(grow), self.bottom.shrunk(grow)]
    }
}

/// Next gap center: previous plus a uniform step in `[-GAP_STEP, GAP_STEP]`,
/// clamped to stay `GAP_EDGE_MARGIN` away from the world edges.
pub fn next_gap_center<R: Rng + ?Sized>(previous: f32, world: World, rng: &mut R) -> f32 {
    let offset = rng.random_range(-GAP_STEP..=GAP_STEP) as f32;
    (previous + offset).clamp(GAP_EDGE_MARGIN, world.height - GAP_EDGE_MARGIN)
}

/// Build a wall just past the right edge of the world with its opening
/// centered on `gap_center`.
///
/// The opening is always exactly `WALL_OPENING`. A segment that would be
/// shorter than `WALL_MIN_SEGMENT_HEIGHT` is extended past the world edge
/// instead of moving its inner edge.
pub fn build_wall(gap_center: f32, world: World) -> Wall {
    let top_edge = gap_center - WALL_HALF_GAP - WALL_HITBOX_MARGIN;
    let bottom_edge = gap_center + WALL_HALF_GAP + WALL_HITBOX_MARGIN;

    let x = world.width + WALL_HITBOX_MARGIN;
    let width = WALL_WIDTH - 2.0 * WALL_HITBOX_MARGIN;

    let top_y = (top_edge - WALL_MIN_SEGMENT_HEIGHT).min(0.0);
    let top = Rect::new(x, top_y, width, top_edge - top_y);

    let bottom_height = (world.height - bottom_edge).max(WALL_MIN_SEGMENT_HEIGHT);
    let bottom = Rect::new(x, bottom_edge, width, bottom_height);

    Wall {
        top,
        bottom,
        gap_center,
        passed: false,
    }
}

/// Live walls plus the state that drives spawning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStream {
    /// Spawn order, which is also left-to-right order
    pub walls: Vec<Wall>,
    /// Gap center of the last spawned wall (seeded at mid-height)
    pub previous_gap_center: f32,
    /// Frames since the last spawn
    pub spawn_timer: u32,
}

impl WallStream {
    pub fn new(world: World) -> Self {
        Self {
            walls: Vec::new(),
            previous_gap_center: world.mid_height(),
            spawn_timer: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Count one frame toward the next spawn. Returns true if a wall spawned.
    pub fn tick_spawn<R: Rng + ?Sized>(&mut self, world: World, rng: &mut R) -> bool {
        self.spawn_timer += 1;
        if self.spawn_timer >= WALL_SPAWN_FRAMES {
            self.spawn(world, rng);
            self.spawn_timer = 0;
            true
        } else {
            false
        }
    }

    /// Append a wall whose gap continues the random walk
    pub fn spawn<R: Rng + ?Sized>(&mut self, world: World, rng: &mut R) {
        let gap_center = next_gap_center(self.previous_gap_center, world, rng);
        self.previous_gap_center = gap_center;
        log::debug!("Spawned wall with gap center {gap_center}");
        self.walls.push(build_wall(gap_center, world));
    }

    /// Scroll every wall left by `dx`
    pub fn advance(&mut self, dx: f32) {
        for wall in &mut self.walls {
            wall.advance(dx);
        }
    }

    /// Drop walls whose right edge has reached the world's left edge.
    /// Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.walls.len();
        self.walls.retain(|w| w.right() > 0.0);
        before - self.walls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence() {
        let world = World::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stream = WallStream::new(world);

        for _ in 0..WALL_SPAWN_FRAMES - 1 {
            assert!(!stream.tick_spawn(world, &mut rng));
        }
        assert!(stream.is_empty());
        assert!(stream.tick_spawn(world, &mut rng));
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.spawn_timer, 0);
    }

    #[test]
    fn test_spawned_wall_starts_off_screen() {
        let world = World::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stream = WallStream::new(world);
        stream.spawn(world, &mut rng);

        let wall = &stream.walls[0];
        assert_eq!(wall.top.left(), world.width + WALL_HITBOX_MARGIN);
        assert_eq!(wall.top.width(), WALL_WIDTH - 2.0 * WALL_HITBOX_MARGIN);
        assert_eq!(stream.previous_gap_center, wall.gap_center);
        assert!(!wall.passed);
    }

    #[test]
    fn test_visual_segments_wider_than_collision() {
        let wall = build_wall(540.0, World::default());
        let [top, bottom] = wall.visual_segments();
        assert_eq!(top.width(), WALL_WIDTH);
        assert_eq!(top.center(), wall.top.center());
        assert_eq!(bottom.height(), wall.bottom.height());
    }

    #[test]
    fn test_advance_and_prune() {
        let world = World::default();
        let mut stream = WallStream::new(world);
        let mut near = build_wall(400.0, world);
        near.top.pos.x = -50.0;
        near.bottom.pos.x = -50.0;
        let far = build_wall(500.0, world);
        stream.walls.push(near);
        stream.walls.push(far);

        // Right edge goes from 10 to 4, still alive
        stream.advance(WALL_SPEED);
        assert_eq!(stream.prune(), 0);

        // 4 -> -2, removed
        stream.advance(WALL_SPEED);
        assert_eq!(stream.prune(), 1);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.walls[0].gap_center, 500.0);
    }

    #[test]
    fn test_opening_uses_whole_half_gap() {
        // 423 splits into 211 on each side, plus the margins
        assert_eq!(WALL_GAP, 423.0);
        let wall = build_wall(540.0, World::default());
        assert_eq!(wall.top.bottom(), 540.0 - 221.0);
        assert_eq!(wall.bottom.top(), 540.0 + 221.0);
        assert_eq!(wall.opening(), 442.0);
    }

    #[test]
    fn test_short_segments_extend_past_edges() {
        let world = World::default();
        let wall = build_wall(GAP_EDGE_MARGIN, world);
        assert!(wall.top.height() >= WALL_MIN_SEGMENT_HEIGHT);
        assert!(wall.top.top() < 0.0);

        let wall = build_wall(world.height - GAP_EDGE_MARGIN, world);
        assert!(wall.bottom.height() >= WALL_MIN_SEGMENT_HEIGHT);
        assert!(wall.bottom.bottom() > world.height);
    }

    proptest! {
        #[test]
        fn prop_gap_walk_is_bounded(seed in any::<u64>(), height in 400.0f32..2000.0, t in 0.0f32..1.0) {
            let world = World::new(1920.0, height);
            let lo = GAP_EDGE_MARGIN;
            let hi = world.height - GAP_EDGE_MARGIN;
            let previous = (lo + (hi - lo) * t).floor().max(lo);
            let mut rng = Pcg32::seed_from_u64(seed);

            let next = next_gap_center(previous, world, &mut rng);
            prop_assert!(next >= lo && next <= hi);
            prop_assert!((next - previous).abs() <= GAP_STEP as f32);
        }

        #[test]
        fn prop_walk_stays_in_bounds_over_many_spawns(seed in any::<u64>()) {
            let world = World::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut stream = WallStream::new(world);
            let mut previous = stream.previous_gap_center;
            for _ in 0..50 {
                stream.spawn(world, &mut rng);
                let center = stream.previous_gap_center;
                prop_assert!(center >= GAP_EDGE_MARGIN);
                prop_assert!(center <= world.height - GAP_EDGE_MARGIN);
                prop_assert!((center - previous).abs() <= GAP_STEP as f32);
                previous = center;
            }
        }

        #[test]
        fn prop_opening_is_fixed(gap_center in 200.0f32..880.0) {
            let wall = build_wall(gap_center.floor(), World::default());
            prop_assert_eq!(wall.opening(), WALL_OPENING);
        }
    }
}
