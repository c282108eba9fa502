//! Flap Gate - a side-scrolling gate-threading arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, walls, collisions, scoring, phases)
//! - `game`: Frame driver wiring the simulation to input, audio and rendering
//! - `platform`: Narrow input/render/audio interfaces plus the terminal backend
//! - `renderer`: Scene drawing and the half-block pixel renderer
//! - `assets`: Startup loading of images (sounds live in `audio`)
//! - `settings`: Operator preferences loaded from JSON

pub mod assets;
pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the fixed-step loop
    pub const TARGET_FPS: u32 = 60;
    /// Frames the intro logo stays up before play begins
    pub const INTRO_FRAMES: u32 = 180;

    /// Default logical world size
    pub const WORLD_WIDTH: f32 = 1920.0;
    pub const WORLD_HEIGHT: f32 = 1080.0;

    /// Player defaults - x never changes, the world scrolls instead
    pub const PLAYER_X: f32 = 150.0;
    pub const PLAYER_WIDTH: f32 = 304.0;
    pub const PLAYER_HEIGHT: f32 = 198.0;
    /// Amount removed from each axis of the sprite box to form the hitbox
    pub const PLAYER_HITBOX_SHRINK: f32 = 75.0;

    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 1.0;
    /// Velocity assigned on a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;

    /// Nominal (drawn) wall width
    pub const WALL_WIDTH: f32 = 80.0;
    /// Horizontal inset of the collision segment on each side, also added
    /// above and below the opening
    pub const WALL_HITBOX_MARGIN: f32 = 10.0;
    /// Opening size before margins: hitbox height plus slack
    pub const WALL_GAP: f32 = PLAYER_HEIGHT - PLAYER_HITBOX_SHRINK + 300.0;
    /// Gap extent on each side of the gap center, in whole units
    pub const WALL_HALF_GAP: f32 = (WALL_GAP as i32 / 2) as f32;
    /// Distance between the top segment's bottom edge and the bottom segment's top edge
    pub const WALL_OPENING: f32 = 2.0 * (WALL_HALF_GAP + WALL_HITBOX_MARGIN);
    /// Leftward scroll speed (units/frame)
    pub const WALL_SPEED: f32 = 6.0;
    /// Frames between wall spawns
    pub const WALL_SPAWN_FRAMES: u32 = 180;
    /// Segments never get shorter than this
    pub const WALL_MIN_SEGMENT_HEIGHT: f32 = 50.0;

    /// Largest vertical step of the gap center between consecutive walls
    pub const GAP_STEP: i32 = 150;
    /// Gap centers stay this far from the top and bottom of the world
    pub const GAP_EDGE_MARGIN: f32 = 200.0;

    /// Smallest world height that leaves room for a gap center
    pub const MIN_WORLD_HEIGHT: f32 = 2.0 * GAP_EDGE_MARGIN;
    /// Smallest world width that still shows the player
    pub const MIN_WORLD_WIDTH: f32 = PLAYER_X + PLAYER_WIDTH;
}
