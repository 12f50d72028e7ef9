//! Flap Core - simulation core of a side-scrolling flap-through-the-gaps game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body physics, obstacles, pixel collision, session)
//! - `config`: Immutable tuning constants with validation and JSON loading
//!
//! Rendering, asset loading and input polling live outside this crate. They
//! read [`sim::Snapshot`]s, supply silhouettes through [`sim::SilhouetteProvider`]
//! and drive the session with [`sim::TickInput`].

pub mod config;
pub mod sim;

pub use config::{Config, ConfigError};

/// Default tuning constants (world units are pixels, time is ticks)
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: i32 = 500;
    pub const WORLD_HEIGHT: i32 = 800;
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 30;

    /// Upward velocity set by an impulse (negative y is up)
    pub const IMPULSE_VELOCITY: f32 = -10.5;
    /// Coefficient of the quadratic displacement term
    pub const GRAVITY_TERM: f32 = 1.5;
    /// Largest downward displacement per tick (keeps the body from tunnelling)
    pub const MAX_DISPLACEMENT: f32 = 16.0;
    /// Extra lift subtracted from every upward displacement
    pub const ASCENT_PENALTY: f32 = 2.0;
    /// Body keeps its climb tilt while within this many pixels below the impulse height
    pub const TILT_BAND: f32 = 50.0;

    /// Rotation limits (degrees, positive is nose up)
    pub const MAX_CLIMB_ANGLE: i32 = 25;
    pub const ROTATION_STEP: i32 = 20;
    pub const MIN_DIVE_ANGLE: i32 = -80;
    /// Ticks each wing pose is held
    pub const ANIMATION_PERIOD: u32 = 5;

    /// Obstacle placement and motion
    pub const GAP_DISTANCE: i32 = 200;
    pub const OBSTACLE_SPEED: f32 = 5.0;
    pub const GAP_MIN_HEIGHT: i32 = 50;
    pub const GAP_MAX_HEIGHT: i32 = 450;
    /// First obstacle x after a reset
    pub const FIRST_OBSTACLE_X: f32 = 700.0;
    /// New obstacles appear this far beyond the right edge of the world
    pub const SPAWN_OFFSET: f32 = 100.0;

    /// Ground band
    pub const GROUND_Y: i32 = 730;
    pub const GROUND_SPEED: f32 = 5.0;

    /// Body spawn point
    pub const SPAWN_X: f32 = 230.0;
    pub const SPAWN_Y: f32 = 350.0;

    /// Sprite dimensions (2x scaled artwork)
    pub const BODY_WIDTH: u32 = 68;
    pub const BODY_HEIGHT: u32 = 48;
    pub const BARRIER_WIDTH: u32 = 104;
    pub const BARRIER_HEIGHT: u32 = 640;
    pub const GROUND_TILE_WIDTH: u32 = 672;
}

/// Round a world coordinate to the pixel grid (half-way values go to the even pixel)
#[inline]
pub fn to_pixel(v: f32) -> i32 {
    v.round_ties_even() as i32
}
