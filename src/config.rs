//! Game tuning configuration
//!
//! Constructed once, validated, then shared read-only (`Arc<Config>`) by every
//! part of the simulation. Can be loaded from a JSON file; missing fields fall
//! back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("gap range is empty: min height {min} must be below max height {max}")]
    GapRange { min: i32, max: i32 },
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("rotation limits inverted: min dive angle {min} must be below max climb angle {max}")]
    RotationLimits { min: i32, max: i32 },
    #[error("ground y {ground_y} must lie inside the world height {height}")]
    GroundOutsideWorld { ground_y: i32, height: i32 },
    #[error("spawn point ({x}, {y}) lies outside the playable area")]
    SpawnOutsideWorld { x: f32, y: f32 },
    #[error("{name} sprite {width}x{height} is larger than the world")]
    SpriteTooLarge {
        name: &'static str,
        width: u32,
        height: u32,
    },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === World ===
    pub world_width: i32,
    pub world_height: i32,
    pub ticks_per_second: u32,

    // === Body physics ===
    /// Velocity assigned by an impulse (negative is up)
    pub impulse_velocity: f32,
    /// Quadratic coefficient of the displacement formula
    pub gravity_term: f32,
    /// Clamp for downward displacement per tick
    pub max_displacement: f32,
    /// Subtracted from negative displacements for a snappier rise
    pub ascent_penalty: f32,
    /// Climb tilt is kept while the body is less than this far below its impulse height
    pub tilt_band: f32,

    // === Rotation / animation ===
    pub max_climb_angle: i32,
    pub rotation_step: i32,
    pub min_dive_angle: i32,
    pub animation_period: u32,

    // === Obstacles ===
    pub gap_distance: i32,
    pub obstacle_speed: f32,
    pub gap_min_height: i32,
    pub gap_max_height: i32,
    pub first_obstacle_x: f32,
    pub spawn_offset: f32,

    // === Ground ===
    pub ground_y: i32,
    pub ground_speed: f32,

    // === Spawn ===
    pub spawn_x: f32,
    pub spawn_y: f32,

    // === Sprite dimensions ===
    pub body_width: u32,
    pub body_height: u32,
    pub barrier_width: u32,
    pub barrier_height: u32,
    pub ground_tile_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,

            impulse_velocity: IMPULSE_VELOCITY,
            gravity_term: GRAVITY_TERM,
            max_displacement: MAX_DISPLACEMENT,
            ascent_penalty: ASCENT_PENALTY,
            tilt_band: TILT_BAND,

            max_climb_angle: MAX_CLIMB_ANGLE,
            rotation_step: ROTATION_STEP,
            min_dive_angle: MIN_DIVE_ANGLE,
            animation_period: ANIMATION_PERIOD,

            gap_distance: GAP_DISTANCE,
            obstacle_speed: OBSTACLE_SPEED,
            gap_min_height: GAP_MIN_HEIGHT,
            gap_max_height: GAP_MAX_HEIGHT,
            first_obstacle_x: FIRST_OBSTACLE_X,
            spawn_offset: SPAWN_OFFSET,

            ground_y: GROUND_Y,
            ground_speed: GROUND_SPEED,

            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,

            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
            barrier_width: BARRIER_WIDTH,
            barrier_height: BARRIER_HEIGHT,
            ground_tile_width: GROUND_TILE_WIDTH,
        }
    }
}

impl Config {
    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_width", self.world_width as f64)?;
        positive("world_height", self.world_height as f64)?;
        positive("ticks_per_second", self.ticks_per_second as f64)?;
        positive("max_displacement", self.max_displacement as f64)?;
        positive("rotation_step", self.rotation_step as f64)?;
        positive("animation_period", self.animation_period as f64)?;
        positive("gap_distance", self.gap_distance as f64)?;
        positive("obstacle_speed", self.obstacle_speed as f64)?;
        positive("ground_speed", self.ground_speed as f64)?;
        positive("body_width", self.body_width as f64)?;
        positive("body_height", self.body_height as f64)?;
        positive("barrier_width", self.barrier_width as f64)?;
        positive("barrier_height", self.barrier_height as f64)?;
        positive("ground_tile_width", self.ground_tile_width as f64)?;
        self.check_sprite("body", self.body_width, self.body_height)?;
        self.check_sprite("barrier", self.barrier_width, self.barrier_height)?;

        if self.gap_min_height >= self.gap_max_height {
            return Err(ConfigError::GapRange {
                min: self.gap_min_height,
                max: self.gap_max_height,
            });
        }
        if self.min_dive_angle >= self.max_climb_angle {
            return Err(ConfigError::RotationLimits {
                min: self.min_dive_angle,
                max: self.max_climb_angle,
            });
        }
        if self.ground_y <= 0 || self.ground_y > self.world_height {
            return Err(ConfigError::GroundOutsideWorld {
                ground_y: self.ground_y,
                height: self.world_height,
            });
        }

        let body_bottom = self.spawn_y + self.body_height as f32;
        if self.spawn_x < 0.0
            || self.spawn_x >= self.world_width as f32
            || self.spawn_y < 0.0
            || body_bottom > self.ground_y as f32
        {
            return Err(ConfigError::SpawnOutsideWorld {
                x: self.spawn_x,
                y: self.spawn_y,
            });
        }

        Ok(())
    }

    /// Sprite masks must fit in memory and no side may exceed the world
    fn check_sprite(&self, name: &'static str, width: u32, height: u32) -> Result<(), ConfigError> {
        let limit = self.world_width.max(self.world_height) as u32;
        if width > limit || height > limit || width.checked_mul(height).is_none() {
            return Err(ConfigError::SpriteTooLarge {
                name,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Seconds covered by one tick
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.ticks_per_second as f32
    }

    /// X at which freshly spawned obstacles appear
    pub fn obstacle_spawn_x(&self) -> f32 {
        self.world_width as f32 + self.spawn_offset
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
