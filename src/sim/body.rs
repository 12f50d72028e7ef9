//! Kinematic body: the player-controlled entity
//!
//! Vertical motion is a closed-form function of ticks since the last impulse,
//! not an integrated velocity, so a body's fall shape only depends on when the
//! player last flapped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Displacement for the `ticks`-th tick after an impulse with `velocity`
///
/// Downward moves are clamped to `max_displacement`; upward moves get
/// `ascent_penalty` extra lift so rises look snappier than falls.
pub fn displacement(ticks: u32, velocity: f32, config: &Config) -> f32 {
    let t = ticks as f32;
    let d = config.gravity_term * t * t + velocity * t;
    if d > config.max_displacement {
        config.max_displacement
    } else if d < 0.0 {
        d - config.ascent_penalty
    } else {
        d
    }
}

/// A falling/rising body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub id: u32,
    /// Top-left corner in world pixels
    pub pos: Vec2,
    pub velocity: f32,
    /// Ticks since the last impulse (or since spawn)
    pub ticks_since_impulse: u32,
    /// Tilt in degrees, positive is nose up
    pub rotation: i32,
    /// Height at the last impulse
    pub reference_y: f32,
    /// Current wing pose, owned by the animation step
    pub frame: usize,
    pub frame_ticks: u32,
}

impl KinematicBody {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            velocity: 0.0,
            ticks_since_impulse: 0,
            rotation: 0,
            reference_y: pos.y,
            frame: 0,
            frame_ticks: 0,
        }
    }

    /// Flap: restart the displacement curve from the current height
    pub fn apply_impulse(&mut self, config: &Config) {
        self.velocity = config.impulse_velocity;
        self.ticks_since_impulse = 0;
        self.reference_y = self.pos.y;
    }

    /// Advance one tick. Returns the displacement applied.
    pub fn advance(&mut self, config: &Config) -> f32 {
        self.ticks_since_impulse += 1;
        let d = displacement(self.ticks_since_impulse, self.velocity, config);
        self.pos.y += d;

        // Snap to the climb angle while rising or just below the flap height,
        // otherwise tip forward one step at a time
        if d < 0.0 || self.pos.y < self.reference_y + config.tilt_band {
            if self.rotation < config.max_climb_angle {
                self.rotation = config.max_climb_angle;
            }
        } else if self.rotation > config.min_dive_angle {
            self.rotation = (self.rotation - config.rotation_step).max(config.min_dive_angle);
        }

        d
    }

    /// Displacement the next `advance` will apply
    pub fn next_displacement(&self, config: &Config) -> f32 {
        displacement(self.ticks_since_impulse + 1, self.velocity, config)
    }

    /// Step the wing animation: poses 0, 1, 2, 1, 0 each held for
    /// `animation_period` frames. A diving body holds its wings level.
    pub fn animate(&mut self, config: &Config) {
        let period = config.animation_period;
        self.frame_ticks += 1;

        self.frame = match self.frame_ticks {
            t if t < period => 0,
            t if t < period * 2 => 1,
            t if t < period * 3 => 2,
            t if t < period * 4 => 1,
            _ => {
                self.frame_ticks = 0;
                0
            }
        };

        if self.rotation <= config.min_dive_angle {
            self.frame = 1;
            self.frame_ticks = period * 2;
        }
    }
}
