//! Obstacle pairs: an upper and a lower barrier around a fixed vertical gap

use glam::{UVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Source of gap heights
///
/// Kept behind a trait so placement can be seeded or scripted.
pub trait GapSampler {
    /// A gap centre in `[min, max]` (inclusive)
    fn sample_gap(&mut self, min: i32, max: i32) -> i32;
}

/// Uniform gaps drawn from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngGaps<R>(pub R);

impl<R: Rng> GapSampler for RngGaps<R> {
    fn sample_gap(&mut self, min: i32, max: i32) -> i32 {
        self.0.random_range(min..=max)
    }
}

/// Scripted gaps, cycled in order
#[derive(Debug, Clone)]
pub struct FixedGaps {
    heights: Vec<i32>,
    next: usize,
}

impl FixedGaps {
    pub fn new(heights: Vec<i32>) -> Self {
        Self { heights, next: 0 }
    }
}

impl GapSampler for FixedGaps {
    fn sample_gap(&mut self, min: i32, max: i32) -> i32 {
        if self.heights.is_empty() {
            return min + (max - min) / 2;
        }
        let h = self.heights[self.next % self.heights.len()];
        self.next += 1;
        h
    }
}

/// A gated pair of barriers moving right to left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge of both barriers
    pub x: f32,
    /// Gap centre height as drawn at creation
    pub gap_center: i32,
    /// Bottom edge of the upper barrier
    pub top_edge: i32,
    /// Top edge of the lower barrier
    pub bottom_edge: i32,
    /// Barrier sprite size
    pub size: UVec2,
    /// Set once, the first tick a body gets past
    pub passed: bool,
}

impl ObstaclePair {
    pub fn new(
        id: u32,
        x: f32,
        size: UVec2,
        config: &Config,
        gaps: &mut dyn GapSampler,
    ) -> Self {
        let mut pair = Self {
            id,
            x,
            gap_center: 0,
            top_edge: 0,
            bottom_edge: 0,
            size,
            passed: false,
        };
        pair.initialize_gap(config, gaps);
        pair
    }

    /// Draw the gap height and derive both barrier edges
    fn initialize_gap(&mut self, config: &Config, gaps: &mut dyn GapSampler) {
        let (min, max) = (config.gap_min_height, config.gap_max_height);
        self.gap_center = gaps.sample_gap(min, max).clamp(min, max);
        self.top_edge = self.gap_center;
        self.bottom_edge = self.gap_center + config.gap_distance;
    }

    pub fn advance(&mut self, config: &Config) {
        self.x -= config.obstacle_speed;
    }

    /// Trailing edge has left the world on the left
    pub fn is_fully_offscreen(&self) -> bool {
        self.x + (self.size.x as f32) < 0.0
    }

    /// Top-left corner of the upper barrier sprite
    pub fn top_barrier_pos(&self) -> Vec2 {
        Vec2::new(self.x, (self.top_edge - self.size.y as i32) as f32)
    }

    /// Top-left corner of the lower barrier sprite
    pub fn bottom_barrier_pos(&self) -> Vec2 {
        Vec2::new(self.x, self.bottom_edge as f32)
    }

    /// Gap height in pixels
    pub fn gap(&self) -> i32 {
        self.bottom_edge - self.top_edge
    }
}
