//! Silhouette provider
//!
//! The asset layer owns sprite artwork; the simulation only needs opaque-pixel
//! masks and visual sizes. [`SilhouetteProvider`] is that seam.
//! [`ProceduralSprites`] is a built-in provider that rasterises simple shapes
//! at the configured sprite sizes, for headless runs and tests.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{IVec2, UVec2, Vec2};

use super::mask::Mask;
use super::sdf::{sd_box, sd_circle, sd_ellipse, sd_union};
use crate::config::Config;

/// Number of wing poses in the body animation
pub const BODY_FRAMES: usize = 3;

/// A body mask for one (frame, rotation) pair
#[derive(Debug, Clone)]
pub struct BodyMask {
    pub mask: Arc<Mask>,
    /// Top-left shift of the rotated mask relative to the body's position
    pub shift: IVec2,
}

/// Barrier masks shared by every obstacle pair
#[derive(Debug, Clone)]
pub struct BarrierMasks {
    /// Upper barrier (hangs down from the top, lip at the bottom)
    pub top: Arc<Mask>,
    /// Lower barrier (rises from the ground, lip at the top)
    pub bottom: Arc<Mask>,
}

impl BarrierMasks {
    pub fn size(&self) -> UVec2 {
        self.bottom.size()
    }
}

/// Supplies silhouettes to the simulation
pub trait SilhouetteProvider {
    /// Unrotated visual size of a body frame
    fn body_size(&self, frame: usize) -> UVec2;

    /// Mask of a body frame tilted by `rotation` degrees
    fn body_mask(&mut self, frame: usize, rotation: i32) -> BodyMask;

    /// Barrier masks, computed once and reused by all obstacles
    fn barrier_masks(&self) -> &BarrierMasks;
}

/// Shape-based sprites sized from the configuration
#[derive(Debug, Clone)]
pub struct ProceduralSprites {
    frames: Vec<Arc<Mask>>,
    barriers: BarrierMasks,
    rotated: HashMap<(usize, i32), BodyMask>,
}

impl ProceduralSprites {
    pub fn new(config: &Config) -> Self {
        let frames = (0..BODY_FRAMES)
            .map(|frame| Arc::new(body_frame(config.body_width, config.body_height, frame)))
            .collect();

        let bottom = barrier(config.barrier_width, config.barrier_height);
        let top = bottom.flipped_vertical();

        Self {
            frames,
            barriers: BarrierMasks {
                top: Arc::new(top),
                bottom: Arc::new(bottom),
            },
            rotated: HashMap::new(),
        }
    }
}

impl SilhouetteProvider for ProceduralSprites {
    fn body_size(&self, frame: usize) -> UVec2 {
        self.frames[frame % self.frames.len()].size()
    }

    fn body_mask(&mut self, frame: usize, rotation: i32) -> BodyMask {
        let frame = frame % self.frames.len();
        if rotation == 0 {
            return BodyMask {
                mask: Arc::clone(&self.frames[frame]),
                shift: IVec2::ZERO,
            };
        }

        let base = &self.frames[frame];
        self.rotated
            .entry((frame, rotation))
            .or_insert_with(|| {
                let (mask, shift) = base.rotated(rotation);
                BodyMask {
                    mask: Arc::new(mask),
                    shift,
                }
            })
            .clone()
    }

    fn barrier_masks(&self) -> &BarrierMasks {
        &self.barriers
    }
}

/// Elliptical body with an eye bump, beak and one of three wing poses
fn body_frame(width: u32, height: u32, frame: usize) -> Mask {
    let size = Vec2::new(width as f32, height as f32);
    let body_center = size * Vec2::new(0.45, 0.52);
    let body_radii = size * Vec2::new(0.38, 0.36);
    let eye_center = size * Vec2::new(0.62, 0.32);
    let eye_radius = size.y * 0.18;
    let beak_min = size * Vec2::new(0.72, 0.52);
    let beak_max = size * Vec2::new(0.95, 0.72);

    // Wing up, level, down
    let wing_y = match frame {
        0 => 0.30,
        1 => 0.50,
        _ => 0.70,
    };
    let wing_center = size * Vec2::new(0.24, wing_y);
    let wing_radii = size * Vec2::new(0.20, 0.14);

    Mask::from_sdf(width, height, |p| {
        let body = sd_ellipse(p, body_center, body_radii);
        let eye = sd_circle(p, eye_center, eye_radius);
        let beak = sd_box(p, beak_min, beak_max);
        let wing = sd_ellipse(p, wing_center, wing_radii);
        sd_union(sd_union(body, eye), sd_union(beak, wing))
    })
}

/// Pipe shaft with a wider lip at its open (top) end
fn barrier(width: u32, height: u32) -> Mask {
    let w = width as f32;
    let h = height as f32;
    let inset = (w * 0.04).round();
    let lip_height = (w * 0.4).round().min(h);

    Mask::from_sdf(width, height, |p| {
        let lip = sd_box(p, Vec2::ZERO, Vec2::new(w, lip_height));
        let shaft = sd_box(p, Vec2::new(inset, 0.0), Vec2::new(w - inset, h));
        sd_union(lip, shaft)
    })
}
