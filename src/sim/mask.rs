//! Opaque-pixel bitmaps
//!
//! A [`Mask`] records which pixels of a sprite frame are solid. Collision is
//! decided by intersecting two masks at an integer offset, so transparent
//! corners of a sprite never register hits.

use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Row-major bitmap of opaque pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Fully transparent mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Fully opaque mask
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width as usize * height as usize],
        }
    }

    /// Build a mask by evaluating `solid(x, y)` for every pixel
    pub fn from_fn<F>(width: u32, height: u32, solid: F) -> Self
    where
        F: Fn(u32, u32) -> bool,
    {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Rasterise a signed distance function, sampled at pixel centres
    pub fn from_sdf<F>(width: u32, height: u32, sdf: F) -> Self
    where
        F: Fn(Vec2) -> f32,
    {
        Self::from_fn(width, height, |x, y| {
            sdf(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) <= 0.0
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Is pixel (x, y) opaque? Out-of-bounds pixels are transparent.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[y as usize * self.width as usize + x as usize] = solid;
        }
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Does any opaque pixel of `other`, placed with its top-left corner at
    /// `offset` in this mask's coordinates, land on an opaque pixel of `self`?
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> bool {
        // Intersection of the two rectangles in self's coordinates
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }

    /// Mirror top to bottom
    pub fn flipped_vertical(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x as i32, (self.height - 1 - y) as i32)
        })
    }

    /// Rotate counter-clockwise (as seen on screen, y down) by `degrees`
    /// about the mask centre.
    ///
    /// The bounding box grows to fit the rotated shape. Returns the new mask
    /// and the shift of its top-left corner relative to the unrotated one,
    /// so that both share the same visual centre.
    pub fn rotated(&self, degrees: i32) -> (Self, IVec2) {
        if degrees.rem_euclid(360) == 0 {
            return (self.clone(), IVec2::ZERO);
        }

        let theta = (degrees as f32).to_radians();
        let (sin, cos) = theta.sin_cos();
        let w = self.width as f32;
        let h = self.height as f32;
        // Trim float noise so exact quarter turns do not gain a pixel
        let new_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(1.0) as u32;
        let new_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(1.0) as u32;

        let src_center = Vec2::new(w, h) * 0.5;
        let dst_center = Vec2::new(new_w as f32, new_h as f32) * 0.5;

        let rotated = Self::from_fn(new_w, new_h, |x, y| {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
            // Inverse of the on-screen counter-clockwise rotation
            let src = src_center + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
            self.get(src.x.floor() as i32, src.y.floor() as i32)
        });

        let shift = IVec2::new(
            (self.width as i32 - new_w as i32).div_euclid(2),
            (self.height as i32 - new_h as i32).div_euclid(2),
        );
        (rotated, shift)
    }
}
