//! Signed distance shapes
//!
//! Used to rasterise the procedural sprite silhouettes. Negative distance is
//! inside the shape.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned ellipse
///
/// Approximation: exact sign, distance scaled by the smaller radius. Good
/// enough for inside/outside tests.
#[inline]
pub fn sd_ellipse(p: Vec2, center: Vec2, radii: Vec2) -> f32 {
    let q = (p - center) / radii;
    (q.length() - 1.0) * radii.min_element()
}

/// Signed distance to an axis-aligned box given by its min and max corners
pub fn sd_box(p: Vec2, min: Vec2, max: Vec2) -> f32 {
    let center = (min + max) * 0.5;
    let half = (max - min) * 0.5;
    let d = (p - center).abs() - half;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Union of two shapes
#[inline]
pub fn sd_union(a: f32, b: f32) -> f32 {
    a.min(b)
}
