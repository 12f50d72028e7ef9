//! Pixel-accurate collision detection
//!
//! Bodies and barriers both reduce to a [`Silhouette`]: an opaque-pixel mask
//! pinned at an integer origin. Two silhouettes collide when any opaque pixel
//! of one lands on an opaque pixel of the other. Bounding boxes alone would
//! report hits in the transparent corners of tilted or rounded sprites.

use glam::{IVec2, Vec2};

use super::body::KinematicBody;
use super::mask::Mask;
use super::obstacle::ObstaclePair;
use super::sprites::{BarrierMasks, SilhouetteProvider};
use crate::to_pixel;

/// A mask placed in world pixels
#[derive(Debug, Clone, Copy)]
pub struct Silhouette<'a> {
    pub mask: &'a Mask,
    /// World position of the mask's top-left pixel
    pub origin: IVec2,
}

impl<'a> Silhouette<'a> {
    /// Place `mask` at a world position, rounded to the pixel grid
    pub fn at(mask: &'a Mask, pos: Vec2) -> Self {
        Self {
            mask,
            origin: IVec2::new(to_pixel(pos.x), to_pixel(pos.y)),
        }
    }
}

/// Do two placed silhouettes share an opaque pixel?
pub fn overlaps(a: &Silhouette<'_>, b: &Silhouette<'_>) -> bool {
    a.mask.overlap(b.mask, b.origin - a.origin)
}

/// [`overlaps`] for masks at unrounded world positions
pub fn overlaps_at(mask_a: &Mask, pos_a: Vec2, mask_b: &Mask, pos_b: Vec2) -> bool {
    overlaps(&Silhouette::at(mask_a, pos_a), &Silhouette::at(mask_b, pos_b))
}

/// Does `body` (in its current pose) touch either barrier of `obstacle`?
pub fn body_hits_obstacle(
    body: &KinematicBody,
    body_mask: &Mask,
    body_shift: IVec2,
    obstacle: &ObstaclePair,
    barriers: &BarrierMasks,
) -> bool {
    let mut body_sil = Silhouette::at(body_mask, body.pos);
    body_sil.origin += body_shift;

    let top = Silhouette::at(&barriers.top, obstacle.top_barrier_pos());
    let bottom = Silhouette::at(&barriers.bottom, obstacle.bottom_barrier_pos());

    overlaps(&body_sil, &top) || overlaps(&body_sil, &bottom)
}

/// Resolve the body's current silhouette from `sprites` and test it
pub fn check_body_obstacle(
    body: &KinematicBody,
    obstacle: &ObstaclePair,
    sprites: &mut dyn SilhouetteProvider,
) -> bool {
    let pose = sprites.body_mask(body.frame, body.rotation);
    body_hits_obstacle(body, &pose.mask, pose.shift, obstacle, sprites.barrier_masks())
}
