//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded gap source only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod ground;
pub mod mask;
pub mod obstacle;
pub mod sdf;
pub mod sprites;
pub mod state;
pub mod tick;

pub use body::{KinematicBody, displacement};
pub use collision::{Silhouette, body_hits_obstacle, check_body_obstacle, overlaps, overlaps_at};
pub use ground::GroundBand;
pub use mask::Mask;
pub use obstacle::{FixedGaps, GapSampler, ObstaclePair, RngGaps};
pub use sprites::{BarrierMasks, BodyMask, ProceduralSprites, SilhouetteProvider};
pub use state::{LossCause, RunState, Session, SessionEvent, Snapshot};
pub use tick::{TickInput, step, tick};
