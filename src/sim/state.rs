//! Session state
//!
//! Everything one run owns: active bodies, active obstacles, ground, score
//! and run state. The per-tick algorithm lives in `tick.rs`.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::ground::GroundBand;
use super::obstacle::{GapSampler, ObstaclePair, RngGaps};
use super::sprites::{ProceduralSprites, SilhouetteProvider};
use crate::config::{Config, ConfigError};

/// Run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Bodies are flying
    Running,
    /// Every body is gone; frozen until a reset request
    Over,
}

/// Why a body left the active set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Obstacle,
    Ground,
    Ceiling,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Flap,
    Scored { score: u32 },
    ObstacleSpawned { id: u32 },
    BodyLost { id: u32, cause: LossCause },
    GameOver { score: u32 },
    Reset,
}

/// Read-only copy of the session for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub bodies: Vec<KinematicBody>,
    pub obstacles: Vec<ObstaclePair>,
    pub ground: GroundBand,
    pub score: u32,
    pub run_state: RunState,
    pub time_ticks: u64,
}

/// One game session
pub struct Session {
    pub(crate) config: Arc<Config>,
    pub(crate) sprites: Box<dyn SilhouetteProvider>,
    pub(crate) gaps: Box<dyn GapSampler>,
    /// Bodies spawned on every reset
    body_count: usize,
    /// Active bodies, in spawn order
    pub(crate) bodies: Vec<KinematicBody>,
    /// Active obstacles, in creation order
    pub(crate) obstacles: Vec<ObstaclePair>,
    pub(crate) ground: GroundBand,
    pub(crate) score: u32,
    pub(crate) run_state: RunState,
    /// Ticks since the last reset
    pub(crate) time_ticks: u64,
    next_id: u32,
}

impl Session {
    /// Session with seeded gaps and procedural sprites
    pub fn new(config: Arc<Config>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_bodies(config, seed, 1)
    }

    /// Session flying `body_count` bodies from the same spawn point
    pub fn with_bodies(
        config: Arc<Config>,
        seed: u64,
        body_count: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sprites = Box::new(ProceduralSprites::new(&config));
        let gaps = Box::new(RngGaps(Pcg32::seed_from_u64(seed)));
        Self::assemble(config, sprites, gaps, body_count)
    }

    /// Session with caller-supplied silhouettes and gap source
    pub fn with_parts(
        config: Arc<Config>,
        sprites: Box<dyn SilhouetteProvider>,
        gaps: Box<dyn GapSampler>,
        body_count: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::assemble(config, sprites, gaps, body_count)
    }

    /// Build from an already validated config; sprite masks are sized from it
    fn assemble(
        config: Arc<Config>,
        sprites: Box<dyn SilhouetteProvider>,
        gaps: Box<dyn GapSampler>,
        body_count: usize,
    ) -> Result<Self, ConfigError> {
        if body_count == 0 {
            return Err(ConfigError::NotPositive {
                name: "body_count",
                value: 0.0,
            });
        }

        let ground = GroundBand::new(&config);
        let mut session = Self {
            config,
            sprites,
            gaps,
            body_count,
            bodies: Vec::new(),
            obstacles: Vec::new(),
            ground,
            score: 0,
            run_state: RunState::Running,
            time_ticks: 0,
            next_id: 1,
        };
        session.populate();
        Ok(session)
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn bodies and the first obstacle
    fn populate(&mut self) {
        let spawn = Vec2::new(self.config.spawn_x, self.config.spawn_y);
        for _ in 0..self.body_count {
            let id = self.next_entity_id();
            self.bodies.push(KinematicBody::new(id, spawn));
        }
        let first_x = self.config.first_obstacle_x;
        self.spawn_obstacle(first_x);
    }

    /// Append a new obstacle pair at `x`
    pub(crate) fn spawn_obstacle(&mut self, x: f32) -> u32 {
        let id = self.next_entity_id();
        let size = self.sprites.barrier_masks().size();
        let pair = ObstaclePair::new(id, x, size, &self.config, self.gaps.as_mut());
        log::debug!("Obstacle {} spawned at x={} gap={}", id, x, pair.gap_center);
        self.obstacles.push(pair);
        id
    }

    /// Rebuild the session as freshly constructed (the gap source keeps its stream)
    pub fn request_reset(&mut self) {
        log::info!("Session reset (previous score {})", self.score);
        self.bodies.clear();
        self.obstacles.clear();
        self.ground = GroundBand::new(&self.config);
        self.score = 0;
        self.run_state = RunState::Running;
        self.time_ticks = 0;
        self.next_id = 1;
        self.populate();
    }

    /// Impulse every active body. Returns false when there was nothing to lift.
    pub fn apply_impulse(&mut self) -> bool {
        if self.run_state != RunState::Running {
            log::warn!("Impulse ignored: session is over");
            return false;
        }
        for body in &mut self.bodies {
            body.apply_impulse(&self.config);
        }
        true
    }

    /// Step wing animation once per rendered frame; independent of physics
    pub fn animate(&mut self) {
        for body in &mut self.bodies {
            body.animate(&self.config);
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn bodies(&self) -> &[KinematicBody] {
        &self.bodies
    }

    pub fn obstacles(&self) -> &[ObstaclePair] {
        &self.obstacles
    }

    pub fn ground(&self) -> &GroundBand {
        &self.ground
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_over(&self) -> bool {
        self.run_state == RunState::Over
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bodies: self.bodies.clone(),
            obstacles: self.obstacles.clone(),
            ground: self.ground.clone(),
            score: self.score,
            run_state: self.run_state,
            time_ticks: self.time_ticks,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("bodies", &self.bodies)
            .field("obstacles", &self.obstacles)
            .field("ground", &self.ground)
            .field("score", &self.score)
            .field("run_state", &self.run_state)
            .field("time_ticks", &self.time_ticks)
            .finish_non_exhaustive()
    }
}
