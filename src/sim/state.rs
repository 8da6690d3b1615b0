//! Session state and core simulation types
//!
//! One `GameState` owns every entity collection, the craft, the scoring
//! counters and the RNG. Subsystems receive it explicitly; there is no global
//! state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::craft::Craft;
use super::obstacle::Obstacle;
use super::particles::ParticlePool;
use super::projectile::Projectile;
use crate::Field;
use crate::consts::*;

/// Default particle pool capacity when no settings are supplied
pub const DEFAULT_MAX_PARTICLES: usize = 500;

/// Current scene of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Simulation halted, state untouched
    Paused,
    /// Run ended
    GameOver,
}

impl Scene {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scene::Start => "start",
            Scene::Playing => "playing",
            Scene::Paused => "paused",
            Scene::GameOver => "gameover",
        }
    }
}

/// Fire-and-forget notifications for audio/visual/persistence collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Scene changed
    SceneChanged { from: Scene, to: Scene },
    /// Craft fired a projectile
    Shoot,
    /// Something blew up
    Explosion { pos: Vec2, magnitude: f32 },
    /// Thrust state, reported every playing tick
    Thrust { active: bool },
    /// Obstacle destroyed
    ObstacleDestroyed { pos: Vec2, radius: f32, points: u32 },
    /// Running high score exceeded; should be persisted
    HighScore { score: u64 },
    /// Craft destroyed with lives to spare
    LifeLost { lives_left: i32 },
    /// New wave spawned
    WaveStarted { wave: u32, obstacles: u32 },
    /// Last life lost
    GameOver { score: u64, wave: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub scene: Scene,
    pub score: u64,
    /// Running maximum, seeded from persistence
    pub high_score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    /// Lives remaining; dropping below zero ends the run
    pub lives: i32,
    pub craft: Craft,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub particles: ParticlePool,
    /// Last field dimensions seen, used for centering
    pub field: Field,
    /// Pending notifications, drained by the host each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the start screen
    pub fn new(seed: u64, high_score: u64, field: Field) -> Self {
        Self::with_particle_capacity(seed, high_score, field, DEFAULT_MAX_PARTICLES)
    }

    pub fn with_particle_capacity(
        seed: u64,
        high_score: u64,
        field: Field,
        max_particles: usize,
    ) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scene: Scene::Start,
            score: 0,
            high_score,
            wave: 1,
            lives: STARTING_LIVES,
            craft: Craft::new(field.center()),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            particles: ParticlePool::new(max_particles),
            field,
            events: Vec::new(),
        }
    }

    /// Move the scene, recording the transition
    pub fn set_scene(&mut self, to: Scene) {
        let from = self.scene;
        if from == to {
            return;
        }
        log::info!("Scene {} -> {}", from.as_str(), to.as_str());
        self.scene = to;
        self.events.push(GameEvent::SceneChanged { from, to });
    }

    /// Add points, raising the high score when exceeded
    pub fn add_score(&mut self, points: u32) {
        self.score += u64::from(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::HighScore { score: self.score });
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every moving entity position, for invariant checks
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        std::iter::once(self.craft.pos)
            .chain(self.projectiles.iter().map(|p| p.pos))
            .chain(self.obstacles.iter().map(|o| o.pos))
            .chain(self.particles.iter().map(|p| p.pos))
    }
}
