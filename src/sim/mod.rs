//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - Seeded RNG only
//! - Field dimensions passed in by the host every tick
//! - Mark dead, then compact; collections are never reshuffled mid-pass

pub mod collision;
pub mod craft;
pub mod obstacle;
pub mod particles;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CollisionReport, Hit, circles_overlap, detect};
pub use craft::{Craft, CraftControls, CraftEvent};
pub use obstacle::{Obstacle, SilhouettePoint, score_for_radius};
pub use particles::{Particle, ParticleColor, ParticlePool};
pub use projectile::Projectile;
pub use state::{GameEvent, GameState, Scene};
pub use tick::{TickInput, reset, start, tick, toggle_pause};
pub use wave::{spawn_wave, wave_size};
