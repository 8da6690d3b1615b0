//! Wave spawning
//!
//! Obstacles enter along the field edges and never start within
//! [`SPAWN_SAFE_RADIUS`] of the craft.

use glam::Vec2;
use rand::Rng;

use super::obstacle::Obstacle;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::{Field, dist2, rand_range};

/// Candidate positions tried per obstacle before falling back
const MAX_SPAWN_ATTEMPTS: u32 = 256;

/// Number of obstacles in a given wave (wave numbers start at 1)
pub fn wave_size(wave: u32) -> u32 {
    WAVE_BASE_COUNT + wave.min(WAVE_MAX_BONUS)
}

/// Uniform point on a uniformly chosen field edge, wrapped into the field
fn edge_point<R: Rng + ?Sized>(rng: &mut R, field: Field) -> Vec2 {
    let raw = match rng.random_range(0..4u8) {
        0 => Vec2::new(0.0, rand_range(rng, 0.0, field.height)),
        1 => Vec2::new(field.width, rand_range(rng, 0.0, field.height)),
        2 => Vec2::new(rand_range(rng, 0.0, field.width), 0.0),
        _ => Vec2::new(rand_range(rng, 0.0, field.width), field.height),
    };
    field.wrap(raw)
}

/// Pick a spawn point at least the safe radius away from `avoid`
///
/// Retries are bounded so a field too small to hold any safe edge point
/// cannot hang the tick; in that case the farthest candidate seen is used.
fn safe_edge_point<R: Rng + ?Sized>(rng: &mut R, field: Field, avoid: Vec2) -> Vec2 {
    let safe2 = SPAWN_SAFE_RADIUS * SPAWN_SAFE_RADIUS;
    let mut best = (Vec2::ZERO, f32::NEG_INFINITY);

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = edge_point(rng, field);
        let d2 = dist2(candidate, avoid);
        if d2 >= safe2 {
            return candidate;
        }
        if d2 > best.1 {
            best = (candidate, d2);
        }
    }

    log::warn!(
        "No safe spawn point after {} attempts (field {}x{}), using farthest candidate",
        MAX_SPAWN_ATTEMPTS,
        field.width,
        field.height
    );
    best.0
}

/// Spawn the obstacles for the session's current wave
///
/// Returns how many obstacles were added.
pub fn spawn_wave(state: &mut GameState, field: Field) -> u32 {
    let count = wave_size(state.wave);
    let avoid = state.craft.pos;

    for _ in 0..count {
        let pos = safe_edge_point(&mut state.rng, field, avoid);
        let radius = rand_range(&mut state.rng, WAVE_RADIUS_MIN, WAVE_RADIUS_MAX);
        let obstacle = Obstacle::spawn(&mut state.rng, pos, radius);
        state.obstacles.push(obstacle);
    }

    log::info!("Wave {}: {} obstacles", state.wave, count);
    state.events.push(GameEvent::WaveStarted {
        wave: state.wave,
        obstacles: count,
    });
    count
}
