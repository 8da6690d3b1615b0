//! Scene transitions and the per-frame simulation tick

use super::collision;
use super::craft::{Craft, CraftControls, CraftEvent};
use super::state::{GameEvent, GameState, Scene};
use super::wave::spawn_wave;
use crate::Field;
use crate::consts::*;

/// Held inputs for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub shoot: bool,
}

impl TickInput {
    fn controls(&self) -> CraftControls {
        CraftControls {
            left: self.left,
            right: self.right,
            thrust: self.thrust,
        }
    }
}

/// Full reset into a fresh run
///
/// Score, wave and lives go back to their starting values, every collection is
/// cleared, the craft is recreated at the field center and the first wave is
/// spawned.
pub fn reset(state: &mut GameState, field: Field) {
    state.field = field;
    state.score = 0;
    state.wave = 1;
    state.lives = STARTING_LIVES;
    state.projectiles.clear();
    state.obstacles.clear();
    state.particles.clear();
    state.craft = Craft::new(field.center());
    spawn_wave(state, field);
}

/// "Start" pressed. Begins a new run from the start or game-over screens.
///
/// Returns true if a run was started.
pub fn start(state: &mut GameState, field: Field) -> bool {
    match state.scene {
        Scene::Start | Scene::GameOver => {
            reset(state, field);
            state.set_scene(Scene::Playing);
            true
        }
        Scene::Playing | Scene::Paused => false,
    }
}

/// "Pause" pressed. Toggles between playing and paused; ignored elsewhere.
pub fn toggle_pause(state: &mut GameState) {
    match state.scene {
        Scene::Playing => state.set_scene(Scene::Paused),
        Scene::Paused => state.set_scene(Scene::Playing),
        Scene::Start | Scene::GameOver => {}
    }
}

/// Advance the session by `dt` seconds
///
/// Does nothing unless the scene is `Playing`. `dt` is expected to be clamped
/// by the caller (see [`crate::clamp_frame_dt`]).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, field: Field) {
    if state.scene != Scene::Playing {
        return;
    }
    state.field = field;

    // Craft
    for event in state.craft.update(input.controls(), dt, field) {
        match event {
            CraftEvent::Thrust { active } => {
                if active {
                    state.particles.thrust_flame(&mut state.rng, &state.craft, field);
                }
                state.events.push(GameEvent::Thrust { active });
            }
        }
    }

    // Shooting
    if input.shoot && state.craft.can_fire() {
        let projectile = state.craft.fire(field);
        state.projectiles.push(projectile);
        state.events.push(GameEvent::Shoot);
    }

    for p in &mut state.projectiles {
        p.update(dt, field);
    }
    for o in &mut state.obstacles {
        o.update(dt, field);
    }
    state.particles.update(dt, field);

    let report = collision::detect(&state.projectiles, &state.obstacles, &state.craft);

    // Fragments are appended only after every hit is resolved
    let mut fragments = Vec::new();
    for hit in &report.hits {
        let Some(obstacle) = state.obstacles.get(hit.obstacle) else {
            continue;
        };
        // Already destroyed by an earlier projectile this tick
        if obstacle.dead {
            continue;
        }
        let (pos, radius, points) = (obstacle.pos, obstacle.radius, obstacle.score_value);

        if let Some(p) = state.projectiles.get_mut(hit.projectile) {
            p.dead = true;
        }
        fragments.extend(state.obstacles[hit.obstacle].split(&mut state.rng));
        state.add_score(points);
        state.particles.explode(&mut state.rng, pos, radius, field);
        state.obstacles[hit.obstacle].dead = true;

        log::debug!("Obstacle r={:.1} destroyed at {:?} (+{})", radius, pos, points);
        state.events.push(GameEvent::ObstacleDestroyed {
            pos,
            radius,
            points,
        });
        state.events.push(GameEvent::Explosion {
            pos,
            magnitude: radius,
        });
    }
    state.obstacles.extend(fragments);

    if report.craft_crash && !state.craft.is_invulnerable() {
        let pos = state.craft.pos;
        state
            .particles
            .explode(&mut state.rng, pos, CRAFT_EXPLOSION_MAGNITUDE, field);
        state.events.push(GameEvent::Explosion {
            pos,
            magnitude: CRAFT_EXPLOSION_MAGNITUDE,
        });

        state.lives -= 1;
        if state.lives < 0 {
            log::info!("Game over: score {} on wave {}", state.score, state.wave);
            state.events.push(GameEvent::GameOver {
                score: state.score,
                wave: state.wave,
            });
            state.set_scene(Scene::GameOver);
            return;
        }

        state.craft.respawn(field.center());
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
    }

    state.projectiles.retain(|p| p.is_alive());
    state.obstacles.retain(|o| !o.dead);

    if state.obstacles.is_empty() {
        state.wave += 1;
        spawn_wave(state, field);
    }
}
