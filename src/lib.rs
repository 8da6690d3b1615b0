//! Shardfall - A wrap-around arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (craft, projectiles, obstacles, collisions, waves, scenes)
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `renderer`: Read-only frame views and shape geometry for a presentation layer
//! - `platform`: Input abstraction (held actions and one-shot edges)
//! - `audio`: Sound cue dispatch with volume/mute gating
//! - `persistence`: High score storage
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single simulation step (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;
    /// Reference frame rate the per-frame drag factor is expressed in
    pub const DRAG_REFERENCE_FPS: f32 = 60.0;

    /// Craft defaults
    pub const CRAFT_RADIUS: f32 = 12.0;
    pub const CRAFT_TURN_RATE: f32 = 3.6; // rad/s
    pub const CRAFT_THRUST: f32 = 240.0; // px/s²
    pub const CRAFT_MAX_SPEED: f32 = 420.0;
    pub const CRAFT_DRAG: f32 = 0.995; // per reference frame
    pub const CRAFT_FIRE_DELAY: f32 = 0.22;
    pub const CRAFT_SPAWN_INVULNERABILITY: f32 = 2.0;
    /// Blink phase advance per second while invulnerable
    pub const CRAFT_BLINK_RATE: f32 = 20.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 580.0;
    pub const PROJECTILE_TTL: f32 = 1.15;
    pub const PROJECTILE_RADIUS: f32 = 2.0;
    /// Fraction of craft velocity a projectile inherits
    pub const PROJECTILE_INHERIT: f32 = 0.2;

    /// Obstacles at or below this radius vanish without fragments
    pub const FRAGMENT_MIN_RADIUS: f32 = 18.0;
    pub const FRAGMENT_RATIOS: [f32; 2] = [0.6, 0.5];
    /// Reference radius for obstacle speed scaling
    pub const OBSTACLE_SPEED_REFERENCE_RADIUS: f32 = 46.0;

    /// Wave spawning
    pub const WAVE_BASE_COUNT: u32 = 3;
    pub const WAVE_MAX_BONUS: u32 = 6;
    pub const SPAWN_SAFE_RADIUS: f32 = 150.0;
    pub const WAVE_RADIUS_MIN: f32 = 42.0;
    pub const WAVE_RADIUS_MAX: f32 = 52.0;

    /// Session defaults
    pub const STARTING_LIVES: i32 = 3;
    /// Explosion magnitude used when the craft is destroyed
    pub const CRAFT_EXPLOSION_MAGNITUDE: f32 = 24.0;
}

/// Toroidal play-field dimensions, supplied by the host every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Wrap a position onto the torus
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap(pos.x, self.width), wrap(pos.y, self.height))
    }

    /// True if `pos` lies in [0, width) × [0, height)
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }
}

/// Clamp a scalar into [min, max]
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.max(min).min(max)
}

/// Wrap a coordinate into [0, max)
///
/// Handles values several field-widths out (e.g. after the host shrinks the
/// field), not just a single edge crossing.
#[inline]
pub fn wrap(v: f32, max: f32) -> f32 {
    if !(max > 0.0) || !v.is_finite() {
        return 0.0;
    }
    let w = v.rem_euclid(max);
    // rem_euclid can round up to `max` for tiny negative inputs
    if w >= max { 0.0 } else { w }
}

/// Squared distance between two points
#[inline]
pub fn dist2(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let a = angle.rem_euclid(TAU);
    if a >= TAU { 0.0 } else { a }
}

/// Unit vector pointing along `angle`
#[inline]
pub fn angle_to_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Uniform sample in [min, max)
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Clamp a raw frame delta into [0, MAX_FRAME_DT]
///
/// Negative or non-finite deltas (clock skew, first frame) become zero.
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    clamp(dt, 0.0, consts::MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_single_crossing() {
        assert_eq!(wrap(-1.0, 800.0), 799.0);
        assert_eq!(wrap(800.0, 800.0), 0.0);
        assert_eq!(wrap(801.5, 800.0), 1.5);
        assert_eq!(wrap(400.0, 800.0), 400.0);
    }

    #[test]
    fn test_wrap_degenerate_field() {
        assert_eq!(wrap(10.0, 0.0), 0.0);
        assert_eq!(wrap(f32::NAN, 100.0), 0.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
        assert!(normalize_angle(TAU) < 1e-5);
        assert!((normalize_angle(7.0) - (7.0 - TAU)).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.5), consts::MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(-0.01), 0.0);
        assert_eq!(clamp_frame_dt(f32::INFINITY), 0.0);
        assert!((clamp_frame_dt(1.0 / 60.0) - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn test_rand_range_bounds() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rand_range(&mut rng, 42.0, 52.0);
            assert!((42.0..52.0).contains(&v));
        }
    }

    proptest! {
        #[test]
        fn prop_wrap_lands_in_field(
            x in -1.0e5f32..1.0e5,
            y in -1.0e5f32..1.0e5,
            w in 1.0f32..4000.0,
            h in 1.0f32..4000.0,
        ) {
            let field = Field::new(w, h);
            prop_assert!(field.contains(field.wrap(Vec2::new(x, y))));
        }

        #[test]
        fn prop_normalized_angle_in_range(a in -100.0f32..100.0) {
            let n = normalize_angle(a);
            prop_assert!((0.0..TAU).contains(&n));
        }
    }
}
