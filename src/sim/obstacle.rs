//! Drifting, fragmenting rocks
//!
//! Each obstacle carries an irregular silhouette generated once at creation.
//! Only its reference angle rotates afterwards.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::consts::*;
use crate::{Field, angle_to_vector, rand_range};

/// Minimum and maximum silhouette sample counts (inclusive)
const SILHOUETTE_MIN_SAMPLES: u32 = 10;
const SILHOUETTE_MAX_SAMPLES: u32 = 14;

/// One vertex of an obstacle outline, in local polar coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilhouettePoint {
    pub angle: f32,
    pub radius: f32,
}

/// A rock
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation of the silhouette (not normalized, cosmetic)
    pub angle: f32,
    /// Spin rate in rad/s
    pub spin: f32,
    /// Collision and size radius
    pub radius: f32,
    /// Closed outline, ordered by angle
    pub silhouette: Vec<SilhouettePoint>,
    pub dead: bool,
    pub score_value: u32,
}

/// Points awarded for destroying an obstacle of `radius`
///
/// Smaller remnants are worth more.
pub fn score_for_radius(radius: f32) -> u32 {
    if radius >= 40.0 {
        20
    } else if radius >= 24.0 {
        50
    } else {
        100
    }
}

impl Obstacle {
    /// Create an obstacle at (`pos`) with random drift, spin and outline
    ///
    /// Larger rocks drift proportionally faster.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, radius: f32) -> Self {
        let speed = rand_range(rng, 40.0, 90.0) * (radius / OBSTACLE_SPEED_REFERENCE_RADIUS);
        let dir = rand_range(rng, 0.0, TAU);

        let sides = rng.random_range(SILHOUETTE_MIN_SAMPLES..=SILHOUETTE_MAX_SAMPLES);
        let silhouette = (0..sides)
            .map(|i| SilhouettePoint {
                angle: i as f32 / sides as f32 * TAU,
                radius: radius * rand_range(rng, 0.75, 1.1),
            })
            .collect();

        Self {
            pos,
            vel: angle_to_vector(dir) * speed,
            angle: rand_range(rng, 0.0, TAU),
            spin: rand_range(rng, -0.7, 0.7),
            radius,
            silhouette,
            dead: false,
            score_value: score_for_radius(radius),
        }
    }

    pub fn update(&mut self, dt: f32, field: Field) {
        self.pos = field.wrap(self.pos + self.vel * dt);
        self.angle += self.spin * dt;
    }

    /// Whether destroying this obstacle leaves fragments
    pub fn fragments_on_destroy(&self) -> bool {
        self.radius > FRAGMENT_MIN_RADIUS
    }

    /// Fragments left behind when this obstacle is destroyed
    ///
    /// Two children at 0.6× and 0.5× radius for rocks above the threshold,
    /// none otherwise. Children start at the parent's position with fresh
    /// velocity and outline.
    pub fn split<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Obstacle> {
        if !self.fragments_on_destroy() {
            return Vec::new();
        }
        FRAGMENT_RATIOS
            .iter()
            .map(|ratio| Obstacle::spawn(rng, self.pos, self.radius * ratio))
            .collect()
    }
}
