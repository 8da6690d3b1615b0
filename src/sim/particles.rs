//! Cosmetic particles: explosion bursts and thrust flame
//!
//! Particles never collide. They fade out as their time-to-live runs down and
//! are pruned during their own update.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::craft::Craft;
use crate::{Field, angle_to_vector, rand_range};

/// Visual tint of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Engine exhaust
    Flame,
    /// Explosion debris
    Spark,
}

impl ParticleColor {
    /// RGB color for renderers
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            ParticleColor::Flame => [1.0, 160.0 / 255.0, 64.0 / 255.0],
            ParticleColor::Spark => [1.0, 200.0 / 255.0, 80.0 / 255.0],
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Initial lifetime (seconds)
    pub life: f32,
    /// Seconds remaining
    pub ttl: f32,
    pub size: f32,
    pub color: ParticleColor,
}

impl Particle {
    /// Fade-out alpha in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.life <= 0.0 {
            return 0.0;
        }
        (self.ttl / self.life).clamp(0.0, 1.0)
    }
}

/// Bounded particle pool owned by the session
#[derive(Debug, Clone)]
pub struct ParticlePool {
    items: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Add a particle; silently dropped once the pool is full
    pub fn add(&mut self, pos: Vec2, vel: Vec2, life: f32, size: f32, color: ParticleColor) {
        if self.items.len() >= self.capacity {
            return;
        }
        self.items.push(Particle {
            pos,
            vel,
            life,
            ttl: life,
            size,
            color,
        });
    }

    /// Advance every particle and drop the expired ones
    pub fn update(&mut self, dt: f32, field: Field) {
        for p in &mut self.items {
            p.ttl -= dt;
            p.pos = field.wrap(p.pos + p.vel * dt);
        }
        self.items.retain(|p| p.ttl > 0.0);
    }

    /// Radial burst at `pos`; bigger magnitudes throw more debris
    pub fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R, pos: Vec2, magnitude: f32, field: Field) {
        let count = 12 + (magnitude / 4.0).max(0.0) as usize;
        let pos = field.wrap(pos);
        for _ in 0..count {
            let dir = angle_to_vector(rand_range(rng, 0.0, TAU));
            let speed = rand_range(rng, 60.0, 260.0);
            let life = rand_range(rng, 0.6, 1.2);
            let size = rand_range(rng, 2.0, 4.0);
            self.add(pos, dir * speed, life, size, ParticleColor::Spark);
        }
    }

    /// One flame particle behind a thrusting craft
    pub fn thrust_flame<R: Rng + ?Sized>(&mut self, rng: &mut R, craft: &Craft, field: Field) {
        let heading = craft.heading();
        let pos = field.wrap(craft.pos - heading * (craft.radius + 4.0));
        let jitter = Vec2::new(rand_range(rng, -20.0, 20.0), rand_range(rng, -20.0, 20.0));
        let vel = jitter - heading * 60.0;
        let life = rand_range(rng, 0.25, 0.5);
        let size = rand_range(rng, 2.0, 4.0);
        self.add(pos, vel, life, size, ParticleColor::Flame);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.items
    }
}
