//! Projectiles fired by the craft

use glam::Vec2;

use super::craft::Craft;
use crate::Field;
use crate::consts::*;

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before expiry
    pub ttl: f32,
    pub radius: f32,
    pub dead: bool,
}

impl Projectile {
    /// Spawn at the craft's nose, inheriting a fraction of its velocity
    pub fn from_craft(craft: &Craft, field: Field) -> Self {
        let heading = craft.heading();
        Self {
            pos: field.wrap(craft.pos + heading * (craft.radius + 2.0)),
            vel: heading * PROJECTILE_SPEED + craft.vel * PROJECTILE_INHERIT,
            ttl: PROJECTILE_TTL,
            radius: PROJECTILE_RADIUS,
            dead: false,
        }
    }

    pub fn update(&mut self, dt: f32, field: Field) {
        self.ttl -= dt;
        self.pos = field.wrap(self.pos + self.vel * dt);
    }

    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }

    /// Still in play: not hit and not expired
    pub fn is_alive(&self) -> bool {
        !self.dead && !self.is_expired()
    }
}
