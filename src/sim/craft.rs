//! The player's craft
//!
//! Rotation, thrust, speed clamp, time-compensated drag, fire cooldown and the
//! post-spawn invulnerability window.

use glam::Vec2;

use super::projectile::Projectile;
use crate::consts::*;
use crate::{Field, angle_to_vector, normalize_angle};

/// Held-direction flags driving a single craft update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CraftControls {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
}

/// Signals produced by a craft update, consumed by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftEvent {
    /// Reported every tick, not only on change
    Thrust { active: bool },
}

/// The player's craft
#[derive(Debug, Clone)]
pub struct Craft {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle in [0, 2π)
    pub angle: f32,
    pub radius: f32,
    pub turn_rate: f32,
    pub thrust_accel: f32,
    pub max_speed: f32,
    /// Velocity factor per 60 fps reference frame
    pub drag: f32,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
    pub fire_delay: f32,
    /// Seconds of remaining invulnerability
    pub invulnerability: f32,
    /// Accumulated blink phase while invulnerable
    pub blink: f32,
}

impl Craft {
    /// Create a craft at `pos`, facing up, at rest and invulnerable
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: Self::spawn_angle(),
            radius: CRAFT_RADIUS,
            turn_rate: CRAFT_TURN_RATE,
            thrust_accel: CRAFT_THRUST,
            max_speed: CRAFT_MAX_SPEED,
            drag: CRAFT_DRAG,
            cooldown: 0.0,
            fire_delay: CRAFT_FIRE_DELAY,
            invulnerability: CRAFT_SPAWN_INVULNERABILITY,
            blink: 0.0,
        }
    }

    fn spawn_angle() -> f32 {
        normalize_angle(-std::f32::consts::FRAC_PI_2)
    }

    /// Put the craft back at `pos` after losing a life
    ///
    /// Keeps tuning and cooldown, resets motion, facing and the invulnerability window.
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.angle = Self::spawn_angle();
        self.invulnerability = CRAFT_SPAWN_INVULNERABILITY;
        self.blink = 0.0;
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability > 0.0
    }

    /// Unit vector along the facing angle
    pub fn heading(&self) -> Vec2 {
        angle_to_vector(self.angle)
    }

    /// Whether a renderer should draw the craft this frame
    ///
    /// While invulnerable the craft is hidden on every even blink step.
    pub fn is_visible(&self) -> bool {
        !self.is_invulnerable() || (self.blink.floor() as i64) % 2 != 0
    }

    /// Advance the craft by `dt` seconds
    pub fn update(&mut self, controls: CraftControls, dt: f32, field: Field) -> Vec<CraftEvent> {
        // Rotation
        if controls.left {
            self.angle -= self.turn_rate * dt;
        }
        if controls.right {
            self.angle += self.turn_rate * dt;
        }
        self.angle = normalize_angle(self.angle);

        // Thrust
        if controls.thrust {
            self.vel += self.heading() * self.thrust_accel * dt;
        }
        let events = vec![CraftEvent::Thrust {
            active: controls.thrust,
        }];

        // Speed clamp
        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed;
        }

        // Drag, compensated so deceleration over real time ignores frame rate
        self.vel *= self.drag.powf(dt * DRAG_REFERENCE_FPS);

        self.pos = field.wrap(self.pos + self.vel * dt);

        self.cooldown -= dt;

        if self.invulnerability > 0.0 {
            self.invulnerability -= dt;
            self.blink += dt * CRAFT_BLINK_RATE;
        }

        events
    }

    /// Fire a projectile from the nose and restart the cooldown
    pub fn fire(&mut self, field: Field) -> Projectile {
        self.cooldown = self.fire_delay;
        Projectile::from_craft(self, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const FIELD: Field = Field::new(800.0, 600.0);
    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_new_craft_faces_up_normalized() {
        let craft = Craft::new(Vec2::new(400.0, 300.0));
        assert!((craft.angle - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert!(craft.heading().y < -0.99);
        assert!(craft.is_invulnerable());
        assert!(craft.can_fire());
    }

    #[test]
    fn test_rotation_wraps_into_range() {
        let mut craft = Craft::new(Vec2::new(400.0, 300.0));
        craft.angle = 0.01;
        let controls = CraftControls {
            left: true,
            ..Default::default()
        };
        craft.update(controls, DT, FIELD);
        assert!(craft.angle > 6.0 && craft.angle < TAU);
    }

    #[test]
    fn test_left_and_right_cancel() {
        let mut craft = Craft::new(Vec2::new(400.0, 300.0));
        let before = craft.angle;
        let controls = CraftControls {
            left: true,
            right: true,
            thrust: false,
        };
        craft.update(controls, DT, FIELD);
        assert!((craft.angle - before).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_reports_every_tick() {
        let mut craft = Craft::new(Vec2::new(400.0, 300.0));
        let on = CraftControls {
            thrust: true,
            ..Default::default()
        };
        assert_eq!(craft.update(on, DT, FIELD), vec![CraftEvent::Thrust { active: true }]);
        assert_eq!(craft.update(on, DT, FIELD), vec![CraftEvent::Thrust { active: true }]);
        assert_eq!(
            craft.update(CraftControls::default(), DT, FIELD),
            vec![CraftEvent::Thrust { active: false }]
        );
        // Facing up: thrust pushes toward negative y
        assert!(craft.vel.y < 0.0);
    }

    #[test]
    fn test_speed_clamped_preserving_direction() {
        let mut craft = Craft::new(Vec2::new(400.0, 300.0));
        craft.vel = Vec2::new(3000.0, 4000.0);
        craft.update(CraftControls::default(), DT, FIELD);
        // Clamp to max then one frame of drag
        let expected = CRAFT_MAX_SPEED * CRAFT_DRAG;
        assert!((craft.vel.length() - expected).abs() < 0.01);
        let dir = craft.vel.normalize();
        assert!((dir.x - 0.6).abs() < 1e-4 && (dir.y - 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_drag_is_frame_rate_independent() {
        let mut at_60 = Craft::new(Vec2::new(400.0, 300.0));
        let mut at_120 = at_60.clone();
        at_60.vel = Vec2::new(200.0, 0.0);
        at_120.vel = Vec2::new(200.0, 0.0);

        for _ in 0..60 {
            at_60.update(CraftControls::default(), 1.0 / 60.0, FIELD);
        }
        for _ in 0..120 {
            at_120.update(CraftControls::default(), 1.0 / 120.0, FIELD);
        }

        let expected = 200.0 * CRAFT_DRAG.powi(60);
        assert!((at_60.vel.x - expected).abs() < 0.05);
        assert!((at_120.vel.x - expected).abs() < 0.05);
    }

    #[test]
    fn test_position_wraps_across_edge() {
        let mut craft = Craft::new(Vec2::new(799.0, 1.0));
        craft.vel = Vec2::new(300.0, -300.0);
        craft.update(CraftControls::default(), DT, FIELD);
        assert!(FIELD.contains(craft.pos));
        assert!(craft.pos.x < 10.0);
        assert!(craft.pos.y > 590.0);
    }

    #[test]
    fn test_cooldown_gates_firing() {
        let mut craft = Craft::new(Vec2::new(400.0, 300.0));
        let _ = craft.fire(FIELD);
        assert!(!craft.can_fire());

        // 0.22s of cooldown: 13 ticks at 60 Hz is not enough, 14 is
        for _ in 0..13 {
            craft.update(CraftControls::default(), DT, FIELD);
        }
        assert!(!craft.can_fire());
        craft.update(CraftControls::default(), DT, FIELD);
        assert!(craft.can_fire());
    }

    #[test]
    fn test_invulnerability_expires_and_blinks() {
        let mut craft = Craft::new(Vec2::new(400.0, 300.0));
        assert!(!craft.is_visible()); // blink phase 0 is even

        craft.update(CraftControls::default(), 0.06, FIELD);
        assert!((craft.blink - 1.2).abs() < 1e-4);
        assert!(craft.is_visible());

        for _ in 0..70 {
            craft.update(CraftControls::default(), 1.0 / 30.0, FIELD);
        }
        assert!(!craft.is_invulnerable());
        assert!(craft.is_visible());

        let blink = craft.blink;
        craft.update(CraftControls::default(), DT, FIELD);
        assert_eq!(craft.blink, blink);
    }

    #[test]
    fn test_respawn_resets_motion_only() {
        let mut craft = Craft::new(Vec2::new(10.0, 10.0));
        craft.vel = Vec2::new(50.0, 50.0);
        craft.angle = 1.0;
        craft.invulnerability = 0.0;
        craft.blink = 7.5;

        craft.respawn(Vec2::new(400.0, 300.0));
        assert_eq!(craft.pos, Vec2::new(400.0, 300.0));
        assert_eq!(craft.vel, Vec2::ZERO);
        assert!((craft.angle - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert_eq!(craft.invulnerability, CRAFT_SPAWN_INVULNERABILITY);
        assert_eq!(craft.blink, 0.0);
    }
}
