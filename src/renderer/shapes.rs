//! Shape generation for 2D primitives
//!
//! Everything is produced in world (field) coordinates, ready for any backend
//! that can stroke a polyline or fill a disc.

use glam::Vec2;

use crate::{Field, angle_to_vector};
use crate::sim::{Craft, Obstacle};

/// Craft hull in local space, nose along +x
const CRAFT_HULL: [Vec2; 4] = [
    Vec2::new(14.0, 0.0),
    Vec2::new(-10.0, 8.0),
    Vec2::new(-6.0, 0.0),
    Vec2::new(-10.0, -8.0),
];

/// Number of background stars
const STAR_COUNT: u32 = 30;

/// Rotate a local point by `angle` and move it to `origin`
#[inline]
fn to_world(origin: Vec2, angle: f32, local: Vec2) -> Vec2 {
    origin + Vec2::from_angle(angle).rotate(local)
}

/// Closed craft outline (arrowhead) in world space
pub fn craft_outline(craft: &Craft) -> [Vec2; 4] {
    CRAFT_HULL.map(|p| to_world(craft.pos, craft.angle, p))
}

/// Closed obstacle outline in world space
pub fn obstacle_outline(obstacle: &Obstacle) -> Vec<Vec2> {
    obstacle
        .silhouette
        .iter()
        .map(|s| {
            let local = angle_to_vector(s.angle) * s.radius;
            to_world(obstacle.pos, obstacle.angle, local)
        })
        .collect()
}

/// Whether the craft should be drawn this frame
///
/// Reduced motion replaces the invulnerability flicker with a steady craft.
pub fn craft_visible(craft: &Craft, reduced_motion: bool) -> bool {
    reduced_motion || craft.is_visible()
}

/// Deterministic faint background stars
pub fn starfield(field: Field) -> Vec<Vec2> {
    let (w, h) = (field.width.max(1.0) as u32, field.height.max(1.0) as u32);
    (0..STAR_COUNT)
        .map(|i| Vec2::new(((i * 73) % w) as f32, ((i * 137) % h) as f32))
        .collect()
}
