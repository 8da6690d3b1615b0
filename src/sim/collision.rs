//! Circle-circle collision detection
//!
//! Tests run on wrapped coordinates only. Two entities touching across a field
//! edge are not considered overlapping.

use glam::Vec2;

use super::craft::Craft;
use super::obstacle::Obstacle;
use super::projectile::Projectile;
use crate::dist2;

/// A projectile striking an obstacle, by index into the session collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile: usize,
    pub obstacle: usize,
}

/// Result of one detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// At most one entry per projectile, in projectile order
    pub hits: Vec<Hit>,
    /// Craft overlapped a live obstacle while vulnerable
    pub craft_crash: bool,
}

/// Whether two circles overlap or touch
#[inline]
pub fn circles_overlap(a: Vec2, ar: f32, b: Vec2, br: f32) -> bool {
    let r = ar + br;
    dist2(a, b) <= r * r
}

/// Run all pairwise tests for this tick
///
/// Each projectile is matched against the first live obstacle it overlaps in
/// iteration order and then stops. The craft test is skipped entirely while
/// the craft is invulnerable.
pub fn detect(projectiles: &[Projectile], obstacles: &[Obstacle], craft: &Craft) -> CollisionReport {
    let mut hits = Vec::new();

    for (pi, p) in projectiles.iter().enumerate() {
        if !p.is_alive() {
            continue;
        }
        let first = obstacles
            .iter()
            .position(|o| !o.dead && circles_overlap(p.pos, p.radius, o.pos, o.radius));
        if let Some(oi) = first {
            hits.push(Hit {
                projectile: pi,
                obstacle: oi,
            });
        }
    }

    let craft_crash = !craft.is_invulnerable()
        && obstacles
            .iter()
            .any(|o| !o.dead && circles_overlap(craft.pos, craft.radius, o.pos, o.radius));

    CollisionReport { hits, craft_crash }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FIELD: Field = Field::new(800.0, 600.0);

    fn obstacle_at(rng: &mut Pcg32, x: f32, y: f32, r: f32) -> Obstacle {
        Obstacle::spawn(rng, Vec2::new(x, y), r)
    }

    fn projectile_at(x: f32, y: f32) -> Projectile {
        let mut craft = Craft::new(Vec2::ZERO);
        craft.angle = 0.0;
        let mut p = Projectile::from_craft(&craft, FIELD);
        p.pos = Vec2::new(x, y);
        p
    }

    fn vulnerable_craft_at(x: f32, y: f32) -> Craft {
        let mut craft = Craft::new(Vec2::new(x, y));
        craft.invulnerability = 0.0;
        craft
    }

    #[test]
    fn test_touching_counts_as_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 2.0, Vec2::new(5.0, 0.0), 3.0));
        assert!(!circles_overlap(Vec2::ZERO, 2.0, Vec2::new(5.01, 0.0), 3.0));
    }

    #[test]
    fn test_projectile_matches_first_obstacle_only() {
        let mut rng = Pcg32::seed_from_u64(1);
        let obstacles = vec![
            obstacle_at(&mut rng, 600.0, 100.0, 20.0),
            obstacle_at(&mut rng, 100.0, 100.0, 30.0),
            obstacle_at(&mut rng, 105.0, 100.0, 30.0),
        ];
        let projectiles = vec![projectile_at(100.0, 100.0)];
        let craft = vulnerable_craft_at(400.0, 500.0);

        let report = detect(&projectiles, &obstacles, &craft);
        assert_eq!(
            report.hits,
            vec![Hit {
                projectile: 0,
                obstacle: 1
            }]
        );
        assert!(!report.craft_crash);
    }

    #[test]
    fn test_dead_and_expired_entities_skipped() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut obstacles = vec![
            obstacle_at(&mut rng, 100.0, 100.0, 30.0),
            obstacle_at(&mut rng, 100.0, 100.0, 30.0),
        ];
        obstacles[0].dead = true;

        let mut expired = projectile_at(100.0, 100.0);
        expired.ttl = 0.0;
        let mut spent = projectile_at(100.0, 100.0);
        spent.dead = true;
        let live = projectile_at(100.0, 100.0);

        let craft = vulnerable_craft_at(400.0, 500.0);
        let report = detect(&[expired, spent, live], &obstacles, &craft);
        assert_eq!(
            report.hits,
            vec![Hit {
                projectile: 2,
                obstacle: 1
            }]
        );
    }

    #[test]
    fn test_several_projectiles_may_hit_same_obstacle() {
        let mut rng = Pcg32::seed_from_u64(3);
        let obstacles = vec![obstacle_at(&mut rng, 100.0, 100.0, 30.0)];
        let projectiles = vec![projectile_at(95.0, 100.0), projectile_at(105.0, 100.0)];
        let craft = vulnerable_craft_at(400.0, 500.0);

        let report = detect(&projectiles, &obstacles, &craft);
        assert_eq!(report.hits.len(), 2);
        assert!(report.hits.iter().all(|h| h.obstacle == 0));
    }

    #[test]
    fn test_invulnerability_gates_crash() {
        let mut rng = Pcg32::seed_from_u64(4);
        let obstacles = vec![obstacle_at(&mut rng, 400.0, 300.0, 40.0)];

        let mut craft = Craft::new(Vec2::new(410.0, 300.0));
        assert!(craft.is_invulnerable());
        assert!(!detect(&[], &obstacles, &craft).craft_crash);

        craft.invulnerability = 0.0;
        assert!(detect(&[], &obstacles, &craft).craft_crash);
    }

    #[test]
    fn test_no_overlap_across_wrap_boundary() {
        let mut rng = Pcg32::seed_from_u64(5);
        let obstacles = vec![obstacle_at(&mut rng, 795.0, 300.0, 20.0)];
        let craft = vulnerable_craft_at(3.0, 300.0);
        let projectiles = vec![projectile_at(1.0, 300.0)];

        let report = detect(&projectiles, &obstacles, &craft);
        assert!(report.hits.is_empty());
        assert!(!report.craft_crash);
    }

    #[test]
    fn test_dead_obstacle_cannot_crash_craft() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut obstacles = vec![obstacle_at(&mut rng, 400.0, 300.0, 40.0)];
        obstacles[0].dead = true;
        let craft = vulnerable_craft_at(400.0, 300.0);
        assert!(!detect(&[], &obstacles, &craft).craft_crash);
    }
}
