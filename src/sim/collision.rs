//! Collision detection and response for the projectile
//!
//! Sphere vs axis-aligned box, plus the y = 0 ground plane. Tests are
//! discrete (no sweeping): a fast sphere can tunnel through a thin box
//! between ticks, which the fixed 120 Hz step keeps rare in practice.

use glam::Vec3;

use super::obstacle::StaticObstacle;
use super::projectile::Projectile;
use crate::consts::{CONTACT_EPSILON, NORMAL_EPSILON};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the sphere overlaps the box
    pub collided: bool,
    /// Unit normal pointing from the box toward the sphere centre
    pub normal: Vec3,
    /// Overlap depth along the normal (0 when not collided)
    pub penetration: f32,
}

impl CollisionInfo {
    pub fn miss() -> Self {
        Self {
            collided: false,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a sphere against an axis-aligned box
///
/// When the centre lies inside the box (or within `NORMAL_EPSILON` of its
/// surface) the separation vector is degenerate and the normal falls back
/// to +Y.
pub fn sphere_box_collision(center: Vec3, radius: f32, obstacle: &StaticObstacle) -> CollisionInfo {
    let closest = obstacle.closest_point(center);
    let dist_vec = center - closest;
    let dist_sq = dist_vec.length_squared();

    if dist_sq >= radius * radius {
        return CollisionInfo::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > NORMAL_EPSILON {
        dist_vec / dist
    } else {
        Vec3::Y
    };

    CollisionInfo {
        collided: true,
        normal,
        penetration: (radius - dist).max(0.0),
    }
}

/// Bounce off the ground plane
///
/// Returns true when a bounce happened (touching and moving downward).
pub fn resolve_ground(projectile: &mut Projectile, restitution: f32) -> bool {
    if projectile.position.y - projectile.radius <= 0.0 && projectile.velocity.y < 0.0 {
        projectile.position.y = projectile.radius;
        projectile.velocity.y = -projectile.velocity.y * restitution;
        true
    } else {
        false
    }
}

/// Push the projectile out of an obstacle and cancel its closing velocity
///
/// The obstacle is immovable, so the full impulse goes to the projectile:
/// `v -= (1 + e)·(v·n)·n`, applied only while `v·n < 0`.
pub fn resolve_obstacle(projectile: &mut Projectile, contact: &CollisionInfo, restitution: f32) {
    if !contact.collided {
        return;
    }

    projectile.position += contact.normal * (contact.penetration + CONTACT_EPSILON);

    let closing = projectile.velocity.dot(contact.normal);
    if closing < 0.0 {
        projectile.velocity -= contact.normal * closing * (1.0 + restitution);
    }
}
