//! Static obstacles for the launch scene
//!
//! Obstacles are axis-aligned boxes fixed at scene setup. They carry no
//! velocity or mass; the projectile is the only moving body.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::assets::TextureId;
use crate::config::ObstacleLayout;

/// An immovable axis-aligned box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticObstacle {
    pub id: u32,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub texture: TextureId,
}

impl StaticObstacle {
    /// Box of full `size` centred at `center`
    pub fn new(id: u32, center: Vec3, size: Vec3, texture: TextureId) -> Self {
        Self {
            id,
            center,
            half_extents: size.abs() * 0.5,
            texture,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Closest point on or inside the box to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min(), self.max())
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.closest_point(point) == point
    }
}

/// Scatter placement bounds (distance from the launch point)
const SCATTER_MIN_RANGE: f32 = 6.0;
const SCATTER_MAX_RANGE: f32 = 30.0;
/// Scatter bearing either side of +Z (degrees)
const SCATTER_HALF_ARC: f32 = 60.0;
const SCATTER_MIN_SIZE: f32 = 1.0;
const SCATTER_MAX_SIZE: f32 = 4.0;

/// The obstacles of one scene, in stable id order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSet {
    obstacles: Vec<StaticObstacle>,
    next_id: u32,
}

impl ObstacleSet {
    /// No obstacles: ground-only collisions
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layout(layout: &ObstacleLayout) -> Self {
        match layout {
            ObstacleLayout::Empty => Self::new(),
            ObstacleLayout::Course => Self::course(),
            ObstacleLayout::Scatter { seed, count } => Self::scatter(*seed, *count),
        }
    }

    /// Fixed row of blocks resting on the ground down-range along +Z
    pub fn course() -> Self {
        let mut set = Self::new();
        set.push_grounded(Vec3::new(0.0, 0.0, 8.0), Vec3::new(6.0, 2.0, 1.5), TextureId::Brick);
        set.push_grounded(Vec3::new(-3.5, 0.0, 14.0), Vec3::new(3.0, 4.0, 3.0), TextureId::Wood);
        set.push_grounded(Vec3::new(3.0, 0.0, 18.0), Vec3::new(2.0, 2.0, 2.0), TextureId::Stone);
        set.push_grounded(Vec3::new(0.0, 0.0, 26.0), Vec3::new(12.0, 8.0, 2.0), TextureId::Metal);
        set
    }

    /// Deterministic random blocks; the same seed always yields the same set
    pub fn scatter(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut set = Self::new();

        for _ in 0..count {
            let range = rng.random_range(SCATTER_MIN_RANGE..SCATTER_MAX_RANGE);
            let bearing = rng
                .random_range(-SCATTER_HALF_ARC..SCATTER_HALF_ARC)
                .to_radians();
            let size = Vec3::new(
                rng.random_range(SCATTER_MIN_SIZE..SCATTER_MAX_SIZE),
                rng.random_range(SCATTER_MIN_SIZE..SCATTER_MAX_SIZE),
                rng.random_range(SCATTER_MIN_SIZE..SCATTER_MAX_SIZE),
            );
            let texture = TextureId::OBSTACLES[rng.random_range(0..TextureId::OBSTACLES.len())];
            let base = Vec3::new(range * bearing.sin(), 0.0, range * bearing.cos());
            set.push_grounded(base, size, texture);
        }

        log::debug!("Scattered {} obstacles (seed {})", set.len(), seed);
        set
    }

    /// Add a box centred at `center`, returning its id
    pub fn push(&mut self, center: Vec3, size: Vec3, texture: TextureId) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(StaticObstacle::new(id, center, size, texture));
        id
    }

    /// Add a box whose bottom face sits on y = 0 below `base`
    pub fn push_grounded(&mut self, base: Vec3, size: Vec3, texture: TextureId) -> u32 {
        let center = Vec3::new(base.x, size.y.abs() * 0.5, base.z);
        self.push(center, size, texture)
    }

    pub fn get(&self, id: u32) -> Option<&StaticObstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StaticObstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[StaticObstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a StaticObstacle;
    type IntoIter = std::slice::Iter<'a, StaticObstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}
