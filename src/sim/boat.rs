//! Floating body coupled to the wave field
//!
//! The boat does not integrate buoyancy: every update snaps it to the surface
//! height under its origin and eases pitch/roll toward the local wave normal.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::wave::WaveField;
use crate::config::SeaParams;
use crate::consts::{BOAT_HEIGHT, BOAT_LENGTH, BOAT_SMOOTHING, BOAT_WIDTH};
use crate::wrap_degrees;

/// A boat riding the wave field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingBody {
    /// World position; `y` tracks the wave surface
    pub position: Vec3,
    /// Orientation in degrees: x = pitch, y = yaw, z = roll
    pub rotation: Vec3,
    width: f32,
    length: f32,
    height: f32,
    /// Orientation smoothing rate (1/s)
    pub smoothing: f32,
}

impl Default for FloatingBody {
    fn default() -> Self {
        Self::new(BOAT_WIDTH, BOAT_LENGTH, BOAT_HEIGHT)
    }
}

impl FloatingBody {
    /// Create a body at the origin with the given hull dimensions
    ///
    /// Dimensions are stored as absolute values; zero-sized hulls are
    /// rejected earlier by [`SeaParams::validate`].
    pub fn new(width: f32, length: f32, height: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            width: width.abs(),
            length: length.abs(),
            height: height.abs(),
            smoothing: BOAT_SMOOTHING,
        }
    }

    pub fn from_params(params: &SeaParams) -> Self {
        let mut body = Self::new(params.boat_width, params.boat_length, params.boat_height);
        body.smoothing = params.smoothing;
        body
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn roll(&self) -> f32 {
        self.rotation.z
    }

    /// Snap to the surface and ease pitch/roll toward the wave normal
    pub fn update(&mut self, sea: &WaveField, dt: f32) {
        self.position.y = sea.height_at(self.position.x, self.position.z);

        let normal = sea.normal_at(self.position.x, self.position.z);
        let (target_pitch, target_roll) = Self::tilt_from_normal(normal);

        let s = self.blend_factor(dt);
        self.rotation.x = self.rotation.x * (1.0 - s) + target_pitch * s;
        self.rotation.z = self.rotation.z * (1.0 - s) + target_roll * s;
    }

    /// Target (pitch, roll) in degrees for a surface normal
    #[inline]
    pub fn tilt_from_normal(normal: Vec3) -> (f32, f32) {
        let pitch = (-normal.z).clamp(-1.0, 1.0).asin().to_degrees();
        let roll = normal.x.clamp(-1.0, 1.0).asin().to_degrees();
        (pitch, roll)
    }

    /// Per-update blend weight `k·dt`, limited to [0, 1]
    ///
    /// At 1 the orientation snaps to the target; it never overshoots.
    #[inline]
    pub fn blend_factor(&self, dt: f32) -> f32 {
        let s = self.smoothing * dt;
        if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Place the body at (x, z); height is picked up on the next update
    pub fn set_position(&mut self, x: f32, z: f32) {
        self.position.x = x;
        self.position.z = z;
    }

    /// Unit direction of travel in the XZ plane (yaw 0 heads toward -Z)
    pub fn heading(&self) -> Vec3 {
        let yaw = self.rotation.y.to_radians();
        Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
    }

    /// Step `distance` units along the current heading
    pub fn move_forward(&mut self, distance: f32) {
        let step = self.heading() * distance;
        self.position.x += step.x;
        self.position.z += step.z;
    }

    /// Add `angle` degrees of yaw
    pub fn rotate(&mut self, angle: f32) {
        self.rotation.y = wrap_degrees(self.rotation.y + angle);
    }

    /// Model matrix for rendering: translate, then pitch, yaw, roll
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
    }
}
