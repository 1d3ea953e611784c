//! Free-fly camera with an optional chase mode for the boat

use glam::{Mat4, Vec3};

use crate::sim::FloatingBody;

/// Movement directions for keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
}

const MAX_PITCH: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Euler-angle camera (yaw/pitch in degrees, yaw -90 looks down -Z)
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    zoom: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 3.0, 10.0))
    }
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: -90.0,
            pitch: -20.0,
            movement_speed: 5.0,
            mouse_sensitivity: 0.1,
            zoom: MAX_ZOOM,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update_vectors();
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn process_keyboard(&mut self, direction: CameraMove, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            CameraMove::Forward => self.position += self.front * velocity,
            CameraMove::Backward => self.position -= self.front * velocity,
            CameraMove::Left => self.position -= self.right * velocity,
            CameraMove::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a mouse delta in pixels; y grows upward
    pub fn process_mouse(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        }
        self.update_vectors();
    }

    pub fn process_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Sit `distance` behind and `height` above the boat, looking at it
    pub fn follow(&mut self, boat: &FloatingBody, distance: f32, height: f32) {
        let target = boat.position;
        self.position = target - boat.heading() * distance + Vec3::Y * height;
        self.look_at(target);
    }

    /// Turn to face `target`; no-op when already standing on it
    pub fn look_at(&mut self, target: Vec3) {
        let Some(dir) = (target - self.position).try_normalize() else {
            return;
        };
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees().clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        self.right = self.front.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
