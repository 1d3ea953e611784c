//! Ballistic projectile under gravity, quadratic drag and damping

use std::collections::VecDeque;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::LaunchParams;
use crate::consts::{PROJECTILE_RADIUS, STOP_HEIGHT, STOP_SPEED, TRAIL_CAPACITY, TRAIL_MIN_SPACING};
use crate::spherical_to_cartesian;

/// Launch state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaunchPhase {
    /// Sitting at the launch point (or stopped), not integrating
    #[default]
    Idle,
    /// In flight
    Running,
}

/// Bounded history of past positions, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec3>,
    capacity: usize,
    min_spacing: f32,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_CAPACITY, TRAIL_MIN_SPACING)
    }
}

impl Trail {
    pub fn new(capacity: usize, min_spacing: f32) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
            min_spacing,
        }
    }

    /// Whether `pos` is far enough from the last stored point to record
    pub fn should_record(&self, pos: Vec3) -> bool {
        match self.points.back() {
            None => true,
            Some(last) => (pos - *last).abs().max_element() > self.min_spacing,
        }
    }

    /// Record `pos` if it moved more than the spacing on any axis
    ///
    /// Returns true when a point was stored. The oldest point is evicted once
    /// the trail exceeds its capacity.
    pub fn record(&mut self, pos: Vec3) -> bool {
        if !self.should_record(pos) {
            return false;
        }
        self.points.push_back(pos);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.back().copied()
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Vec3> {
        self.iter().collect()
    }
}

/// The launched sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub trail: Trail,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new(PROJECTILE_RADIUS)
    }
}

impl Projectile {
    pub fn new(radius: f32) -> Self {
        Self {
            position: Vec3::new(0.0, radius, 0.0),
            velocity: Vec3::ZERO,
            radius,
            trail: Trail::default(),
        }
    }

    /// Launch point: resting on the ground at the origin
    #[inline]
    pub fn launch_origin(&self) -> Vec3 {
        Vec3::new(0.0, self.radius, 0.0)
    }

    /// Re-seed position and velocity from launch parameters, clearing the trail
    pub fn launch(&mut self, params: &LaunchParams) {
        self.launch_from(self.launch_origin(), params);
    }

    pub fn launch_from(&mut self, origin: Vec3, params: &LaunchParams) {
        self.position = origin;
        self.velocity =
            spherical_to_cartesian(params.launch_speed, params.launch_angle, params.launch_yaw);
        self.trail.clear();
    }

    /// Acceleration from drag and gravity at the current velocity
    ///
    /// Drag is `-c·|v|·v/m`; it is skipped entirely when `m <= 0` rather
    /// than dividing by zero.
    pub fn acceleration(&self, params: &LaunchParams) -> Vec3 {
        let mut accel = Vec3::ZERO;
        if params.mass > 0.0 {
            let speed = self.velocity.length();
            accel -= self.velocity * (params.drag_coefficient * speed / params.mass);
        }
        accel.y -= params.gravity;
        accel
    }

    /// Semi-implicit Euler step: velocity first, then damping, then position
    pub fn integrate(&mut self, params: &LaunchParams, dt: f32) {
        let accel = self.acceleration(params);
        self.velocity += accel * dt;
        self.velocity *= params.damping_factor;
        self.position += self.velocity * dt;
    }

    /// Store the current position in the trail if it moved far enough
    pub fn record_trail(&mut self) -> bool {
        self.trail.record(self.position)
    }

    /// Slow and low enough to stop
    pub fn is_settled(&self) -> bool {
        self.velocity.length() < STOP_SPEED && self.position.y < STOP_HEIGHT
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
