//! Wave Ballistics - simulation cores for two small 3D demos
//!
//! Core modules:
//! - `sim`: Deterministic simulation (waves, boat, projectile, collisions)
//! - `mesh`: CPU-side vertex data for the host renderer
//! - `camera`: Free-fly camera math
//! - `assets`: Texture handle table
//! - `config`: Scene configuration, JSON load/save and validation

pub mod assets;
pub mod camera;
pub mod config;
pub mod error;
pub mod mesh;
pub mod sim;

pub use config::{LaunchParams, ObstacleLayout, SceneConfig, SeaParams};
pub use error::ConfigError;

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Wave defaults
    pub const WAVE_HEIGHT: f32 = 2.5;
    pub const WAVE_FREQ: f32 = 0.2;
    pub const WAVE_SPEED: f32 = 1.0;

    /// Boat defaults
    pub const BOAT_WIDTH: f32 = 1.0;
    pub const BOAT_LENGTH: f32 = 3.0;
    pub const BOAT_HEIGHT: f32 = 0.8;
    /// Orientation smoothing rate (1/s)
    pub const BOAT_SMOOTHING: f32 = 5.0;
    /// Forward speed while the throttle is held (units/s)
    pub const BOAT_FORWARD_SPEED: f32 = 2.0;
    /// Turn rate while steering (degrees/s)
    pub const BOAT_TURN_RATE: f32 = 50.0;

    /// Sea mesh defaults
    pub const SEA_GRID_SIZE: usize = 100;
    pub const SEA_WIDTH: f32 = 100.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 0.5;
    /// Trail capacity (oldest entries evicted first)
    pub const TRAIL_CAPACITY: usize = 100;
    /// Minimum per-axis displacement before a new trail point is stored
    pub const TRAIL_MIN_SPACING: f32 = 1.0;

    /// Stopping condition: speed below this...
    pub const STOP_SPEED: f32 = 0.2;
    /// ...while the projectile is below this height
    pub const STOP_HEIGHT: f32 = 1.0;

    /// Extra push-out applied after resolving an obstacle contact
    pub const CONTACT_EPSILON: f32 = 0.001;
    /// Below this separation the contact normal falls back to +Y
    pub const NORMAL_EPSILON: f32 = 1e-4;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert launch speed, elevation and yaw (degrees) to a velocity vector
///
/// Yaw 0 points down +Z, yaw 90 points down +X.
#[inline]
pub fn spherical_to_cartesian(speed: f32, angle_deg: f32, yaw_deg: f32) -> Vec3 {
    let angle = angle_deg.to_radians();
    let yaw = yaw_deg.to_radians();
    Vec3::new(
        speed * angle.cos() * yaw.sin(),
        speed * angle.sin(),
        speed * angle.cos() * yaw.cos(),
    )
}
