//! Scene state and core simulation types
//!
//! Each scene owns all of its mutable state; nothing lives in globals.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::boat::FloatingBody;
use super::obstacle::ObstacleSet;
use super::projectile::{LaunchPhase, Projectile};
use super::wave::WaveField;
use crate::config::{LaunchParams, SceneConfig, SeaParams};
use crate::error::ConfigError;

/// Boat-on-waves scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeaState {
    pub sea: WaveField,
    pub boat: FloatingBody,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Default for SeaState {
    fn default() -> Self {
        Self::new(&SeaParams::default())
    }
}

impl SeaState {
    pub fn new(params: &SeaParams) -> Self {
        Self {
            sea: WaveField::from_params(params),
            boat: FloatingBody::from_params(params),
            time_ticks: 0,
        }
    }
}

/// Feedback from one launch tick, for the host's logging and sound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaunchEvent {
    /// Bounced off the ground at this impact speed
    GroundBounce { speed: f32 },
    /// Bounced off an obstacle at this impact speed
    ObstacleHit { id: u32, speed: f32 },
    /// Came to rest and returned to Idle
    Stopped { position: Vec3 },
}

/// Projectile-launch scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchState {
    pub projectile: Projectile,
    pub obstacles: ObstacleSet,
    params: LaunchParams,
    phase: LaunchPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<LaunchEvent>,
}

impl Default for LaunchState {
    fn default() -> Self {
        Self::build(LaunchParams::default(), ObstacleSet::course())
    }
}

impl LaunchState {
    /// Build an Idle scene with the projectile at the launch point
    pub fn new(params: LaunchParams, obstacles: ObstacleSet) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::build(params, obstacles))
    }

    fn build(params: LaunchParams, obstacles: ObstacleSet) -> Self {
        let mut state = Self {
            projectile: Projectile::default(),
            obstacles,
            params,
            phase: LaunchPhase::Idle,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.reset();
        state
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.launch.clone(),
            ObstacleSet::from_layout(&config.obstacles),
        )
    }

    pub fn params(&self) -> &LaunchParams {
        &self.params
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == LaunchPhase::Running
    }

    /// Replace the physics parameters, refusing invalid ones
    ///
    /// Takes effect on the next tick; launch speed/angle/yaw only matter at
    /// the next [`LaunchState::reset`].
    pub fn set_params(&mut self, params: LaunchParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Stop, clear the trail and re-seed the projectile from the launch parameters
    ///
    /// Safe in either phase.
    pub fn reset(&mut self) {
        self.projectile.launch(&self.params);
        self.phase = LaunchPhase::Idle;
        log::debug!(
            "Launch reset: speed={} angle={} yaw={}",
            self.params.launch_speed,
            self.params.launch_angle,
            self.params.launch_yaw
        );
    }

    /// Begin integrating
    pub fn start(&mut self) {
        if self.phase == LaunchPhase::Idle {
            self.phase = LaunchPhase::Running;
            log::info!(
                "Launch started from {:?} at {:?}",
                self.projectile.position,
                self.projectile.velocity
            );
        }
    }

    /// Zero velocity and return to Idle
    pub(crate) fn stop(&mut self) {
        self.projectile.velocity = Vec3::ZERO;
        self.phase = LaunchPhase::Idle;
    }
}
