//! Scene configuration
//!
//! Physics parameters for both scenes plus the obstacle layout, persisted as
//! pretty-printed JSON. Validation is the only place invalid values are
//! rejected; the simulation itself never returns errors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Wave field and boat parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaParams {
    /// Wave amplitude (units)
    pub wave_height: f32,
    /// Spatial frequency (radians per unit)
    pub wave_freq: f32,
    /// Phase speed multiplier applied to elapsed time
    pub wave_speed: f32,
    /// Sea mesh vertices per side
    pub grid_size: usize,
    /// Sea mesh side length (units)
    pub grid_width: f32,
    /// Boat hull width (x)
    pub boat_width: f32,
    /// Boat hull length (z)
    pub boat_length: f32,
    /// Boat hull height (y)
    pub boat_height: f32,
    /// Orientation smoothing rate (1/s)
    pub smoothing: f32,
}

impl Default for SeaParams {
    fn default() -> Self {
        Self {
            wave_height: WAVE_HEIGHT,
            wave_freq: WAVE_FREQ,
            wave_speed: WAVE_SPEED,
            grid_size: SEA_GRID_SIZE,
            grid_width: SEA_WIDTH,
            boat_width: BOAT_WIDTH,
            boat_length: BOAT_LENGTH,
            boat_height: BOAT_HEIGHT,
            smoothing: BOAT_SMOOTHING,
        }
    }
}

impl SeaParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("sea.wave_height", self.wave_height)?;
        finite("sea.wave_freq", self.wave_freq)?;
        finite("sea.wave_speed", self.wave_speed)?;
        check(
            "sea.wave_speed",
            self.wave_speed,
            self.wave_speed >= 0.0,
            "wave time must not run backwards",
        )?;
        check(
            "sea.grid_width",
            self.grid_width,
            self.grid_width.is_finite() && self.grid_width > 0.0,
            "must be positive",
        )?;
        for (field, value) in [
            ("sea.boat_width", self.boat_width),
            ("sea.boat_length", self.boat_length),
            ("sea.boat_height", self.boat_height),
        ] {
            check(field, value, value.is_finite() && value > 0.0, "hull dimensions must be positive")?;
        }
        check(
            "sea.smoothing",
            self.smoothing,
            self.smoothing.is_finite() && self.smoothing >= 0.0,
            "must be non-negative",
        )?;
        Ok(())
    }
}

/// Documented slider range for one launch parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub field: &'static str,
    pub min: f32,
    pub max: f32,
}

/// Projectile launch and physics parameters
///
/// The core accepts any value that passes [`LaunchParams::validate`]; the
/// narrower [`LaunchParams::RANGES`] are what a UI should offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParams {
    /// Launch speed (units/s)
    pub launch_speed: f32,
    /// Elevation above the horizon (degrees)
    pub launch_angle: f32,
    /// Heading around +Y, 0 = +Z (degrees)
    pub launch_yaw: f32,
    /// Projectile mass
    pub mass: f32,
    /// Quadratic drag coefficient
    pub drag_coefficient: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Bounce restitution (0 = dead stop, 1 = elastic)
    pub restitution: f32,
    /// Per-tick velocity multiplier
    pub damping_factor: f32,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            launch_speed: 30.0,
            launch_angle: 45.0,
            launch_yaw: 0.0,
            mass: 1.0,
            drag_coefficient: 0.01,
            gravity: 9.81,
            restitution: 0.6,
            damping_factor: 0.99,
        }
    }
}

impl LaunchParams {
    /// UI slider ranges, in field order
    pub const RANGES: [ParamRange; 8] = [
        ParamRange { field: "launch_speed", min: 10.0, max: 100.0 },
        ParamRange { field: "launch_angle", min: 10.0, max: 80.0 },
        ParamRange { field: "launch_yaw", min: -180.0, max: 180.0 },
        ParamRange { field: "mass", min: 0.1, max: 5.0 },
        ParamRange { field: "drag_coefficient", min: 0.0, max: 0.05 },
        ParamRange { field: "gravity", min: 0.0, max: 20.0 },
        ParamRange { field: "restitution", min: 0.0, max: 1.0 },
        ParamRange { field: "damping_factor", min: 0.9, max: 0.999 },
    ];

    fn values(&self) -> [f32; 8] {
        [
            self.launch_speed,
            self.launch_angle,
            self.launch_yaw,
            self.mass,
            self.drag_coefficient,
            self.gravity,
            self.restitution,
            self.damping_factor,
        ]
    }

    fn values_mut(&mut self) -> [&mut f32; 8] {
        [
            &mut self.launch_speed,
            &mut self.launch_angle,
            &mut self.launch_yaw,
            &mut self.mass,
            &mut self.drag_coefficient,
            &mut self.gravity,
            &mut self.restitution,
            &mut self.damping_factor,
        ]
    }

    /// Copy with every field clamped to its UI range
    pub fn clamped_to_ui(&self) -> Self {
        let mut params = self.clone();
        for (value, range) in params.values_mut().into_iter().zip(Self::RANGES) {
            *value = value.clamp(range.min, range.max);
        }
        params
    }

    /// Reject values that would poison the integrator
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (value, range) in self.values().into_iter().zip(Self::RANGES) {
            finite(range.field, value)?;
        }
        check("mass", self.mass, self.mass > 0.0, "must be positive")?;
        check(
            "drag_coefficient",
            self.drag_coefficient,
            self.drag_coefficient >= 0.0,
            "must be non-negative",
        )?;
        check(
            "restitution",
            self.restitution,
            self.restitution >= 0.0,
            "must be non-negative",
        )?;
        check(
            "damping_factor",
            self.damping_factor,
            (0.0..=1.0).contains(&self.damping_factor),
            "must be within [0, 1]",
        )?;
        Ok(())
    }
}

/// How the launch scene's obstacles are placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleLayout {
    /// Ground plane only
    Empty,
    /// Fixed row of blocks down-range
    #[default]
    Course,
    /// Seeded random blocks
    Scatter { seed: u64, count: usize },
}

/// Complete configuration for both scenes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sea: SeaParams,
    pub launch: LaunchParams,
    pub obstacles: ObstacleLayout,
}

impl SceneConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: SceneConfig = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, json).map_err(ConfigError::Write)?;
        log::info!("Scene config saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sea.validate()?;
        self.launch.validate()
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(field, value, value.is_finite(), "must be finite")
}

fn check(field: &'static str, value: f32, ok: bool, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, value, reason })
    }
}
