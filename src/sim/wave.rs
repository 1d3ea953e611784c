//! Procedural wave field
//!
//! Two sine trains, one along X and one along Z at twice the frequency and
//! half the amplitude:
//!
//! h(x, z, t) = A·sin(f·x + t) + 0.5·A·sin(2f·z + 1.3t)
//!
//! The normal is derived analytically from the same expression, so any change
//! to `height_at` must be mirrored in `normal_at`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::SeaParams;
use crate::consts::{WAVE_FREQ, WAVE_HEIGHT, WAVE_SPEED};

/// Phase speed of the Z wave relative to the X wave
const Z_PHASE_SPEED: f32 = 1.3;

/// Analytic height field advanced by elapsed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveField {
    /// Amplitude of the X wave (the Z wave gets half)
    pub wave_height: f32,
    /// Spatial frequency of the X wave (the Z wave gets double)
    pub wave_freq: f32,
    /// Multiplier from elapsed seconds to phase
    pub wave_speed: f32,
    /// Accumulated phase, never decreases
    time: f32,
}

impl Default for WaveField {
    fn default() -> Self {
        Self::new(WAVE_HEIGHT, WAVE_FREQ, WAVE_SPEED)
    }
}

impl WaveField {
    pub fn new(wave_height: f32, wave_freq: f32, wave_speed: f32) -> Self {
        Self {
            wave_height,
            wave_freq,
            wave_speed,
            time: 0.0,
        }
    }

    pub fn from_params(params: &SeaParams) -> Self {
        Self::new(params.wave_height, params.wave_freq, params.wave_speed)
    }

    /// Current phase
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the phase by `dt * wave_speed`
    ///
    /// Negative or non-finite steps are ignored so the phase stays monotonic.
    pub fn advance(&mut self, dt: f32) {
        let step = dt * self.wave_speed;
        if step.is_finite() && step > 0.0 {
            self.time += step;
        }
    }

    /// Surface height at (x, z)
    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let a = self.wave_height;
        let f = self.wave_freq;
        let t = self.time;
        a * (f * x + t).sin() + 0.5 * a * (2.0 * f * z + Z_PHASE_SPEED * t).sin()
    }

    /// Partial derivatives (dh/dx, dh/dz) at (x, z)
    #[inline]
    pub fn slope_at(&self, x: f32, z: f32) -> (f32, f32) {
        let a = self.wave_height;
        let f = self.wave_freq;
        let t = self.time;
        let dh_dx = a * f * (f * x + t).cos();
        // d/dz of 0.5A·sin(2fz + 1.3t) = 0.5A · 2f · cos(...)
        let dh_dz = a * f * (2.0 * f * z + Z_PHASE_SPEED * t).cos();
        (dh_dx, dh_dz)
    }

    /// Unit surface normal at (x, z)
    #[inline]
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let (dh_dx, dh_dz) = self.slope_at(x, z);
        // y component is 1, so the vector is never zero-length
        Vec3::new(-dh_dx, 1.0, -dh_dz).normalize()
    }
}
