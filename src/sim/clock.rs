//! Fixed timestep accumulator
//!
//! Converts variable frame times into a whole number of `SIM_DT` steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    accumulator: f32,
    ticks: u64,
    /// Stop stepping once this many ticks have run
    limit: Option<u64>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that runs exactly `seconds` of simulated time, then stops stepping
    pub fn with_duration(seconds: f32) -> Self {
        Self {
            limit: Some(Self::ticks_for(seconds)),
            ..Self::default()
        }
    }

    /// Whole steps covering `seconds`; 0 for non-positive or non-finite input
    pub fn ticks_for(seconds: f32) -> u64 {
        if seconds.is_finite() && seconds > 0.0 {
            (f64::from(seconds) / f64::from(SIM_DT)).round() as u64
        } else {
            0
        }
    }

    /// Host frame length for a frame rate, falling back to one step per frame
    pub fn frame_dt(fps: f32) -> f32 {
        if fps.is_finite() && fps > 0.0 {
            1.0 / fps
        } else {
            SIM_DT
        }
    }

    /// Duration limit reached
    pub fn is_finished(&self) -> bool {
        self.limit.is_some_and(|limit| self.ticks >= limit)
    }

    /// Feed one frame's elapsed time and run `step(SIM_DT)` for each whole
    /// step it covers
    ///
    /// Elapsed time is clamped to `[0, MAX_FRAME_DT]`, and no more than
    /// `MAX_SUBSTEPS` steps run per call; leftover time beyond that is
    /// dropped. A clock built with [`SimulationClock::with_duration`] never
    /// runs past its limit. Returns the number of steps run.
    pub fn advance<F: FnMut(f32)>(&mut self, elapsed: f32, mut step: F) -> u32 {
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if self.is_finished() {
                self.accumulator = 0.0;
                break;
            }
            step(SIM_DT);
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::trace!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Total steps run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time in seconds
    pub fn seconds(&self) -> f64 {
        self.ticks as f64 * f64::from(SIM_DT)
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_per_frame() {
        let mut clock = SimulationClock::new();
        let mut steps = 0;
        // Slightly over one 60 Hz frame to stay clear of f32 rounding
        let ran = clock.advance(1.0 / 60.0 + 1e-5, |dt| {
            assert_eq!(dt, SIM_DT);
            steps += 1;
        });
        assert_eq!(ran, 2);
        assert_eq!(steps, 2);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_accumulates_short_frames() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.6, |_| {}), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6, |_| {}), 1);
        assert!(clock.alpha() > 0.0 && clock.alpha() < 1.0);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = SimulationClock::new();
        // 0.1s would be 12 steps; capped at 8 and the rest dropped
        assert_eq!(clock.advance(5.0, |_| {}), MAX_SUBSTEPS);
        assert_eq!(clock.advance(0.0, |_| {}), 0);
    }

    #[test]
    fn test_negative_and_nan_elapsed() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.advance(-1.0, |_| {}), 0);
        assert_eq!(clock.advance(f32::NAN, |_| {}), 0);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_low_frame_rate_covers_requested_duration() {
        // 5 fps frames are clamped to 0.1s and capped at 8 steps each, so
        // the host keeps feeding frames until the duration is reached
        let mut clock = SimulationClock::with_duration(10.0);
        let frame_dt = SimulationClock::frame_dt(5.0);
        let mut steps = 0u64;
        let mut frames = 0;
        while !clock.is_finished() {
            clock.advance(frame_dt, |_| steps += 1);
            frames += 1;
            assert!(frames < 10_000);
        }
        assert_eq!(clock.ticks(), 1200);
        assert_eq!(steps, 1200);
        assert!((clock.seconds() - 10.0).abs() < 1e-4);
        assert_eq!(frames, 150);

        // No extra steps once finished
        assert_eq!(clock.advance(frame_dt, |_| steps += 1), 0);
        assert_eq!(steps, 1200);
    }

    #[test]
    fn test_duration_stops_mid_frame() {
        // 60 fps: 2 steps per frame, 7 steps for 7/120 s
        let mut clock = SimulationClock::with_duration(7.0 * SIM_DT);
        let mut steps = 0;
        while !clock.is_finished() {
            clock.advance(1.0 / 60.0 + 1e-5, |_| steps += 1);
        }
        assert_eq!(steps, 7);
    }

    #[test]
    fn test_frame_arithmetic() {
        assert_eq!(SimulationClock::ticks_for(10.0), 1200);
        assert_eq!(SimulationClock::ticks_for(0.0), 0);
        assert_eq!(SimulationClock::ticks_for(-3.0), 0);
        assert_eq!(SimulationClock::ticks_for(f32::INFINITY), 0);
        assert!((SimulationClock::frame_dt(60.0) - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(SimulationClock::frame_dt(0.0), SIM_DT);
        assert_eq!(SimulationClock::frame_dt(f32::NAN), SIM_DT);
        assert!(SimulationClock::with_duration(0.0).is_finished());
        assert!(!SimulationClock::new().is_finished());
    }

    #[test]
    fn test_seconds() {
        let mut clock = SimulationClock::new();
        for _ in 0..60 {
            clock.advance(1.0 / 60.0 + 1e-5, |_| {});
        }
        assert!((clock.seconds() - 1.0).abs() < 0.02);
        clock.reset();
        assert_eq!(clock.ticks(), 0);
    }
}
