//! Fixed timestep clock
//!
//! Converts variable frame times into a whole number of simulation ticks.
//! Long frames are clamped and the number of substeps per frame is capped, so
//! a stalled frame cannot snowball into ever longer catch-up work.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    step: f64,
    max_substeps: u32,
    max_frame_time: f64,
    accumulator: f64,
    total_ticks: u64,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_TIME)
    }
}

impl FixedClock {
    pub fn new(step: f64, max_substeps: u32, max_frame_time: f64) -> Self {
        Self {
            step,
            max_substeps,
            max_frame_time,
            accumulator: 0.0,
            total_ticks: 0,
        }
    }

    /// Feed one frame's elapsed time, returns the ticks to run now
    pub fn advance(&mut self, elapsed_secs: f64) -> u32 {
        // NaN would poison the accumulator for good
        let dt = if elapsed_secs.is_nan() {
            0.0
        } else {
            elapsed_secs.clamp(0.0, self.max_frame_time)
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        self.total_ticks += u64::from(substeps);
        substeps
    }

    /// Unconsumed time, in seconds
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Fraction of a tick waiting in the accumulator (for interpolation)
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).min(1.0)
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
