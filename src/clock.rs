//! Fixed-timestep scheduling
//!
//! Converts variable frame deltas into a whole number of simulation ticks.
//! Leftover time carries into the next frame; long stalls are clamped so a
//! slow frame never triggers a burst of catch-up ticks.

use crate::consts::{MAX_SUBSTEPS, TICK_DT};

#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f64, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time banked toward the next tick
    pub fn accumulated(&self) -> f64 {
        self.accumulator
    }

    /// Add a frame's elapsed seconds and return how many ticks to run now
    pub fn advance(&mut self, dt: f64) -> u32 {
        // Cap at one frame's worth of ticks
        let dt = dt.clamp(0.0, self.step * self.max_substeps as f64);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of the next tick already elapsed, for interpolation
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedTimestep::new(0.1, 4);
        assert_eq!(clock.advance(0.06), 0);
        assert_eq!(clock.advance(0.06), 1);
        assert!((clock.accumulated() - 0.02).abs() < 1e-9);
        assert!((clock.alpha() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FixedTimestep::default();
        assert_eq!(clock.advance(10.0), MAX_SUBSTEPS);
        assert!(clock.accumulated() < clock.step());
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut clock = FixedTimestep::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.accumulated(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FixedTimestep::default();
        clock.advance(0.05);
        clock.reset();
        assert_eq!(clock.accumulated(), 0.0);
    }
}
