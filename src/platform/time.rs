//! Fixed timestep accumulator
//!
//! Converts variable host frame times into whole simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we try to catch up on (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    dt: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            dt,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Add elapsed frame time and return how many ticks to run now.
    ///
    /// Long stalls are clamped, and leftover time beyond the substep cap is
    /// dropped rather than carried into later frames.
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed_secs.min(MAX_FRAME_TIME);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.dt).clamp(0.0, 1.0)
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_dt() {
        let mut clock = FixedTimestep::new(0.016, 8);
        assert_eq!(clock.advance(0.016), 1);
        assert_eq!(clock.advance(0.008), 0);
        assert_eq!(clock.advance(0.008), 1);
    }

    #[test]
    fn test_multiple_ticks_in_long_frame() {
        let mut clock = FixedTimestep::new(0.016, 8);
        assert_eq!(clock.advance(0.050), 3);
        assert!(clock.alpha() > 0.0 && clock.alpha() < 1.0);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FixedTimestep::new(0.010, 4);
        assert_eq!(clock.advance(0.1), 4);
        // Backlog was dropped, not replayed
        assert!(clock.advance(0.001) <= 1);
    }

    #[test]
    fn test_bad_elapsed_ignored() {
        let mut clock = FixedTimestep::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
