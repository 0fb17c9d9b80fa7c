//! Fixed-timestep frame loop
//!
//! The host calls [`FrameLoop::frame`] from its animation callback with the
//! wall-clock delta. The loop accumulates time and advances the simulation in
//! fixed `SIM_DT` substeps, so gameplay never depends on the display rate.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// A game advanced by a pure step function
pub trait Simulation {
    /// Input sampled at frame boundaries
    type Input: Clone + Default;

    /// Advance the game state by one fixed timestep
    fn tick(&mut self, input: &Self::Input, dt: f32);

    /// Clear inputs that should apply once (presses), keeping held state
    fn clear_one_shot(input: &mut Self::Input);
}

/// Drives a [`Simulation`] from variable-rate frames
#[derive(Debug)]
pub struct FrameLoop<S: Simulation> {
    pub sim: S,
    /// Latest sampled input; the host overwrites it between frames
    pub input: S::Input,
    accumulator: f32,
    running: bool,
}

impl<S: Simulation> FrameLoop<S> {
    pub fn new(sim: S) -> Self {
        Self {
            sim,
            input: S::Input::default(),
            accumulator: 0.0,
            running: true,
        }
    }

    /// Run simulation ticks for a frame of `dt` seconds, returns substeps run
    pub fn frame(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.sim.tick(&self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs are consumed by the first substep only
            S::clear_one_shot(&mut self.input);
        }
        substeps
    }

    /// Cancel the loop (unmount). Pending time is discarded.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        ticks: u32,
        presses: u32,
    }

    #[derive(Clone, Default)]
    struct CounterInput {
        press: bool,
    }

    impl Simulation for Counter {
        type Input = CounterInput;

        fn tick(&mut self, input: &CounterInput, _dt: f32) {
            self.ticks += 1;
            if input.press {
                self.presses += 1;
            }
        }

        fn clear_one_shot(input: &mut CounterInput) {
            input.press = false;
        }
    }

    #[test]
    fn test_fixed_substeps() {
        let mut lp = FrameLoop::new(Counter::default());
        assert_eq!(lp.frame(SIM_DT * 3.5), 3);
        assert_eq!(lp.frame(SIM_DT * 0.6), 1);
        assert_eq!(lp.sim.ticks, 4);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut lp = FrameLoop::new(Counter::default());
        // 5 seconds behind: clamped to MAX_FRAME_DT, capped at MAX_SUBSTEPS
        let steps = lp.frame(5.0);
        assert!(steps <= MAX_SUBSTEPS);
        assert!(steps >= 1);
    }

    #[test]
    fn test_one_shot_consumed_once() {
        let mut lp = FrameLoop::new(Counter::default());
        lp.input.press = true;
        lp.frame(SIM_DT * 4.0);
        assert_eq!(lp.sim.presses, 1);
        assert!(!lp.input.press);
    }

    #[test]
    fn test_stop_cancels() {
        let mut lp = FrameLoop::new(Counter::default());
        lp.frame(SIM_DT);
        lp.stop();
        assert_eq!(lp.frame(SIM_DT * 4.0), 0);
        assert_eq!(lp.sim.ticks, 1);
        assert!(!lp.is_running());

        lp.resume();
        assert_eq!(lp.frame(SIM_DT), 1);
    }
}
