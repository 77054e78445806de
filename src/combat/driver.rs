//! Fixed-step driver
//!
//! Converts arbitrary frame deltas into simulation steps of constant length.
//! When a frame runs long the driver catches up by firing several steps in
//! one call; it never compresses or extrapolates time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedStep {
    step_s: f32,
    accumulated: f32,
}

impl FixedStep {
    pub fn new(step_s: f32) -> Self {
        Self {
            step_s,
            accumulated: 0.0,
        }
    }

    pub fn step_s(&self) -> f32 {
        self.step_s
    }

    /// Time banked but not yet consumed by a step
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Bank elapsed real time
    pub fn accumulate(&mut self, dt: f32) {
        self.accumulated += dt;
    }

    /// Consume one step if enough time is banked
    pub fn try_step(&mut self) -> Option<f32> {
        if self.accumulated < self.step_s {
            return None;
        }
        self.accumulated -= self.step_s;
        Some(self.step_s)
    }

    /// Bank `dt` and invoke `on_step(step)` once per whole step banked
    pub fn advance(&mut self, dt: f32, mut on_step: impl FnMut(f32)) {
        self.accumulate(dt);
        while let Some(step) = self.try_step() {
            on_step(step);
        }
    }
}
