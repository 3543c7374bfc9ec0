//! Closed-loop step-size controller.
//!
//! A first-order feedback loop driven by the smoothed error energy. Per
//! iteration, with `E = Σ e²` over the `P` error entries:
//!
//! ```text
//! s'   = α·s + (1 − α)·E
//! rms  = sqrt(E / P + 1e-6)
//! raw  = ρ·(s' − η) / (rms + 1e-6)
//! μ'   = clamp(β·μ + (1 − β)·raw, μ_min, μ_max)
//! ```
//!
//! `μ` feeds back into itself every step, so the controller is an IIR filter
//! on the raw update rather than a moving average of it.

use ndarray::ArrayView1;

use crate::config::ApaConfig;

/// Bias inside the RMS square root; keeps the denominator away from zero
/// when the error vanishes.
const RMS_BIAS: f64 = 1e-6;

/// Bias added to the RMS before dividing.
const DENOMINATOR_BIAS: f64 = 1e-6;

/// Step-size feedback state machine.
///
/// Carries the current step size and the smoothed error energy between
/// iterations. The smoothed energy starts at the target energy `η`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSizeController {
    step_size: f64,
    smoothed_energy: f64,
    min_step_size: f64,
    max_step_size: f64,
    adaptation_gain: f64,
    target_energy: f64,
    energy_smoothing: f64,
    step_momentum: f64,
}

impl StepSizeController {
    /// Creates a controller in its initial state (`μ = μ0`, `s = η`).
    pub fn from_config(config: &ApaConfig) -> Self {
        Self {
            step_size: config.initial_step_size(),
            smoothed_energy: config.target_energy(),
            min_step_size: config.min_step_size(),
            max_step_size: config.max_step_size(),
            adaptation_gain: config.adaptation_gain(),
            target_energy: config.target_energy(),
            energy_smoothing: config.energy_smoothing(),
            step_momentum: config.step_momentum(),
        }
    }

    /// Returns the current step size `μ`.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the current smoothed error energy.
    pub fn smoothed_energy(&self) -> f64 {
        self.smoothed_energy
    }

    /// Returns the controller state after one transition on `errors`,
    /// leaving `self` unchanged.
    ///
    /// A NaN step size (from an overflowing error energy) falls back to the
    /// lower bound.
    pub fn advanced(&self, errors: ArrayView1<'_, f64>) -> Self {
        let energy: f64 = errors.iter().map(|e| e * e).sum();
        let smoothed =
            self.energy_smoothing * self.smoothed_energy + (1.0 - self.energy_smoothing) * energy;

        let rms = (energy / errors.len() as f64 + RMS_BIAS).sqrt();
        let raw_update =
            self.adaptation_gain * (smoothed - self.target_energy) / (rms + DENOMINATOR_BIAS);

        let blended = self.step_momentum * self.step_size + (1.0 - self.step_momentum) * raw_update;
        let step_size = if blended.is_nan() {
            self.min_step_size
        } else {
            blended.clamp(self.min_step_size, self.max_step_size)
        };

        Self {
            step_size,
            smoothed_energy: smoothed,
            ..*self
        }
    }

    /// Commits one transition on `errors` and returns the new step size.
    pub fn update(&mut self, errors: ArrayView1<'_, f64>) -> f64 {
        *self = self.advanced(errors);
        self.step_size
    }
}
