//! Configuration for the VSS-APA estimator.

use crate::error::ApaError;

/// Configuration for a [`RecursiveEstimator`](crate::RecursiveEstimator).
///
/// Use the builder methods to customise parameters. Defaults reproduce the
/// settings of the reference eye-blink prediction runs.
///
/// # Example
///
/// ```
/// use foresight_apa::ApaConfig;
///
/// let config = ApaConfig::new(4, 2)
///     .with_step_size_bounds(0.01, 0.8)
///     .with_regularization(1e-3);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.iteration_count(20), 20 - (4 + 2 - 1 + 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApaConfig {
    /// Filter order `M`: length of the weight vector and of each window.
    filter_order: usize,
    /// Projection order `P`: number of windows per update.
    projection_order: usize,
    /// Initial step size `mu0`.
    initial_step_size: f64,
    /// Lower step-size bound `mu_min`.
    min_step_size: f64,
    /// Upper step-size bound `mu_max`.
    max_step_size: f64,
    /// Diagonal regularization `delta` added to the Gram matrix.
    regularization: f64,
    /// Step-size adaptation gain `rho`.
    adaptation_gain: f64,
    /// Target error energy `eta`.
    target_energy: f64,
    /// Error-energy smoothing factor `alpha`.
    energy_smoothing: f64,
    /// Step-size momentum factor `beta`.
    step_momentum: f64,
    /// Number of steps ahead to predict.
    horizon: usize,
    /// Smallest pivot magnitude accepted by the Gauss-Jordan inversion.
    pivot_tolerance: f64,
}

impl ApaConfig {
    /// Creates a new configuration with filter order `M` and projection order `P`.
    ///
    /// Defaults: `mu0 = 0.1`, `mu ∈ [0.01, 1.0]`, `delta = 1e-3`,
    /// `rho = 0.05`, `eta = 1e-3`, `alpha = 0.9`, `beta = 0.8`,
    /// `horizon = 1`, `pivot_tolerance = 1e-12`.
    pub fn new(filter_order: usize, projection_order: usize) -> Self {
        Self {
            filter_order,
            projection_order,
            initial_step_size: 0.1,
            min_step_size: 0.01,
            max_step_size: 1.0,
            regularization: 1e-3,
            adaptation_gain: 0.05,
            target_energy: 1e-3,
            energy_smoothing: 0.9,
            step_momentum: 0.8,
            horizon: 1,
            pivot_tolerance: 1e-12,
        }
    }

    /// Sets the initial step size.
    pub fn with_initial_step_size(mut self, mu0: f64) -> Self {
        self.initial_step_size = mu0;
        self
    }

    /// Sets the step-size clamp range `[min, max]`.
    pub fn with_step_size_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_step_size = min;
        self.max_step_size = max;
        self
    }

    /// Sets the Gram-matrix regularization constant.
    pub fn with_regularization(mut self, delta: f64) -> Self {
        self.regularization = delta;
        self
    }

    /// Sets the step-size adaptation gain.
    pub fn with_adaptation_gain(mut self, rho: f64) -> Self {
        self.adaptation_gain = rho;
        self
    }

    /// Sets the target error energy.
    pub fn with_target_energy(mut self, eta: f64) -> Self {
        self.target_energy = eta;
        self
    }

    /// Sets the exponential smoothing factor applied to the error energy.
    pub fn with_energy_smoothing(mut self, alpha: f64) -> Self {
        self.energy_smoothing = alpha;
        self
    }

    /// Sets the momentum factor of the step-size update.
    pub fn with_step_momentum(mut self, beta: f64) -> Self {
        self.step_momentum = beta;
        self
    }

    /// Sets the prediction horizon.
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the pivot tolerance of the Gram-matrix inversion.
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Returns the filter order `M`.
    pub fn filter_order(&self) -> usize {
        self.filter_order
    }

    /// Returns the projection order `P`.
    pub fn projection_order(&self) -> usize {
        self.projection_order
    }

    /// Returns the initial step size.
    pub fn initial_step_size(&self) -> f64 {
        self.initial_step_size
    }

    /// Returns the lower step-size bound.
    pub fn min_step_size(&self) -> f64 {
        self.min_step_size
    }

    /// Returns the upper step-size bound.
    pub fn max_step_size(&self) -> f64 {
        self.max_step_size
    }

    /// Returns the regularization constant.
    pub fn regularization(&self) -> f64 {
        self.regularization
    }

    /// Returns the step-size adaptation gain.
    pub fn adaptation_gain(&self) -> f64 {
        self.adaptation_gain
    }

    /// Returns the target error energy.
    pub fn target_energy(&self) -> f64 {
        self.target_energy
    }

    /// Returns the error-energy smoothing factor.
    pub fn energy_smoothing(&self) -> f64 {
        self.energy_smoothing
    }

    /// Returns the step-size momentum factor.
    pub fn step_momentum(&self) -> f64 {
        self.step_momentum
    }

    /// Returns the prediction horizon.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Returns the pivot tolerance.
    pub fn pivot_tolerance(&self) -> f64 {
        self.pivot_tolerance
    }

    /// Stream position of the first iteration: the earliest index at which
    /// all `P` windows of length `M` fit, `M + P - 2`.
    pub fn first_position(&self) -> usize {
        (self.filter_order + self.projection_order).saturating_sub(2)
    }

    /// Index into the target stream of the sample predicted by iteration 0.
    pub fn first_target(&self) -> usize {
        self.first_position() + self.horizon
    }

    /// Minimum stream length that yields at least one iteration.
    pub fn min_samples(&self) -> usize {
        self.filter_order + self.projection_order + self.horizon
    }

    /// Number of iterations a stream of `n` samples supports:
    /// `n - (M + P - 1 + horizon)`, or 0 when that is not positive.
    pub fn iteration_count(&self, n: usize) -> usize {
        let consumed = (self.filter_order + self.projection_order + self.horizon).saturating_sub(1);
        n.saturating_sub(consumed)
    }

    /// Validates this configuration.
    ///
    /// Returns the first violated rule, checked in this order: filter order,
    /// projection order, horizon, regularization, step-size bounds, initial
    /// step size, adaptation gain, target energy, smoothing and momentum
    /// factors, pivot tolerance.
    pub fn validate(&self) -> Result<(), ApaError> {
        if self.filter_order < 1 {
            return Err(ApaError::InvalidFilterOrder {
                m: self.filter_order,
            });
        }
        if self.projection_order < 1 {
            return Err(ApaError::InvalidProjectionOrder {
                p: self.projection_order,
            });
        }
        if self.horizon < 1 {
            return Err(ApaError::InvalidHorizon {
                horizon: self.horizon,
            });
        }
        if !self.regularization.is_finite() || self.regularization <= 0.0 {
            return Err(ApaError::InvalidRegularization {
                delta: self.regularization,
            });
        }
        let (min, max) = (self.min_step_size, self.max_step_size);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ApaError::InvalidStepSizeBounds { min, max });
        }
        if !self.initial_step_size.is_finite() {
            return Err(ApaError::InvalidParameter {
                name: "initial_step_size",
                value: self.initial_step_size,
            });
        }
        if !self.adaptation_gain.is_finite() {
            return Err(ApaError::InvalidParameter {
                name: "adaptation_gain",
                value: self.adaptation_gain,
            });
        }
        if !self.target_energy.is_finite() || self.target_energy < 0.0 {
            return Err(ApaError::InvalidParameter {
                name: "target_energy",
                value: self.target_energy,
            });
        }
        if !(0.0..=1.0).contains(&self.energy_smoothing) {
            return Err(ApaError::InvalidParameter {
                name: "energy_smoothing",
                value: self.energy_smoothing,
            });
        }
        if !(0.0..=1.0).contains(&self.step_momentum) {
            return Err(ApaError::InvalidParameter {
                name: "step_momentum",
                value: self.step_momentum,
            });
        }
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance <= 0.0 {
            return Err(ApaError::InvalidParameter {
                name: "pivot_tolerance",
                value: self.pivot_tolerance,
            });
        }
        Ok(())
    }
}

impl Default for ApaConfig {
    fn default() -> Self {
        Self::new(4, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ApaConfig::default();
        assert_eq!(cfg.filter_order(), 4);
        assert_eq!(cfg.projection_order(), 1);
        assert_eq!(cfg.initial_step_size(), 0.1);
        assert_eq!(cfg.min_step_size(), 0.01);
        assert_eq!(cfg.max_step_size(), 1.0);
        assert_eq!(cfg.regularization(), 1e-3);
        assert_eq!(cfg.adaptation_gain(), 0.05);
        assert_eq!(cfg.target_energy(), 1e-3);
        assert_eq!(cfg.energy_smoothing(), 0.9);
        assert_eq!(cfg.step_momentum(), 0.8);
        assert_eq!(cfg.horizon(), 1);
        assert_eq!(cfg.pivot_tolerance(), 1e-12);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = ApaConfig::new(8, 3)
            .with_initial_step_size(0.2)
            .with_step_size_bounds(0.05, 0.5)
            .with_regularization(1e-2)
            .with_adaptation_gain(0.1)
            .with_target_energy(0.01)
            .with_energy_smoothing(0.95)
            .with_step_momentum(0.5)
            .with_horizon(3)
            .with_pivot_tolerance(1e-9);

        assert_eq!(cfg.filter_order(), 8);
        assert_eq!(cfg.projection_order(), 3);
        assert_eq!(cfg.initial_step_size(), 0.2);
        assert_eq!(cfg.min_step_size(), 0.05);
        assert_eq!(cfg.max_step_size(), 0.5);
        assert_eq!(cfg.regularization(), 1e-2);
        assert_eq!(cfg.adaptation_gain(), 0.1);
        assert_eq!(cfg.target_energy(), 0.01);
        assert_eq!(cfg.energy_smoothing(), 0.95);
        assert_eq!(cfg.step_momentum(), 0.5);
        assert_eq!(cfg.horizon(), 3);
        assert_eq!(cfg.pivot_tolerance(), 1e-9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_iteration_count() {
        // M=2, P=1, N=5, horizon=1 => 5 - (2 + 1 - 1 + 1) = 2
        let cfg = ApaConfig::new(2, 1);
        assert_eq!(cfg.iteration_count(5), 2);
        assert_eq!(cfg.iteration_count(3), 0);
        assert_eq!(cfg.iteration_count(0), 0);
        assert_eq!(cfg.min_samples(), 4);
        assert_eq!(cfg.iteration_count(cfg.min_samples()), 1);
    }

    #[test]
    fn test_first_position_and_target() {
        let cfg = ApaConfig::new(1, 1);
        assert_eq!(cfg.first_position(), 0);
        assert_eq!(cfg.first_target(), 1);

        let cfg = ApaConfig::new(4, 3).with_horizon(2);
        assert_eq!(cfg.first_position(), 5);
        assert_eq!(cfg.first_target(), 7);
    }

    #[test]
    fn test_validate_invalid_orders() {
        assert_eq!(
            ApaConfig::new(0, 1).validate(),
            Err(ApaError::InvalidFilterOrder { m: 0 })
        );
        assert_eq!(
            ApaConfig::new(1, 0).validate(),
            Err(ApaError::InvalidProjectionOrder { p: 0 })
        );
        // Filter order is checked first.
        assert_eq!(
            ApaConfig::new(0, 0).validate(),
            Err(ApaError::InvalidFilterOrder { m: 0 })
        );
    }

    #[test]
    fn test_validate_invalid_horizon() {
        let result = ApaConfig::new(2, 1).with_horizon(0).validate();
        assert_eq!(result, Err(ApaError::InvalidHorizon { horizon: 0 }));
    }

    #[test]
    fn test_validate_invalid_regularization() {
        for delta in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let result = ApaConfig::new(2, 2).with_regularization(delta).validate();
            assert!(
                matches!(result, Err(ApaError::InvalidRegularization { .. })),
                "delta = {delta} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_validate_invalid_bounds() {
        let inverted = ApaConfig::new(2, 1).with_step_size_bounds(1.0, 0.1);
        assert!(matches!(
            inverted.validate(),
            Err(ApaError::InvalidStepSizeBounds { .. })
        ));

        let negative = ApaConfig::new(2, 1).with_step_size_bounds(-0.1, 0.1);
        assert!(matches!(
            negative.validate(),
            Err(ApaError::InvalidStepSizeBounds { .. })
        ));

        let nan = ApaConfig::new(2, 1).with_step_size_bounds(0.0, f64::NAN);
        assert!(matches!(
            nan.validate(),
            Err(ApaError::InvalidStepSizeBounds { .. })
        ));

        // A degenerate range pins the step size.
        let pinned = ApaConfig::new(2, 1).with_step_size_bounds(0.3, 0.3);
        assert!(pinned.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_parameters() {
        let cases = [
            (
                ApaConfig::default().with_initial_step_size(f64::NAN),
                "initial_step_size",
            ),
            (
                ApaConfig::default().with_adaptation_gain(f64::INFINITY),
                "adaptation_gain",
            ),
            (ApaConfig::default().with_target_energy(-1.0), "target_energy"),
            (
                ApaConfig::default().with_energy_smoothing(1.5),
                "energy_smoothing",
            ),
            (ApaConfig::default().with_step_momentum(-0.1), "step_momentum"),
            (
                ApaConfig::default().with_pivot_tolerance(0.0),
                "pivot_tolerance",
            ),
        ];
        for (cfg, expected) in cases {
            match cfg.validate() {
                Err(ApaError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter({expected}), got {other:?}"),
            }
        }
    }
}
