//! Recursive VSS-APA estimator: drives block construction, the weight update
//! and the step-size controller once per stream position.

use ndarray::Array1;
use tracing::{debug, warn};

use crate::block::BlockBuilder;
use crate::config::ApaConfig;
use crate::error::ApaError;
use crate::solver::GramSolver;
use crate::step_size::StepSizeController;
use crate::trace::PredictionTrace;
use crate::update::apply_update;

/// Persistent filter state: weights, step size and smoothed error energy.
///
/// Owned by exactly one [`RecursiveEstimator`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    weights: Array1<f64>,
    controller: StepSizeController,
}

impl FilterState {
    fn initial(config: &ApaConfig) -> Self {
        Self {
            weights: Array1::zeros(config.filter_order()),
            controller: StepSizeController::from_config(config),
        }
    }

    /// Returns the current weight vector.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Returns the current step size.
    pub fn step_size(&self) -> f64 {
        self.controller.step_size()
    }

    /// Returns the current smoothed error energy.
    pub fn smoothed_energy(&self) -> f64 {
        self.controller.smoothed_energy()
    }
}

/// Outcome of a single iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationResult {
    position: usize,
    prediction: f64,
    errors: Array1<f64>,
    weights: Array1<f64>,
    step_size: f64,
}

impl IterationResult {
    /// Returns the stream position `k` of this iteration.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the prediction of `d[k + horizon]`.
    pub fn prediction(&self) -> f64 {
        self.prediction
    }

    /// Returns the `P`-length error vector.
    pub fn errors(&self) -> &Array1<f64> {
        &self.errors
    }

    /// Returns the weights after this iteration's update.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Returns the step size after this iteration's update.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }
}

/// Variable step-size affine projection estimator for one stream.
///
/// # Example
///
/// ```
/// use foresight_apa::{ApaConfig, RecursiveEstimator};
///
/// let signal: Vec<f64> = (0..200).map(|i| (i as f64 * 0.3).sin()).collect();
/// let mut estimator = RecursiveEstimator::new(ApaConfig::new(4, 2)).unwrap();
/// let trace = estimator.run(&signal, &signal).unwrap();
///
/// assert_eq!(trace.len(), 200 - (4 + 2 - 1 + 1));
/// assert!(trace.step_sizes().iter().all(|mu| (0.01..=1.0).contains(mu)));
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveEstimator {
    config: ApaConfig,
    builder: BlockBuilder,
    solver: GramSolver,
    state: FilterState,
}

impl RecursiveEstimator {
    /// Creates an estimator with zero weights and step size `mu0`.
    ///
    /// # Errors
    ///
    /// Returns the first rule violated by [`ApaConfig::validate`].
    pub fn new(config: ApaConfig) -> Result<Self, ApaError> {
        config.validate()?;
        Ok(Self {
            builder: BlockBuilder::from_config(&config),
            solver: GramSolver::from_config(&config),
            state: FilterState::initial(&config),
            config,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ApaConfig {
        &self.config
    }

    /// Returns the current filter state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Restores the initial state (zero weights, `mu0`, smoothed energy `η`).
    pub fn reset(&mut self) {
        self.state = FilterState::initial(&self.config);
    }

    /// Runs one iteration at stream position `k`.
    ///
    /// Everything is computed from the current state and committed only once
    /// the iteration has succeeded; on error the state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApaError::IndexOutOfRange`] if the block for `k` does not fit
    /// in the streams, or [`ApaError::SingularMatrix`] if the Gram matrix
    /// cannot be inverted.
    pub fn step(&mut self, x: &[f64], d: &[f64], k: usize) -> Result<IterationResult, ApaError> {
        let block = self.builder.build(x, d, k)?;
        let inverse = self.solver.gram_inverse(&block)?;
        let outcome = apply_update(
            &self.state.weights,
            &block,
            &inverse,
            self.state.step_size(),
        );
        let controller = self.state.controller.advanced(outcome.errors().view());
        let prediction = outcome.prediction();
        let (errors, weights) = outcome.into_parts();

        self.state = FilterState {
            weights: weights.clone(),
            controller,
        };

        Ok(IterationResult {
            position: k,
            prediction,
            errors,
            weights,
            step_size: controller.step_size(),
        })
    }

    /// Runs the estimator over a whole stream from its initial state.
    ///
    /// See [`run_with`](Self::run_with).
    pub fn run(&mut self, x: &[f64], d: &[f64]) -> Result<PredictionTrace, ApaError> {
        self.run_with(x, d, |_, _| {})
    }

    /// Runs the estimator over a whole stream, calling `observer` with the
    /// iteration index and result after every iteration.
    ///
    /// The state is reset first, so each call processes an independent
    /// stream. Iterations cover positions `M + P - 2` onwards, one per
    /// [`ApaConfig::iteration_count`].
    ///
    /// # Errors
    ///
    /// Input checks run before any iteration:
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ApaError::LengthMismatch`] | `x.len() != d.len()` |
    /// | [`ApaError::NonFiniteData`] | any sample is NaN or infinite |
    /// | [`ApaError::InsufficientData`] | the stream yields no iteration |
    ///
    /// A [`ApaError::SingularMatrix`] during an iteration aborts the whole
    /// stream; no partial trace is returned.
    #[tracing::instrument(
        skip_all,
        fields(
            n = x.len(),
            m = self.config.filter_order(),
            p = self.config.projection_order()
        )
    )]
    pub fn run_with<F>(
        &mut self,
        x: &[f64],
        d: &[f64],
        mut observer: F,
    ) -> Result<PredictionTrace, ApaError>
    where
        F: FnMut(usize, &IterationResult),
    {
        let n_iterations = self.validate_stream(x, d)?;
        self.reset();

        let start = self.config.first_position();
        let mut trace = PredictionTrace::with_capacity(
            n_iterations,
            self.config.filter_order(),
            self.config.projection_order(),
            self.config.first_target(),
        );

        for i in 0..n_iterations {
            let k = start + i;
            let result = self.step(x, d, k).inspect_err(|e| {
                warn!(
                    iteration = i,
                    position = k,
                    error = %e,
                    "iteration failed, aborting stream"
                );
            })?;
            observer(i, &result);
            trace.record(&result);
        }

        debug!(
            n_iterations,
            final_step_size = self.state.step_size(),
            smoothed_energy = self.state.smoothed_energy(),
            "stream exhausted"
        );
        Ok(trace)
    }

    fn validate_stream(&self, x: &[f64], d: &[f64]) -> Result<usize, ApaError> {
        if x.len() != d.len() {
            return Err(ApaError::LengthMismatch {
                x: x.len(),
                d: d.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ApaError::NonFiniteData { input: "x" });
        }
        if d.iter().any(|v| !v.is_finite()) {
            return Err(ApaError::NonFiniteData { input: "d" });
        }
        match self.config.iteration_count(x.len()) {
            0 => Err(ApaError::InsufficientData {
                n: x.len(),
                min: self.config.min_samples(),
            }),
            n => Ok(n),
        }
    }
}
