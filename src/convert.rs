//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use crate::config::*;

use foresight_apa::ApaConfig;
use foresight_evaluate::EvaluateConfig;
use foresight_io::{ReaderConfig, WriterConfig};

/// Builds an [`ApaConfig`] from the TOML filter configuration.
///
/// The result is validated so that a bad `[filter]` section fails before any
/// file is read.
pub fn build_apa_config(filter: &FilterToml) -> Result<ApaConfig> {
    let cfg = ApaConfig::new(filter.filter_order, filter.projection_order)
        .with_initial_step_size(filter.initial_step_size)
        .with_step_size_bounds(filter.min_step_size, filter.max_step_size)
        .with_regularization(filter.regularization)
        .with_adaptation_gain(filter.adaptation_gain)
        .with_target_energy(filter.target_energy)
        .with_energy_smoothing(filter.energy_smoothing)
        .with_step_momentum(filter.step_momentum)
        .with_horizon(filter.horizon)
        .with_pivot_tolerance(filter.pivot_tolerance);
    cfg.validate().context("invalid [filter] configuration")?;
    Ok(cfg)
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default()
        .with_time_column(io.time_column)
        .with_value_column(io.value_column)
        .with_header(io.has_header)
        .with_delimiter(io.delimiter);
    cfg.validate().context("invalid [io] reader configuration")?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let cfg = WriterConfig::default().with_precision(io.precision);
    cfg.validate().context("invalid [io] writer configuration")?;
    Ok(cfg)
}

/// Builds an [`EvaluateConfig`] from the TOML evaluate configuration.
pub fn build_evaluate_config(eval: &EvaluateToml) -> Result<EvaluateConfig> {
    let cfg = EvaluateConfig::default().with_segments(eval.segments);
    cfg.validate().context("invalid [evaluate] configuration")?;
    Ok(cfg)
}
