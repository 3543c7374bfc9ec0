use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Foresight configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ForesightConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Adaptive filter settings.
    #[serde(default)]
    pub filter: FilterToml,

    /// Evaluate settings.
    #[serde(default)]
    pub evaluate: EvaluateToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// Directory for prediction tables; next to each input when unset.
    pub output_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
    #[serde(default)]
    pub time_column: usize,
    #[serde(default = "default_value_column")]
    pub value_column: usize,
    #[serde(default = "default_true")]
    pub has_header: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: None,
            report: None,
            time_column: 0,
            value_column: default_value_column(),
            has_header: true,
            delimiter: default_delimiter(),
            precision: default_precision(),
        }
    }
}

fn default_value_column() -> usize {
    1
}
fn default_true() -> bool {
    true
}
fn default_delimiter() -> char {
    ','
}
fn default_precision() -> usize {
    6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterToml {
    #[serde(default = "default_filter_order")]
    pub filter_order: usize,
    #[serde(default = "default_projection_order")]
    pub projection_order: usize,
    #[serde(default = "default_initial_step_size")]
    pub initial_step_size: f64,
    #[serde(default = "default_min_step_size")]
    pub min_step_size: f64,
    #[serde(default = "default_max_step_size")]
    pub max_step_size: f64,
    #[serde(default = "default_regularization")]
    pub regularization: f64,
    #[serde(default = "default_adaptation_gain")]
    pub adaptation_gain: f64,
    #[serde(default = "default_target_energy")]
    pub target_energy: f64,
    #[serde(default = "default_energy_smoothing")]
    pub energy_smoothing: f64,
    #[serde(default = "default_step_momentum")]
    pub step_momentum: f64,
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_pivot_tolerance")]
    pub pivot_tolerance: f64,
}

impl Default for FilterToml {
    fn default() -> Self {
        Self {
            filter_order: default_filter_order(),
            projection_order: default_projection_order(),
            initial_step_size: default_initial_step_size(),
            min_step_size: default_min_step_size(),
            max_step_size: default_max_step_size(),
            regularization: default_regularization(),
            adaptation_gain: default_adaptation_gain(),
            target_energy: default_target_energy(),
            energy_smoothing: default_energy_smoothing(),
            step_momentum: default_step_momentum(),
            horizon: default_horizon(),
            pivot_tolerance: default_pivot_tolerance(),
        }
    }
}

fn default_filter_order() -> usize {
    4
}
fn default_projection_order() -> usize {
    1
}
fn default_initial_step_size() -> f64 {
    0.1
}
fn default_min_step_size() -> f64 {
    0.01
}
fn default_max_step_size() -> f64 {
    1.0
}
fn default_regularization() -> f64 {
    1e-3
}
fn default_adaptation_gain() -> f64 {
    0.05
}
fn default_target_energy() -> f64 {
    1e-3
}
fn default_energy_smoothing() -> f64 {
    0.9
}
fn default_step_momentum() -> f64 {
    0.8
}
fn default_horizon() -> usize {
    1
}
fn default_pivot_tolerance() -> f64 {
    1e-12
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateToml {
    #[serde(default = "default_segments")]
    pub segments: usize,
}

impl Default for EvaluateToml {
    fn default() -> Self {
        Self {
            segments: default_segments(),
        }
    }
}

fn default_segments() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: ForesightConfig = toml::from_str("").unwrap();
        assert!(config.io.inputs.is_empty());
        assert_eq!(config.io.value_column, 1);
        assert!(config.io.has_header);
        assert_eq!(config.io.delimiter, ',');
        assert_eq!(config.filter.filter_order, 4);
        assert_eq!(config.filter.projection_order, 1);
        assert_eq!(config.filter.regularization, 1e-3);
        assert_eq!(config.evaluate.segments, 3);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: ForesightConfig = toml::from_str(
            r#"
            [io]
            inputs = ["blink_01.csv", "blink_02.csv"]
            output_dir = "predictions"
            value_column = 3
            delimiter = ";"

            [filter]
            filter_order = 8
            projection_order = 3
            horizon = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.io.inputs.len(), 2);
        assert_eq!(config.io.output_dir, Some(PathBuf::from("predictions")));
        assert_eq!(config.io.value_column, 3);
        assert_eq!(config.io.delimiter, ';');
        assert_eq!(config.filter.filter_order, 8);
        assert_eq!(config.filter.projection_order, 3);
        assert_eq!(config.filter.horizon, 5);
        assert_eq!(config.filter.step_momentum, 0.8);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<ForesightConfig, _> = toml::from_str("[filter]\nmu = 0.5\n");
        assert!(result.is_err());
    }
}
