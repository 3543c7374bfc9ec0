//! Predict command: run the adaptive filter over every input recording.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use foresight_apa::{ApaConfig, RecursiveEstimator};
use foresight_evaluate::{EvaluateConfig, StreamSummary, summarize, to_json};
use foresight_io::{PredictionTable, ReaderConfig, WriterConfig, read_csv, write_csv};

use crate::cli::PredictArgs;
use crate::config::ForesightConfig;
use crate::convert;

/// Config file picked up when `--config` is not given.
const DEFAULT_CONFIG: &str = "foresight.toml";

/// Everything a single file needs, shared read-only across workers.
struct Pipeline {
    apa: ApaConfig,
    reader: ReaderConfig,
    writer: WriterConfig,
    evaluate: EvaluateConfig,
    output_dir: Option<PathBuf>,
}

/// What happened to one input.
enum FileOutcome {
    Predicted(StreamSummary),
    Skipped,
}

/// Run the batch prediction pipeline.
pub fn run(args: PredictArgs) -> Result<()> {
    let _cmd = info_span!("predict").entered();

    // 1. Load project TOML
    let config = load_config(args.config.as_deref())?;

    // 2. Resolve inputs and outputs, CLI first
    let inputs = if args.inputs.is_empty() {
        config.io.inputs.clone()
    } else {
        args.inputs
    };
    if inputs.is_empty() {
        bail!("no input recordings: set [io].inputs in config or pass paths on the command line");
    }
    let output_dir = args.output_dir.or_else(|| config.io.output_dir.clone());
    let report = args.report.or_else(|| config.io.report.clone());

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let pipeline = Pipeline {
        apa: convert::build_apa_config(&config.filter)?,
        reader: convert::build_reader_config(&config.io)?,
        writer: convert::build_writer_config(&config.io)?,
        evaluate: convert::build_evaluate_config(&config.evaluate)?,
        output_dir,
    };
    info!(
        n_files = inputs.len(),
        m = pipeline.apa.filter_order(),
        p = pipeline.apa.projection_order(),
        horizon = pipeline.apa.horizon(),
        "running predictions"
    );

    // 3. Process files in parallel; each worker owns its filter state
    let outcomes: Vec<Result<FileOutcome>> = inputs
        .par_iter()
        .map(|input| process_file(input, &pipeline))
        .collect();

    // 4. Report in input order
    let mut summaries = Vec::new();
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for (input, outcome) in inputs.iter().zip(outcomes) {
        match outcome {
            Ok(FileOutcome::Predicted(summary)) => {
                info!(
                    file = %input.display(),
                    n_iterations = summary.n_iterations,
                    normalized_error = ?summary.normalized_error,
                    mse_first = ?summary.mse_first_segment,
                    mse_last = ?summary.mse_last_segment,
                    "prediction complete"
                );
                summaries.push(summary);
            }
            Ok(FileOutcome::Skipped) => skipped += 1,
            Err(e) => {
                warn!(file = %input.display(), "{e:#}");
                failed += 1;
            }
        }
    }

    if summaries.is_empty() {
        bail!("no input produced predictions ({failed} failed, {skipped} skipped)");
    }
    info!(succeeded = summaries.len(), skipped, failed, "batch finished");

    // 5. Write summary JSON
    if let Some(path) = report {
        let json = to_json(&summaries).context("failed to serialize summary report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}

/// Reads the TOML config, falling back to defaults when no path was given
/// and `foresight.toml` does not exist.
fn load_config(path: Option<&Path>) -> Result<ForesightConfig> {
    let path = match path {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
        None => {
            debug!("no config file, using defaults");
            return Ok(ForesightConfig::default());
        }
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Read, predict, write and summarise one recording.
fn process_file(input: &Path, pipeline: &Pipeline) -> Result<FileOutcome> {
    let _span = info_span!("file", path = %input.display()).entered();

    let recording = read_csv(input, &pipeline.reader)
        .with_context(|| format!("failed to read recording: {}", input.display()))?;

    let n_iterations = pipeline.apa.iteration_count(recording.len());
    if n_iterations == 0 {
        warn!(
            samples = recording.len(),
            needed = pipeline.apa.min_samples(),
            "recording too short, skipping"
        );
        return Ok(FileOutcome::Skipped);
    }

    // Predict the signal from its own past.
    let signal = recording.values();
    let mut estimator = RecursiveEstimator::new(pipeline.apa.clone())?;
    let trace = estimator
        .run(signal, signal)
        .with_context(|| format!("filter aborted on {}", input.display()))?;

    let out_path = output_path(input, pipeline.output_dir.as_deref());
    let table = PredictionTable::aligned(&recording, trace.predictions(), trace.first_target())?;
    write_csv(&out_path, &table, &pipeline.writer)
        .with_context(|| format!("failed to write predictions: {}", out_path.display()))?;
    debug!(path = %out_path.display(), "predictions written");

    let name = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let summary = summarize(&name, &trace, signal, &pipeline.evaluate)
        .with_context(|| format!("failed to summarise {}", input.display()))?;

    Ok(FileOutcome::Predicted(summary))
}

/// Auto-derive the prediction table path: `dir/foo.csv` -> `dir/foo.predictions.csv`.
///
/// Without an output directory the table goes next to the input.
fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "recording".into(), |s| s.to_string_lossy());
    let file_name = format!("{stem}.predictions.csv");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sine_csv(path: &Path, n: usize, period: f64) {
        let mut text = String::from("Time,Channel1\n");
        for i in 0..n {
            let v = (2.0 * std::f64::consts::PI * i as f64 / period).sin();
            text.push_str(&format!("{},{v}\n", i as f64 * 0.004));
        }
        fs::write(path, text).unwrap();
    }

    /// Without an explicit config the run uses an empty file, so a
    /// `foresight.toml` in the working directory cannot leak in.
    fn args(inputs: Vec<PathBuf>, config: Option<PathBuf>, out: &Path) -> PredictArgs {
        let config = config.unwrap_or_else(|| {
            fs::create_dir_all(out).unwrap();
            let path = out.join("defaults.toml");
            fs::write(&path, "").unwrap();
            path
        });
        PredictArgs {
            config: Some(config),
            output_dir: Some(out.to_path_buf()),
            report: Some(out.join("report.json")),
            inputs,
        }
    }

    #[test]
    fn output_path_in_directory() {
        let path = output_path(Path::new("/data/blink_01.csv"), Some(Path::new("/out")));
        assert_eq!(path, PathBuf::from("/out/blink_01.predictions.csv"));
    }

    #[test]
    fn output_path_next_to_input() {
        let path = output_path(Path::new("/data/blink_01.csv"), None);
        assert_eq!(path, PathBuf::from("/data/blink_01.predictions.csv"));
    }

    #[test]
    fn predicts_each_input_and_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        sine_csv(&a, 300, 20.0);
        sine_csv(&b, 200, 35.0);
        let out = dir.path().join("out");

        run(args(vec![a, b], None, &out)).unwrap();

        // M=4, P=1, horizon 1: 300 - 5 rows plus header
        let table = fs::read_to_string(out.join("a.predictions.csv")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Time,TrueValue,Prediction");
        assert_eq!(lines.len(), 1 + 295);
        // First row targets sample 4 (time 0.016)
        assert!(lines[1].starts_with("0.016000,"));
        assert!(out.join("b.predictions.csv").exists());

        let report = fs::read_to_string(out.join("report.json")).unwrap();
        let summaries: serde_json::Value = serde_json::from_str(&report).unwrap();
        let files: Vec<&str> = summaries
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["file"].as_str().unwrap())
            .collect();
        assert_eq!(files, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn short_and_missing_inputs_do_not_fail_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let short = dir.path().join("short.csv");
        sine_csv(&good, 100, 20.0);
        sine_csv(&short, 3, 20.0);
        let missing = dir.path().join("missing.csv");
        let out = dir.path().join("out");

        run(args(vec![short, missing, good], None, &out)).unwrap();

        assert!(out.join("good.predictions.csv").exists());
        assert!(!out.join("short.predictions.csv").exists());
    }

    #[test]
    fn batch_fails_when_nothing_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let short = dir.path().join("short.csv");
        sine_csv(&short, 3, 20.0);

        let err = run(args(vec![short], None, dir.path())).unwrap_err();
        assert!(err.to_string().contains("0 failed, 1 skipped"));
    }

    #[test]
    fn config_file_drives_the_filter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rec.csv");
        sine_csv(&input, 120, 25.0);
        let config = dir.path().join("run.toml");
        fs::write(
            &config,
            "[filter]\nfilter_order = 6\nprojection_order = 2\nhorizon = 2\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        run(args(vec![input], Some(config), &out)).unwrap();

        // 120 - (6 + 2 - 1 + 2) rows
        let table = fs::read_to_string(out.join("rec.predictions.csv")).unwrap();
        assert_eq!(table.lines().count(), 1 + 111);
    }

    #[test]
    fn two_iteration_recording_is_predicted() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tiny.csv");
        sine_csv(&input, 7, 20.0);
        let out = dir.path().join("out");

        run(args(vec![input], None, &out)).unwrap();

        // 7 - 5 rows plus header
        let table = fs::read_to_string(out.join("tiny.predictions.csv")).unwrap();
        assert_eq!(table.lines().count(), 1 + 2);

        let report = fs::read_to_string(out.join("report.json")).unwrap();
        let summaries: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(summaries[0]["file"], "tiny.csv");
        assert_eq!(summaries[0]["n_iterations"], 2);
        assert_eq!(summaries[0]["segments"], 2);
    }

    #[test]
    fn flatline_recording_is_predicted() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flat.csv");
        let mut text = String::from("Time,Channel1\n");
        for i in 0..50 {
            text.push_str(&format!("{},0\n", i as f64 * 0.004));
        }
        fs::write(&input, text).unwrap();
        let out = dir.path().join("out");

        run(args(vec![input], None, &out)).unwrap();

        let table = fs::read_to_string(out.join("flat.predictions.csv")).unwrap();
        assert_eq!(table.lines().count(), 1 + 45);

        let report = fs::read_to_string(out.join("report.json")).unwrap();
        let summaries: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(summaries[0]["file"], "flat.csv");
        assert!(summaries[0]["normalized_error"].is_null());
        assert_eq!(summaries[0]["mse_last_segment"], 0.0);
    }

    #[test]
    fn invalid_precision_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bad.toml");
        fs::write(&config, "[io]\nprecision = 18\n").unwrap();

        let err = run(args(
            vec![dir.path().join("never_read.csv")],
            Some(config),
            dir.path(),
        ))
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid [io] writer configuration"));
        assert!(message.contains("precision 18 > 17"));
    }

    #[test]
    fn invalid_config_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bad.toml");
        fs::write(&config, "[filter]\nregularization = -1.0\n").unwrap();

        let err = run(args(
            vec![dir.path().join("never_read.csv")],
            Some(config),
            dir.path(),
        ))
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid [filter] configuration"));
    }
}
