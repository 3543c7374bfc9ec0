//! Integration test: write prediction tables and read them back.

use std::fs;

use foresight_io::{
    HEADER, PredictionTable, ReaderConfig, Recording, WriterConfig, read_csv, write_csv,
};

#[test]
fn write_csv_aligned_table() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("out.predictions.csv");

    let rec = Recording::new(vec![0.0, 0.5, 1.0, 1.5], vec![1.0, 2.0, 3.0, 4.0])
        .expect("fixture is valid");
    let predictions = [2.5, 3.75];
    let table = PredictionTable::aligned(&rec, &predictions, 2).expect("fits recording");

    write_csv(&path, &table, &WriterConfig::default()).expect("write succeeds");

    let text = fs::read_to_string(&path).expect("read back");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER.join(","));
    assert_eq!(lines[1], "1.000000,3.000000,2.500000");
    assert_eq!(lines[2], "1.500000,4.000000,3.750000");
}

#[test]
fn write_csv_round_trips_through_reader() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("round.csv");

    let time = [0.0, 0.004, 0.008];
    let truth = [1.25, -0.5, 0.125];
    let prediction = [1.0, -0.25, 0.0];
    let table = PredictionTable::new(&time, &truth, &prediction).expect("valid table");
    write_csv(&path, &table, &WriterConfig::default()).expect("write succeeds");

    let truth_back = read_csv(&path, &ReaderConfig::default()).expect("read truth");
    assert_eq!(truth_back.time(), &time);
    assert_eq!(truth_back.values(), &truth);

    let pred_back =
        read_csv(&path, &ReaderConfig::default().with_value_column(2)).expect("read predictions");
    assert_eq!(pred_back.values(), &prediction);
}

#[test]
fn write_csv_overwrites_existing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("out.csv");
    fs::write(&path, "stale contents\nmore\nand more\n").expect("seed file");

    let table = PredictionTable::new(&[1.0], &[2.0], &[3.0]).expect("valid table");
    write_csv(&path, &table, &WriterConfig::default().with_precision(1)).expect("write succeeds");

    let text = fs::read_to_string(&path).expect("read back");
    assert_eq!(text, "Time,TrueValue,Prediction\n1.0,2.0,3.0\n");
}

#[test]
fn write_csv_invalid_precision_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("never.csv");

    let table = PredictionTable::new(&[1.0], &[2.0], &[3.0]).expect("valid table");
    let result = write_csv(&path, &table, &WriterConfig::default().with_precision(40));
    assert!(result.is_err());
    assert!(!path.exists(), "nothing written on invalid config");
}

#[test]
fn write_csv_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("no_such_dir").join("out.csv");

    let table = PredictionTable::new(&[1.0], &[2.0], &[3.0]).expect("valid table");
    let err = write_csv(&path, &table, &WriterConfig::default()).unwrap_err();
    assert!(
        matches!(
            err,
            foresight_io::IoError::FileNotFound { .. } | foresight_io::IoError::Io { .. }
        ),
        "expected an i/o failure, got {err:?}",
    );
}

#[test]
fn writer_config_validates_before_writing() {
    assert!(WriterConfig::default().with_precision(17).validate().is_ok());
    let err = WriterConfig::default()
        .with_precision(18)
        .validate()
        .expect_err("precision 18 is rejected");
    assert_eq!(err.to_string(), "1 validation error(s): precision 18 > 17");
}
