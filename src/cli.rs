use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Foresight recursive time-series predictor.
#[derive(Parser)]
#[command(
    name = "foresight",
    version,
    about = "Variable step-size affine projection prediction of sampled time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Predict every input recording one step ahead and write prediction tables.
    Predict(PredictArgs),
}

/// Arguments for the `predict` subcommand.
#[derive(clap::Args)]
pub struct PredictArgs {
    /// Path to TOML configuration file [default: foresight.toml when present].
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override JSON summary report path from config.
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Input CSV recordings; replaces `[io].inputs` when given.
    pub inputs: Vec<PathBuf>,
}
