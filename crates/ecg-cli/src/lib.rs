//! ECG capture command line tool
//!
//! Reads hex-record captures written by the acquisition board and prints
//! the twelve display leads.
//!
//! ```bash
//! # Decode a capture into an aligned table
//! ecg-plot decode capture.txt
//!
//! # Same capture as CSV, first 500 rows only
//! ecg-plot decode capture.txt --format csv --rows 500
//!
//! # Write a synthetic capture with 2% damaged records
//! ecg-plot simulate --samples 2500 --seed 1 --corrupt 0.02 > capture.txt
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod app;
pub mod render;

pub use render::OutputFormat;

/// ECG capture decoder
#[derive(Parser, Debug)]
#[command(name = "ecg-plot")]
#[command(author, version, about = "Decode 8-channel ECG hex captures into 12 leads")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log at debug level (one line per rejected record)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a capture file and print the display leads
    Decode(DecodeArgs),

    /// Print per-lead statistics of a capture file
    Stats(CaptureArgs),

    /// Print a synthetic capture to stdout
    Simulate(SimulateArgs),

    /// Print the default decoder configuration as JSON
    Config,
}

/// Capture input shared by `decode` and `stats`
#[derive(Args, Debug)]
pub struct CaptureArgs {
    /// Capture file, one record per line
    pub file: PathBuf,

    /// Decoder configuration (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub capture: CaptureArgs,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print at most this many rows
    #[arg(long)]
    pub rows: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of records
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub samples: usize,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability of damaging each record, split between truncation and saturation
    #[arg(long, default_value_t = 0.0)]
    pub corrupt: f64,

    /// End records with "\r\n"
    #[arg(long)]
    pub crlf: bool,

    /// Decoder configuration (JSON) to encode for
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
