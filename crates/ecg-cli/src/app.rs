//! Command execution

use crate::render::{self, OutputFormat};
use crate::{CaptureArgs, DecodeArgs, SimulateArgs};
use anyhow::{Context, Result};
use ecg_core::SeriesSet;
use ecg_processing::{DecoderConfig, SeriesAssembler};
use ecg_simulation::{EcgConfig, EcgSimulator};
use std::io::Write;
use std::path::Path;
use tracing::info;

fn load_config(path: Option<&Path>) -> Result<DecoderConfig> {
    match path {
        Some(path) => DecoderConfig::from_file(path)
            .with_context(|| format!("Failed to load decoder config {}", path.display())),
        None => Ok(DecoderConfig::default()),
    }
}

/// Read and assemble the capture named by `args`
pub fn load_capture(args: &CaptureArgs) -> Result<SeriesSet> {
    let config = load_config(args.config.as_deref())?;
    let assembler = SeriesAssembler::with_config(config)?;

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read capture {}", args.file.display()))?;
    info!(file = %args.file.display(), bytes = text.len(), "loaded capture");

    Ok(assembler.assemble_text(&text))
}

/// Print the capture to `out`; statistics follow a table, or go to `diag`
/// so CSV and JSON output stays machine readable
pub fn decode<W: Write, E: Write>(args: &DecodeArgs, out: &mut W, diag: &mut E) -> Result<()> {
    let set = load_capture(&args.capture)?;
    render::write_series(out, &set, args.format, args.rows)?;

    if args.format == OutputFormat::Table {
        writeln!(out)?;
        render::write_stats(out, &set)?;
    } else {
        render::write_stats(diag, &set)?;
    }
    Ok(())
}

pub fn stats<W: Write>(args: &CaptureArgs, out: &mut W) -> Result<()> {
    let set = load_capture(args)?;
    render::write_stats(out, &set)?;
    Ok(())
}

pub fn simulate<W: Write>(args: &SimulateArgs, out: &mut W) -> Result<()> {
    let mut config = EcgConfig {
        seed: args.seed,
        crlf: args.crlf,
        decoder: load_config(args.config.as_deref())?,
        ..EcgConfig::default()
    };
    config.corruption.truncate_prob = args.corrupt / 2.0;
    config.corruption.saturate_prob = args.corrupt / 2.0;

    let mut simulator = EcgSimulator::new(config).context("Invalid simulation settings")?;
    let capture = simulator.generate(args.samples)?;
    info!(
        records = capture.records.len(),
        corrupted = capture.corrupted.len(),
        "generated capture"
    );

    out.write_all(capture.to_text().as_bytes())?;
    out.flush()?;
    Ok(())
}

pub fn print_config<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", DecoderConfig::default().to_json()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn simulated_file(dir: &TempDir, name: &str, samples: usize) -> PathBuf {
        let args = SimulateArgs {
            samples,
            seed: Some(11),
            corrupt: 0.0,
            crlf: true,
            config: None,
        };
        let mut body = Vec::new();
        simulate(&args, &mut body).unwrap();

        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn decode_args(file: PathBuf, format: OutputFormat, rows: Option<usize>) -> DecodeArgs {
        DecodeArgs {
            capture: CaptureArgs { file, config: None },
            format,
            rows,
        }
    }

    #[test]
    fn test_simulate_then_decode() {
        let dir = tempdir().unwrap();
        let path = simulated_file(&dir, "clean.txt", 20);
        let set = load_capture(&CaptureArgs { file: path.clone(), config: None }).unwrap();

        // trailing newline adds one empty record
        assert_eq!(set.len(), 21);
        assert_eq!(set.summary().accepted, 20);
        assert_eq!(set.summary().shape_rejected, 1);

        let (mut out, mut diag) = (Vec::new(), Vec::new());
        decode(&decode_args(path, OutputFormat::Csv, Some(5)), &mut out, &mut diag).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 6);
    }

    #[test]
    fn test_table_is_followed_by_stats() {
        let dir = tempdir().unwrap();
        let path = simulated_file(&dir, "table.txt", 8);

        let (mut out, mut diag) = (Vec::new(), Vec::new());
        decode(&decode_args(path, OutputFormat::Table, None), &mut out, &mut diag).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("9 records, 8 accepted, 1 shape rejected, 0 range rejected"));
        assert!(diag.is_empty());
    }

    #[test]
    fn test_machine_formats_send_stats_aside() {
        let dir = tempdir().unwrap();
        let path = simulated_file(&dir, "json.txt", 4);

        let (mut out, mut diag) = (Vec::new(), Vec::new());
        decode(&decode_args(path, OutputFormat::Json, None), &mut out, &mut diag).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["summary"]["total"], 5);
        let stats = String::from_utf8(diag).unwrap();
        assert!(stats.contains("LEAD_I"));
        assert!(stats.contains("5 records, 4 accepted"));
    }

    #[test]
    fn test_missing_capture_names_file() {
        let dir = tempdir().unwrap();
        let args = CaptureArgs {
            file: dir.path().join("does-not-exist.txt"),
            config: None,
        };
        let err = load_capture(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("does-not-exist.txt"));
    }

    #[test]
    fn test_config_file_is_used() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let config = DecoderConfig::default().with_gain(6.0);
        std::fs::write(&config_path, config.to_json().unwrap()).unwrap();

        let loaded = load_config(Some(&config_path)).unwrap();
        assert_eq!(loaded.gain, 6.0);

        std::fs::write(&config_path, "{\"gain\": -1.0}").unwrap();
        assert!(load_config(Some(&config_path)).is_err());
    }

    #[test]
    fn test_invalid_corruption_rate() {
        let args = SimulateArgs {
            samples: 1,
            seed: None,
            corrupt: 3.0,
            crlf: false,
            config: None,
        };
        assert!(simulate(&args, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_print_config_round_trips() {
        let mut out = Vec::new();
        print_config(&mut out).unwrap();
        let parsed = DecoderConfig::from_json(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed.header_chars, 6);
    }
}
