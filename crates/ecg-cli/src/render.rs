//! Text exports of an assembled capture, one column per display lead

use ecg_core::{AssemblySummary, ChannelStats, EcgLead, LeadGroup, RowRejection, SeriesSet};
use serde::Serialize;
use std::io::{self, Write};

/// Output layout for the `decode` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns, values as "12.34 uV"
    Table,
    /// Comma separated, absent values left empty
    Csv,
    /// One object with a value array per lead
    Json,
}

#[derive(Serialize)]
struct LeadExport {
    label: &'static str,
    group: LeadGroup,
    source: &'static str,
    values: Vec<Option<f64>>,
}

#[derive(Serialize)]
struct CaptureExport<'a> {
    id: String,
    index: &'a [usize],
    summary: AssemblySummary,
    leads: Vec<LeadExport>,
    rejections: &'a [RowRejection],
}

pub fn format_microvolts(value: f64) -> String {
    format!("{:.2} uV", value)
}

/// Rows of the capture to print, `None` meaning all of them
fn row_count(set: &SeriesSet, limit: Option<usize>) -> usize {
    limit.map_or(set.len(), |limit| limit.min(set.len()))
}

pub fn write_series<W: Write>(
    out: &mut W,
    set: &SeriesSet,
    format: OutputFormat,
    limit: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => write_table(out, set, limit),
        OutputFormat::Csv => write_csv(out, set, limit),
        OutputFormat::Json => write_json(out, set, limit),
    }
}

fn write_table<W: Write>(out: &mut W, set: &SeriesSet, limit: Option<usize>) -> io::Result<()> {
    write!(out, "{:>6}", "index")?;
    for lead in EcgLead::DISPLAY_ORDER {
        write!(out, " {:>11}", lead.label())?;
    }
    writeln!(out)?;

    for row in 0..row_count(set, limit) {
        write!(out, "{:>6}", set.index()[row])?;
        for lead in EcgLead::DISPLAY_ORDER {
            let cell = set
                .lead(lead)
                .get(row)
                .map_or_else(|| "-".to_string(), |v| format_microvolts(v.microvolts()));
            write!(out, " {:>11}", cell)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, set: &SeriesSet, limit: Option<usize>) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(&mut *out);

    let mut header = vec!["index"];
    header.extend(EcgLead::DISPLAY_ORDER.iter().map(|lead| lead.label()));
    writer.write_record(&header)?;

    for row in 0..row_count(set, limit) {
        let mut record = vec![set.index()[row].to_string()];
        record.extend(EcgLead::DISPLAY_ORDER.iter().map(|lead| {
            set.lead(*lead)
                .get(row)
                .map_or_else(String::new, |v| format!("{:.3}", v.microvolts()))
        }));
        writer.write_record(&record)?;
    }

    writer.flush()
}

fn write_json<W: Write>(out: &mut W, set: &SeriesSet, limit: Option<usize>) -> io::Result<()> {
    let rows = row_count(set, limit);
    let leads = EcgLead::DISPLAY_ORDER
        .iter()
        .map(|lead| LeadExport {
            label: lead.label(),
            group: lead.group(),
            source: lead.source().label(),
            values: set.lead(*lead).values[..rows]
                .iter()
                .map(|v| v.map(|v| v.microvolts()))
                .collect(),
        })
        .collect();

    let export = CaptureExport {
        id: set.id().to_string(),
        index: &set.index()[..rows],
        summary: set.summary(),
        leads,
        rejections: set.rejections_before(rows),
    };

    serde_json::to_writer_pretty(&mut *out, &export)?;
    writeln!(out)
}

/// Per-lead statistics over present values
pub fn write_stats<W: Write>(out: &mut W, set: &SeriesSet) -> io::Result<()> {
    writeln!(
        out,
        "{:<9} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "lead", "present", "mean", "rms", "min", "max", "p-p"
    )?;

    for lead in EcgLead::DISPLAY_ORDER {
        let series = set.lead(lead);
        write!(out, "{:<9} {:>7}", lead.label(), series.present_count())?;
        match series.stats() {
            Some(ChannelStats { mean, rms, min, max, peak_to_peak, .. }) => writeln!(
                out,
                " {:>12} {:>12} {:>12} {:>12} {:>12}",
                format_microvolts(mean),
                format_microvolts(rms),
                format_microvolts(min),
                format_microvolts(max),
                format_microvolts(peak_to_peak)
            )?,
            None => writeln!(out, " {:>12}", "no data")?,
        }
    }

    let summary = set.summary();
    writeln!(
        out,
        "{} records, {} accepted, {} shape rejected, {} range rejected",
        summary.total, summary.accepted, summary.shape_rejected, summary.range_rejected
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecg_processing::assemble;

    const ACCEPTED: &str = "000000000064000032000000000000000000000000000000000000";

    fn capture() -> SeriesSet {
        assemble([ACCEPTED, "bad", ACCEPTED])
    }

    fn render(set: &SeriesSet, format: OutputFormat, limit: Option<usize>) -> String {
        let mut out = Vec::new();
        write_series(&mut out, set, format, limit).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_labels_and_absent_rows() {
        let text = render(&capture(), OutputFormat::Table, None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("LEAD_I") && lines[0].contains("V6"));
        assert!(lines[1].contains(" uV"));
        assert!(lines[2].split_whitespace().skip(1).all(|cell| cell == "-"));
    }

    #[test]
    fn test_csv_layout() {
        let text = render(&capture(), OutputFormat::Csv, Some(2));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("index,LEAD_I,LEAD_II,LEAD_III,aVR,aVL,aVF,V1"));
        assert_eq!(lines[2], format!("1{}", ",".repeat(12)));
        assert_eq!(lines[1].split(',').count(), 13);
    }

    #[test]
    fn test_csv_reads_back() {
        let text = render(&capture(), OutputFormat::Csv, None);
        let mut reader = csv::Reader::from_reader(text.as_bytes());

        let header = reader.headers().unwrap().clone();
        assert_eq!(header.len(), 13);
        assert_eq!(&header[12], "V6");

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "1");
        assert!(rows[1].iter().skip(1).all(str::is_empty));
        assert!(rows[2][1].parse::<f64>().unwrap() > 0.0);
    }

    #[test]
    fn test_json_export() {
        let text = render(&capture(), OutputFormat::Json, None);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["index"], serde_json::json!([0, 1, 2]));
        assert_eq!(value["summary"]["shape_rejected"], 1);

        let leads = value["leads"].as_array().unwrap();
        assert_eq!(leads.len(), 12);
        assert_eq!(leads[0]["label"], "LEAD_I");
        assert_eq!(leads[0]["source"], "C2");
        assert!(leads[0]["values"][1].is_null());
        assert!(leads[0]["values"][0].as_f64().unwrap() > 0.0);
        assert_eq!(value["rejections"][0]["index"], 1);
    }

    #[test]
    fn test_json_rejections_follow_row_limit() {
        let set = assemble([ACCEPTED, ACCEPTED, "bad", "bad"]);

        let text = render(&set, OutputFormat::Json, Some(2));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["index"], serde_json::json!([0, 1]));
        assert!(value["rejections"].as_array().unwrap().is_empty());

        let text = render(&set, OutputFormat::Json, Some(3));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["rejections"].as_array().unwrap().len(), 1);
        assert_eq!(value["rejections"][0]["index"], 2);
    }

    #[test]
    fn test_stats_report() {
        let mut out = Vec::new();
        write_stats(&mut out, &capture()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("LEAD_I"));
        assert!(text.contains("3 records, 2 accepted, 1 shape rejected, 0 range rejected"));

        let mut out = Vec::new();
        write_stats(&mut out, &assemble(["bad"])).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("no data"));
    }

    #[test]
    fn test_microvolt_format() {
        assert_eq!(format_microvolts(1.004), "1.00 uV");
        assert_eq!(format_microvolts(-80.0), "-80.00 uV");
    }
}
