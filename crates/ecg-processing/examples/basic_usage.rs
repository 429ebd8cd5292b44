//! Basic usage of the ECG record decoder
//!
//! Decodes a handful of records, shows how rejected records surface, and
//! assembles a short capture into display leads.

use ecg_core::{Channel, DecodedSample, EcgLead, EcgResult};
use ecg_processing::{decode, DecoderConfig, SeriesAssembler};

const CAPTURE: &str = "\
0000010000640007D00003200000000000000000000000000000FF\r
00000200006A0007C800031E000001000002000003000004FFFFFE\r
000003000070000\r
0000040000757FFFFF0003140000010000020000030000040000FF\r
0000050000800007A0000310000001000002000003000004FFFFFD\r
";

fn main() -> EcgResult<()> {
    println!("=== ECG Decoder Basic Usage ===\n");

    single_record_example();
    capture_example()?;

    println!("\n=== Done ===");
    Ok(())
}

/// Example 1: decode one record by hand
fn single_record_example() {
    println!("1. Single record");

    let record = "0000010000640007D00003200000000000000000000000000000FF";
    match decode(record) {
        DecodedSample::Accepted(values) => {
            for channel in Channel::ALL {
                println!("   {:>8}: {}", channel, values[channel.index()]);
            }
        }
        DecodedSample::Rejected(reason) => println!("   rejected: {}", reason),
    }
}

/// Example 2: assemble a capture and walk the display leads
fn capture_example() -> EcgResult<()> {
    println!("\n2. Capture assembly");

    let assembler = SeriesAssembler::with_config(DecoderConfig::default())?;
    let set = assembler.assemble_text(CAPTURE);

    let summary = set.summary();
    println!(
        "   {} records: {} accepted, {} shape rejected, {} range rejected",
        summary.total, summary.accepted, summary.shape_rejected, summary.range_rejected
    );

    for row in set.rejections() {
        println!("   row {}: {}", row.index, row.reason);
    }

    for lead in EcgLead::DISPLAY_ORDER {
        let series = set.lead(lead);
        let values: Vec<String> = series
            .iter()
            .map(|(_, v)| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v.microvolts())))
            .collect();
        println!("   {:>8} <- {:<7} [{}]", lead, lead.source(), values.join(", "));
    }

    Ok(())
}
