//! Simulated capture through the decoder and assembler

use ecg_core::{Channel, EcgLead, Rejection};
use ecg_processing::{decode, SeriesAssembler};
use ecg_simulation::{Corruption, EcgConfig, EcgSimulator};

fn noisy_capture(rows: usize) -> ecg_simulation::SimulatedCapture {
    let mut config = EcgConfig {
        seed: Some(2024),
        crlf: true,
        ..EcgConfig::default()
    };
    config.corruption.truncate_prob = 0.05;
    config.corruption.saturate_prob = 0.05;

    EcgSimulator::new(config).unwrap().generate(rows).unwrap()
}

#[test]
fn test_corrupted_rows_are_absent_everywhere_else_present() {
    let capture = noisy_capture(400);
    assert!(!capture.corrupted.is_empty());

    let set = assemble_file_text(&capture.to_text());

    // one extra empty line after the final newline
    assert_eq!(set.len(), 401);
    assert_eq!(set.index().len(), 401);
    assert_eq!(*set.index().last().unwrap(), 400);

    let damaged: Vec<usize> = capture.corrupted.iter().map(|(row, _)| *row).collect();
    for series in set.channels() {
        assert_eq!(series.len(), 401);
        for row in 0..400 {
            assert_eq!(series.get(row).is_none(), damaged.contains(&row), "row {}", row);
        }
        assert!(series.get(400).is_none());
    }
}

#[test]
fn test_rejection_reasons_match_damage() {
    let capture = noisy_capture(300);
    let set = SeriesAssembler::default().assemble(&capture.records);

    assert_eq!(set.rejections().len(), capture.corrupted.len());
    for (row, (index, corruption)) in set.rejections().iter().zip(&capture.corrupted) {
        assert_eq!(row.index, *index);
        match (corruption, &row.reason) {
            (Corruption::Truncated, reason) => assert!(reason.is_shape()),
            (Corruption::Saturated { channel }, Rejection::Range { channel: rejected, .. }) => {
                assert_eq!(channel, rejected)
            }
            (damage, reason) => panic!("{:?} decoded as {:?}", damage, reason),
        }
    }

    let summary = set.summary();
    assert_eq!(summary.accepted + summary.rejected(), 300);
}

#[test]
fn test_series_match_record_decode() {
    let capture = noisy_capture(120);
    let set = SeriesAssembler::default().assemble(&capture.records);

    for (row, record) in capture.records.iter().enumerate() {
        let sample = decode(record);
        for channel in Channel::ALL {
            assert_eq!(set.channel(channel).get(row), sample.get(channel));
        }
    }

    // display leads read from their source slots
    assert_eq!(set.lead(EcgLead::V6).values, set.channel(Channel::C1).values);
    assert_eq!(set.lead(EcgLead::III).values, set.channel(Channel::LeadIII).values);
}

fn assemble_file_text(text: &str) -> ecg_core::SeriesSet {
    SeriesAssembler::default().assemble_text(text)
}
