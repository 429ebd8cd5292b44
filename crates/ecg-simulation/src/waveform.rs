//! Pre-defined cardiac waveforms for synthetic captures

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One Gaussian wave of the synthetic beat: (phase centre, width, relative amplitude)
const BEAT_WAVES: [(f64, f64, f64); 5] = [
    (0.20, 0.025, 0.12),  // P
    (0.35, 0.010, -0.15), // Q
    (0.375, 0.012, 1.0),  // R
    (0.40, 0.010, -0.25), // S
    (0.60, 0.040, 0.30),  // T
];

/// Waveform shape, amplitudes in microvolts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Waveform {
    /// Constant level
    Flat { level_uv: f64 },
    /// Pure sine wave
    Sinusoidal { frequency: f64, amplitude_uv: f64 },
    /// P-QRS-T complex repeated at a fixed heart rate
    Heartbeat { bpm: f64, amplitude_uv: f64 },
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Heartbeat {
            bpm: 72.0,
            amplitude_uv: 600.0,
        }
    }
}

impl Waveform {
    /// Value at `time` seconds, in microvolts
    pub fn value_at(&self, time: f64) -> f64 {
        match *self {
            Waveform::Flat { level_uv } => level_uv,

            Waveform::Sinusoidal { frequency, amplitude_uv } => {
                amplitude_uv * (2.0 * PI * frequency * time).sin()
            }

            Waveform::Heartbeat { bpm, amplitude_uv } => {
                if bpm <= 0.0 {
                    return 0.0;
                }
                let period = 60.0 / bpm;
                let phase = (time / period).rem_euclid(1.0);
                amplitude_uv * BEAT_WAVES
                    .iter()
                    .map(|&(centre, width, amp)| {
                        amp * (-((phase - centre) / width).powi(2) / 2.0).exp()
                    })
                    .sum::<f64>()
            }
        }
    }

    /// Largest magnitude the waveform can reach, in microvolts
    pub fn peak_uv(&self) -> f64 {
        match *self {
            Waveform::Flat { level_uv } => level_uv.abs(),
            Waveform::Sinusoidal { amplitude_uv, .. } => amplitude_uv.abs(),
            Waveform::Heartbeat { amplitude_uv, .. } => amplitude_uv.abs(),
        }
    }
}
