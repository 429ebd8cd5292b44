//! Synthetic 8-channel ECG capture generator

use crate::encoder::{RecordEncoder, FULL_SCALE_CODE};
use crate::waveform::Waveform;
use ecg_core::{Channel, EcgError, EcgResult, Voltage, RAW_CHANNELS};
use ecg_processing::{DecoderConfig, CODE_CHARS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Relative amplitude per physical channel (C1..C8).
///
/// C1 is wired as V6 and C8 as V1, hence the negative V1 deflection.
const CHANNEL_GAINS: [f64; RAW_CHANNELS] = [0.6, 1.0, 1.3, 0.8, 1.1, 1.2, 0.9, -0.5];

/// Generated values are kept under this share of the decoder guard
const GUARD_HEADROOM: f64 = 0.95;

/// Noise configuration, amplitudes in microvolts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Gaussian noise standard deviation (0.0 = no noise)
    pub gaussian_std_uv: f64,
    /// Baseline wander amplitude (0.3 Hz drift)
    pub baseline_wander_uv: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            gaussian_std_uv: 5.0,
            baseline_wander_uv: 20.0,
        }
    }
}

/// Probability that a record is damaged on its way to the file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorruptionConfig {
    /// Record cut short (decodes as a shape rejection)
    pub truncate_prob: f64,
    /// One channel pinned to full scale (decodes as a range rejection)
    pub saturate_prob: f64,
}

/// How a simulated record was damaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corruption {
    Truncated,
    Saturated { channel: Channel },
}

/// Configuration for ECG simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcgConfig {
    /// Sampling rate in Hz
    pub sampling_rate: f64,
    /// Waveform shared by all channels, scaled per channel
    pub waveform: Waveform,
    pub noise: NoiseConfig,
    /// Power line interference (50/60Hz)
    pub powerline_freq: Option<f64>,
    pub corruption: CorruptionConfig,
    /// Terminate records with `\r` as a CRLF file would
    pub crlf: bool,
    /// Record layout and calibration to encode for
    pub decoder: DecoderConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for EcgConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 250.0,
            waveform: Waveform::default(),
            noise: NoiseConfig::default(),
            powerline_freq: Some(50.0),
            corruption: CorruptionConfig::default(),
            crlf: false,
            decoder: DecoderConfig::default(),
            seed: None,
        }
    }
}

impl EcgConfig {
    pub fn validate(&self) -> EcgResult<()> {
        if !(self.sampling_rate.is_finite() && self.sampling_rate > 0.0) {
            return Err(EcgError::ConfigurationError {
                message: format!("Sampling rate must be positive, got {}", self.sampling_rate),
            });
        }

        for (name, p) in [
            ("truncate_prob", self.corruption.truncate_prob),
            ("saturate_prob", self.corruption.saturate_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(EcgError::ConfigurationError {
                    message: format!("{} must be between 0.0 and 1.0, got {}", name, p),
                });
            }
        }

        for (name, amplitude) in [
            ("gaussian_std_uv", self.noise.gaussian_std_uv),
            ("baseline_wander_uv", self.noise.baseline_wander_uv),
        ] {
            if !(amplitude.is_finite() && amplitude >= 0.0) {
                return Err(EcgError::ConfigurationError {
                    message: format!("{} must be finite and non-negative, got {}", name, amplitude),
                });
            }
        }

        if let Some(freq) = self.powerline_freq {
            if !(freq.is_finite() && freq > 0.0) {
                return Err(EcgError::ConfigurationError {
                    message: format!("Power line frequency must be positive, got {}", freq),
                });
            }
        }

        self.decoder.validate()?;

        // a saturated channel must land at or over the guard to be rejected
        let full_scale_volts = FULL_SCALE_CODE as f64 * self.decoder.lsb();
        if self.corruption.saturate_prob > 0.0 && full_scale_volts < self.decoder.guard_volts {
            return Err(EcgError::ConfigurationError {
                message: format!(
                    "Full scale {:.6} V is under the {} V guard, saturated records would decode",
                    full_scale_volts, self.decoder.guard_volts
                ),
            });
        }

        Ok(())
    }
}

/// A simulated capture and the damage applied to it
#[derive(Debug, Clone)]
pub struct SimulatedCapture {
    pub records: Vec<String>,
    /// Damaged rows, in ascending order
    pub corrupted: Vec<(usize, Corruption)>,
}

impl SimulatedCapture {
    /// Records joined into a newline-terminated file body
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for record in &self.records {
            text.push_str(record);
            text.push('\n');
        }
        text
    }
}

/// ECG capture simulator
pub struct EcgSimulator {
    config: EcgConfig,
    encoder: RecordEncoder,
    rng: StdRng,
    normal_dist: Normal<f64>,
    sample_offset: u64,
}

impl EcgSimulator {
    /// Create new ECG simulator with configuration
    pub fn new(config: EcgConfig) -> EcgResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let normal_dist = Normal::new(0.0, config.noise.gaussian_std_uv)
            .map_err(|e| EcgError::SimulationError {
                message: format!("Failed to create normal distribution: {}", e),
            })?;
        let encoder = RecordEncoder::new(config.decoder.clone())?;

        let peak_gain = CHANNEL_GAINS.iter().fold(0.0f64, |a, g| a.max(g.abs()));
        let limit_uv = config.decoder.guard_volts * 1e6 * GUARD_HEADROOM;
        if config.waveform.peak_uv() * peak_gain > limit_uv {
            warn!(
                peak_uv = config.waveform.peak_uv() * peak_gain,
                limit_uv, "waveform exceeds the decoder guard and will be clipped"
            );
        }

        Ok(EcgSimulator {
            config,
            encoder,
            rng,
            normal_dist,
            sample_offset: 0,
        })
    }

    /// Generate the next `count` records
    pub fn generate(&mut self, count: usize) -> EcgResult<SimulatedCapture> {
        let mut records = Vec::with_capacity(count);
        let mut corrupted = Vec::new();
        let header_span = self.encoder.header_limit().saturating_add(1);

        for row in 0..count {
            let sample_idx = self.sample_offset + row as u64;
            let time = sample_idx as f64 / self.config.sampling_rate;

            let mut channels = [Voltage::ZERO; RAW_CHANNELS];
            for (position, value) in channels.iter_mut().enumerate() {
                *value = Voltage::from_microvolts(self.channel_sample(time, position));
            }

            let header = sample_idx % header_span;
            let mut record = self.encoder.encode(header, &channels)?;

            if let Some(corruption) = self.corrupt(&mut record) {
                debug!(row, ?corruption, "corrupted simulated record");
                corrupted.push((row, corruption));
            }
            if self.config.crlf {
                record.push('\r');
            }
            records.push(record);
        }

        self.sample_offset += count as u64;
        Ok(SimulatedCapture { records, corrupted })
    }

    /// Single channel value in microvolts, clamped under the decoder guard
    fn channel_sample(&mut self, time: f64, position: usize) -> f64 {
        let mut value = self.config.waveform.value_at(time) * CHANNEL_GAINS[position];

        value += self.normal_dist.sample(&mut self.rng);
        value += self.config.noise.baseline_wander_uv * (2.0 * std::f64::consts::PI * 0.3 * time).sin();

        if let Some(freq) = self.config.powerline_freq {
            value += 2.0 * (2.0 * std::f64::consts::PI * freq * time).sin();
        }

        let limit = self.config.decoder.guard_volts * 1e6 * GUARD_HEADROOM;
        value.clamp(-limit, limit)
    }

    fn corrupt(&mut self, record: &mut String) -> Option<Corruption> {
        let corruption = &self.config.corruption;

        if corruption.truncate_prob > 0.0 && self.rng.gen::<f64>() < corruption.truncate_prob {
            let keep = self.rng.gen_range(0..record.len());
            record.truncate(keep);
            return Some(Corruption::Truncated);
        }

        if corruption.saturate_prob > 0.0 && self.rng.gen::<f64>() < corruption.saturate_prob {
            let position = self.rng.gen_range(0..RAW_CHANNELS);
            let channel = Channel::raw(position)?;
            let start = self.config.decoder.header_chars + position * CODE_CHARS;
            record.replace_range(start..start + CODE_CHARS, &self.encoder.group(FULL_SCALE_CODE));
            return Some(Corruption::Saturated { channel });
        }

        None
    }

    /// Restart from sample zero
    pub fn reset(&mut self) {
        self.sample_offset = 0;
    }

    pub fn config(&self) -> &EcgConfig {
        &self.config
    }
}
