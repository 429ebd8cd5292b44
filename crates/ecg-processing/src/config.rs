//! Decoder calibration and record layout configuration

use crate::decoder::CODE_CHARS;
use ecg_core::{EcgError, EcgResult, RAW_CHANNELS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of distinct 24-bit digitizer codes
pub const FULL_SCALE_CODES: f64 = 16_777_216.0;

/// Calibration and layout of one sample record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// ADC reference voltage (V)
    pub reference_volts: f64,
    /// Programmable gain applied before digitizing
    pub gain: f64,
    /// Raw channel magnitude (V) at or above which a record is dropped
    pub guard_volts: f64,
    /// Leading characters skipped before the first channel group
    pub header_chars: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::ads1298()
    }
}

impl DecoderConfig {
    /// 2.4 V reference at gain 12 with a 1 mV guard
    pub fn ads1298() -> Self {
        Self {
            reference_volts: 2.4,
            gain: 12.0,
            guard_volts: 0.001,
            header_chars: 6,
        }
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Volts represented by one code step
    pub fn lsb(&self) -> f64 {
        self.reference_volts * 2.0 / self.gain / FULL_SCALE_CODES
    }

    /// Record length without the trailing filler
    pub fn record_chars(&self) -> usize {
        self.header_chars + RAW_CHANNELS * CODE_CHARS
    }

    pub fn validate(&self) -> EcgResult<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(EcgError::ConfigurationError {
                    message: format!("{} must be a positive finite number, got {}", name, value),
                })
            }
        };

        positive("reference_volts", self.reference_volts)?;
        positive("gain", self.gain)?;
        positive("guard_volts", self.guard_volts)?;

        if self.header_chars > 16 {
            return Err(EcgError::ConfigurationError {
                message: format!("header_chars {} exceeds 16", self.header_chars),
            });
        }

        Ok(())
    }

    /// Export configuration as pretty JSON
    pub fn to_json(&self) -> EcgResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EcgError::SerializationError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import and validate configuration from JSON
    pub fn from_json(json: &str) -> EcgResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| EcgError::SerializationError {
            message: format!("Failed to deserialize configuration: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EcgResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EcgError::ConfigurationError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json(&json)
    }
}
