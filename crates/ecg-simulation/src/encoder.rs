//! Record encoder, the inverse of the record decoder

use ecg_core::{EcgError, EcgResult, Voltage, RAW_CHANNELS};
use ecg_processing::{DecoderConfig, CODE_CHARS};

const MIN_CODE: i64 = -0x80_0000;
const MAX_CODE: i64 = 0x7F_FFFF;

/// Largest positive 24-bit code
pub const FULL_SCALE_CODE: u32 = MAX_CODE as u32;

/// Writes voltages as header + eight 24-bit hex groups
#[derive(Debug, Clone)]
pub struct RecordEncoder {
    config: DecoderConfig,
    lsb: f64,
}

impl Default for RecordEncoder {
    fn default() -> Self {
        let config = DecoderConfig::default();
        let lsb = config.lsb();
        Self { config, lsb }
    }
}

impl RecordEncoder {
    pub fn new(config: DecoderConfig) -> EcgResult<Self> {
        config.validate()?;
        let lsb = config.lsb();
        Ok(Self { config, lsb })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Nearest 24-bit two's-complement code, as its unsigned bit pattern
    pub fn code_for(&self, voltage: Voltage) -> EcgResult<u32> {
        let exact = voltage.microvolts() / (self.lsb * 1e6);
        if !exact.is_finite() {
            return Err(EcgError::CodeOutOfRange {
                microvolts: voltage.microvolts(),
                code: 0,
            });
        }

        let code = exact.round() as i64;
        if !(MIN_CODE..=MAX_CODE).contains(&code) {
            return Err(EcgError::CodeOutOfRange {
                microvolts: voltage.microvolts(),
                code,
            });
        }
        Ok((code & 0xFF_FFFF) as u32)
    }

    /// One channel group: the low 24 bits of `code` as upper-case hex
    pub fn group(&self, code: u32) -> String {
        format!("{:0width$X}", code & 0xFF_FFFF, width = CODE_CHARS)
    }

    /// Largest header value that fits the configured width
    pub fn header_limit(&self) -> u64 {
        match self.config.header_chars {
            0 => 0,
            width if width >= 16 => u64::MAX,
            width => (1u64 << (4 * width)) - 1,
        }
    }

    pub fn encode(&self, header: u64, channels: &[Voltage; RAW_CHANNELS]) -> EcgResult<String> {
        let mut codes = [0u32; RAW_CHANNELS];
        for (code, voltage) in codes.iter_mut().zip(channels) {
            *code = self.code_for(*voltage)?;
        }
        self.encode_codes(header, &codes)
    }

    /// Encode raw codes; only the low 24 bits of each code are written
    pub fn encode_codes(&self, header: u64, codes: &[u32; RAW_CHANNELS]) -> EcgResult<String> {
        if header > self.header_limit() {
            return Err(EcgError::HeaderOverflow {
                value: header,
                width: self.config.header_chars,
            });
        }

        let mut record = String::with_capacity(self.config.record_chars() + 1);
        if self.config.header_chars > 0 {
            record.push_str(&format!("{:0width$X}", header, width = self.config.header_chars));
        }
        for code in codes {
            record.push_str(&self.group(*code));
        }
        Ok(record)
    }
}
