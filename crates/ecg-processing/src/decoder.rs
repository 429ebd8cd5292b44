//! Sample record decoder
//!
//! A record is `header_chars` characters of header followed by eight
//! 6-character hex groups, one 24-bit two's-complement code per channel.
//! A single trailing filler character (usually the `\r` of a CRLF line) is
//! tolerated.

use crate::config::DecoderConfig;
use ecg_core::{
    Channel, DecodedSample, EcgResult, Rejection, ShapeFault, Voltage, DECODED_CHANNELS,
    RAW_CHANNELS,
};

/// Hex characters per channel code
pub const CODE_CHARS: usize = 6;

/// Volts per code step at the default 2.4 V reference and gain 12
pub const LSB: f64 = 2.4 * 2.0 / 12.0 / 16_777_216.0;

const SIGN_BIT: i32 = 0x80_0000;
const CODE_SPAN: i32 = 0x100_0000;

/// Interpret the low 24 bits of `raw` as a two's-complement value
pub fn sign_extend_24(raw: u32) -> i32 {
    let raw = (raw & 0xFF_FFFF) as i32;
    if raw >= SIGN_BIT {
        raw - CODE_SPAN
    } else {
        raw
    }
}

/// LeadIII, aVR, aVL and aVF from channels C2 and C3
pub fn derive_leads(c2: Voltage, c3: Voltage) -> [Voltage; 4] {
    let lead_iii = c2 - c3;
    let avl = c2 - c3 / 2.0;
    let avr = Voltage::ZERO - avl;
    let avf = c3 - c2 / 2.0;
    [lead_iii, avr, avl, avf]
}

/// Decode one record with the default calibration
pub fn decode(record: &str) -> DecodedSample {
    RecordDecoder::default().decode(record)
}

/// Stateless record decoder for one calibration
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    config: DecoderConfig,
    lsb: f64,
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self {
            config: DecoderConfig::default(),
            lsb: LSB,
        }
    }
}

impl RecordDecoder {
    pub fn new(config: DecoderConfig) -> EcgResult<Self> {
        config.validate()?;
        let lsb = config.lsb();
        Ok(Self { config, lsb })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn lsb(&self) -> f64 {
        self.lsb
    }

    /// Decode a record into all 12 slots, or the reason it has none
    pub fn decode(&self, record: &str) -> DecodedSample {
        match self.raw_channels(record) {
            Ok(raw) => {
                let mut values = [Voltage::ZERO; DECODED_CHANNELS];
                values[..RAW_CHANNELS].copy_from_slice(&raw);
                let derived = derive_leads(raw[Channel::C2.index()], raw[Channel::C3.index()]);
                values[RAW_CHANNELS..].copy_from_slice(&derived);
                DecodedSample::Accepted(values)
            }
            Err(reason) => DecodedSample::Rejected(reason),
        }
    }

    /// The eight digitized channels in microvolts.
    ///
    /// Channels are converted in order and the first one at or over the
    /// guard rejects the whole record.
    fn raw_channels(&self, record: &str) -> Result<[Voltage; RAW_CHANNELS], Rejection> {
        let body = self.channel_body(record)?;
        let mut raw = [Voltage::ZERO; RAW_CHANNELS];

        for (position, slot) in raw.iter_mut().enumerate() {
            let channel = Channel::ALL[position];
            let code = code_group(body, position)
                .and_then(parse_code)
                .ok_or_else(|| non_hex(body, channel, position))?;

            let volts = sign_extend_24(code) as f64 * self.lsb;
            if volts.abs() >= self.config.guard_volts {
                return Err(Rejection::Range { channel, volts });
            }
            *slot = Voltage::from_volts(volts);
        }

        Ok(raw)
    }

    /// Validate the length, drop the filler and skip the header
    fn channel_body<'r>(&self, record: &'r str) -> Result<&'r str, Rejection> {
        let expected = self.config.record_chars();
        let length = record.chars().count();

        let effective = if length == expected + 1 {
            let last = record.char_indices().last().map_or(0, |(i, _)| i);
            &record[..last]
        } else if length == expected {
            record
        } else {
            return Err(Rejection::Shape(ShapeFault::Length { length }));
        };

        let start = effective
            .char_indices()
            .nth(self.config.header_chars)
            .map_or(effective.len(), |(i, _)| i);
        Ok(&effective[start..])
    }
}

/// Byte range of a channel group.
///
/// Groups before the first non-ASCII character stay aligned, so the first
/// group that is not pure hex is the one reported.
fn code_group(body: &str, position: usize) -> Option<&str> {
    body.get(position * CODE_CHARS..(position + 1) * CODE_CHARS)
}

/// Strict unsigned hex: exactly hex digits, no sign or whitespace
fn parse_code(group: &str) -> Option<u32> {
    if group.len() == CODE_CHARS && group.bytes().all(|b| b.is_ascii_hexdigit()) {
        u32::from_str_radix(group, 16).ok()
    } else {
        None
    }
}

fn non_hex(body: &str, channel: Channel, position: usize) -> Rejection {
    let group = body
        .chars()
        .skip(position * CODE_CHARS)
        .take(CODE_CHARS)
        .collect();
    Rejection::Shape(ShapeFault::NonHex { channel, group })
}
