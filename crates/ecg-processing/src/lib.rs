//! ECG-Processing: record decoding and series assembly
//!
//! Turns fixed-format ASCII-hex sample records into calibrated voltages,
//! adds the four derived leads and reshapes a capture into per-channel
//! series.

pub mod assembler;
pub mod config;
pub mod decoder;

pub use assembler::{assemble, transpose, SeriesAssembler};
pub use config::DecoderConfig;
pub use decoder::{decode, derive_leads, sign_extend_24, RecordDecoder, CODE_CHARS, LSB};
