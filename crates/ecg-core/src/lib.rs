//! ECG-Core: shared types for the 8-channel ECG record decoder
//!
//! Calibrated voltages, the fixed 12-slot channel layout, decode outcomes
//! and the per-channel series handed to plotting code.

pub mod error;
pub mod lead;
pub mod sample;
pub mod series;

pub use error::{EcgError, EcgResult};
pub use lead::{Channel, EcgLead, LeadGroup, DECODED_CHANNELS, RAW_CHANNELS};
pub use sample::{DecodedSample, Rejection, ShapeFault, Voltage};
pub use series::{
    transpose, AssemblySummary, ChannelSeries, ChannelStats, RowRejection, SeriesSet,
};
