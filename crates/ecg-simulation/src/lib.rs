//! ECG-Simulation: synthetic sample records
//!
//! Produces captures in the same ASCII-hex record format the decoder reads,
//! for tests, demos and benchmarks.

pub mod ecg_simulator;
pub mod encoder;
pub mod waveform;

pub use ecg_simulator::*;
pub use encoder::RecordEncoder;
pub use waveform::*;
