//! Error handling for the ECG decoding workspace
//!
//! Record rejections are not errors: a malformed or out-of-range record is
//! reported as [`crate::DecodedSample::Rejected`]. The variants here cover
//! configuration, encoding and series consistency failures only.

use core::fmt;

/// Result type alias for ECG workspace operations
pub type EcgResult<T> = Result<T, EcgError>;

/// Error type shared by all ECG crates
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EcgError {
    /// Decoder or simulator configuration is unusable
    ConfigurationError {
        /// Description of the configuration problem
        message: String,
    },

    /// Series columns do not line up with the index axis
    InvalidSeriesData {
        /// Description of the mismatch
        reason: String,
    },

    /// A voltage cannot be represented as a 24-bit digitizer code
    CodeOutOfRange {
        /// Offending value in microvolts
        microvolts: f64,
        /// Code it would have required
        code: i64,
    },

    /// Record header does not fit the configured header width
    HeaderOverflow {
        /// Header value
        value: u64,
        /// Header width in hex characters
        width: usize,
    },

    /// Synthetic signal generation failed
    SimulationError {
        /// Simulation error description
        message: String,
    },

    /// JSON (de)serialization failure
    SerializationError {
        /// Serialization error description
        message: String,
    },
}

impl fmt::Display for EcgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcgError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            EcgError::InvalidSeriesData { reason } => {
                write!(f, "Invalid series data: {}", reason)
            }
            EcgError::CodeOutOfRange { microvolts, code } => {
                write!(f, "{:.3} uV needs code {} which does not fit 24 bits",
                       microvolts, code)
            }
            EcgError::HeaderOverflow { value, width } => {
                write!(f, "Header value {} does not fit {} hex characters", value, width)
            }
            EcgError::SimulationError { message } => {
                write!(f, "Simulation error: {}", message)
            }
            EcgError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for EcgError {}
