//! Decoded sample types
//!
//! A record either decodes to all 12 slots or to a single rejection; there
//! is no partially valid sample.

use crate::lead::{Channel, DECODED_CHANNELS};
use serde::{Deserialize, Serialize};

/// Calibrated electrode voltage, stored in microvolts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Voltage(f64);

impl Voltage {
    pub const ZERO: Voltage = Voltage(0.0);

    pub const fn from_microvolts(microvolts: f64) -> Self {
        Voltage(microvolts)
    }

    pub fn from_volts(volts: f64) -> Self {
        Voltage(volts * 1e6)
    }

    pub const fn microvolts(self) -> f64 {
        self.0
    }

    pub fn volts(self) -> f64 {
        self.0 / 1e6
    }
}

impl std::ops::Sub for Voltage {
    type Output = Voltage;

    fn sub(self, rhs: Voltage) -> Voltage {
        Voltage(self.0 - rhs.0)
    }
}

impl std::ops::Div<f64> for Voltage {
    type Output = Voltage;

    fn div(self, rhs: f64) -> Voltage {
        Voltage(self.0 / rhs)
    }
}

impl std::ops::Neg for Voltage {
    type Output = Voltage;

    fn neg(self) -> Voltage {
        Voltage(-self.0)
    }
}

impl std::fmt::Display for Voltage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} uV", self.0)
    }
}

/// Why a record's shape was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeFault {
    /// Character count outside the accepted lengths
    Length {
        /// Length of the record as received
        length: usize,
    },
    /// A channel group contains a non-hexadecimal character
    NonHex {
        /// Raw channel the group belongs to
        channel: Channel,
        /// The group text as found
        group: String,
    },
}

/// Reason an entire record decoded to no data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rejection {
    /// Record does not have the fixed hex layout
    Shape(ShapeFault),
    /// A raw channel reached the magnitude guard
    Range {
        /// First channel found over the guard
        channel: Channel,
        /// Its value in volts
        volts: f64,
    },
}

impl Rejection {
    pub fn is_shape(&self) -> bool {
        matches!(self, Rejection::Shape(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Rejection::Range { .. })
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Shape(ShapeFault::Length { length }) => {
                write!(f, "record length {} not accepted", length)
            }
            Rejection::Shape(ShapeFault::NonHex { channel, group }) => {
                write!(f, "channel {} group {:?} is not hexadecimal", channel, group)
            }
            Rejection::Range { channel, volts } => {
                write!(f, "channel {} at {:.6} V exceeds magnitude guard", channel, volts)
            }
        }
    }
}

/// Outcome of decoding one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecodedSample {
    /// All 12 slots in [`Channel::ALL`] order
    Accepted([Voltage; DECODED_CHANNELS]),
    /// No data for this time point
    Rejected(Rejection),
}

impl DecodedSample {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DecodedSample::Accepted(_))
    }

    /// Value of one slot, absent for rejected records
    pub fn get(&self, channel: Channel) -> Option<Voltage> {
        match self {
            DecodedSample::Accepted(values) => Some(values[channel.index()]),
            DecodedSample::Rejected(_) => None,
        }
    }

    /// All 12 slots as optional values
    pub fn readings(&self) -> [Option<Voltage>; DECODED_CHANNELS] {
        match self {
            DecodedSample::Accepted(values) => values.map(Some),
            DecodedSample::Rejected(_) => [None; DECODED_CHANNELS],
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            DecodedSample::Accepted(_) => None,
            DecodedSample::Rejected(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_units() {
        let v = Voltage::from_volts(0.000125);
        assert!((v.microvolts() - 125.0).abs() < 1e-9);
        assert!((v.volts() - 0.000125).abs() < 1e-15);
        assert_eq!(format!("{}", Voltage::from_microvolts(12.345)), "12.35 uV");
    }

    #[test]
    fn test_rejected_sample_is_all_absent() {
        let sample = DecodedSample::Rejected(Rejection::Shape(ShapeFault::Length { length: 53 }));
        assert!(!sample.is_accepted());
        assert!(sample.readings().iter().all(Option::is_none));
        assert_eq!(sample.get(Channel::C1), None);
        assert!(sample.rejection().unwrap().is_shape());
    }

    #[test]
    fn test_accepted_sample_slots() {
        let mut values = [Voltage::ZERO; DECODED_CHANNELS];
        values[Channel::AVL.index()] = Voltage::from_microvolts(80.0);
        let sample = DecodedSample::Accepted(values);

        assert_eq!(sample.get(Channel::AVL), Some(Voltage::from_microvolts(80.0)));
        assert!(sample.readings().iter().all(Option::is_some));
        assert!(sample.rejection().is_none());
    }

    #[test]
    fn test_voltage_serializes_as_number() {
        let json = serde_json::to_string(&Voltage::from_microvolts(1.5)).unwrap();
        assert_eq!(json, "1.5");
    }
}
