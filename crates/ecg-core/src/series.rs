//! Per-channel time series built from a capture
//!
//! A [`SeriesSet`] owns one shared sample-index axis and twelve value
//! columns of the same length. Rejected records stay in place as absent
//! values so every column lines up with the index axis.

use crate::error::{EcgError, EcgResult};
use crate::lead::{Channel, EcgLead, DECODED_CHANNELS};
use crate::sample::{DecodedSample, Rejection, Voltage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reshape per-record samples into one column per slot.
///
/// Column `k` holds slot `k` of every sample in input order; rejected
/// samples contribute an absent value to every column.
pub fn transpose(samples: &[DecodedSample]) -> [Vec<Option<Voltage>>; DECODED_CHANNELS] {
    let mut columns: [Vec<Option<Voltage>>; DECODED_CHANNELS] =
        std::array::from_fn(|_| Vec::with_capacity(samples.len()));

    for sample in samples {
        let readings = sample.readings();
        for slot in 0..DECODED_CHANNELS {
            columns[slot].push(readings[slot]);
        }
    }

    columns
}

/// A rejected record and its position in the capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRejection {
    pub index: usize,
    pub reason: Rejection,
}

/// Counts of accepted and rejected records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssemblySummary {
    pub total: usize,
    pub accepted: usize,
    pub shape_rejected: usize,
    pub range_rejected: usize,
}

impl AssemblySummary {
    pub fn rejected(&self) -> usize {
        self.shape_rejected + self.range_rejected
    }
}

/// Twelve channel columns sharing one index axis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SeriesSetParts")]
pub struct SeriesSet {
    id: Uuid,
    index: Vec<usize>,
    columns: [Vec<Option<Voltage>>; DECODED_CHANNELS],
    rejections: Vec<RowRejection>,
}

/// Unchecked serialized form, validated through [`SeriesSet::new`]
#[derive(Deserialize)]
struct SeriesSetParts {
    id: Uuid,
    index: Vec<usize>,
    columns: [Vec<Option<Voltage>>; DECODED_CHANNELS],
    rejections: Vec<RowRejection>,
}

impl TryFrom<SeriesSetParts> for SeriesSet {
    type Error = EcgError;

    fn try_from(parts: SeriesSetParts) -> EcgResult<Self> {
        let len = parts.index.len();
        if parts.index.iter().enumerate().any(|(i, &position)| i != position) {
            return Err(EcgError::InvalidSeriesData {
                reason: "index axis is not 0..len".to_string(),
            });
        }

        let mut set = SeriesSet::new(len, parts.columns, parts.rejections)?;
        set.id = parts.id;
        Ok(set)
    }
}

impl SeriesSet {
    /// Build a set from transposed columns.
    ///
    /// Every column must hold exactly `len` values. A row is either present
    /// in all twelve columns or absent in all of them, and absent rows are
    /// exactly the rejections, listed once each in ascending order.
    pub fn new(
        len: usize,
        columns: [Vec<Option<Voltage>>; DECODED_CHANNELS],
        rejections: Vec<RowRejection>,
    ) -> EcgResult<Self> {
        let invalid = |reason: String| Err(EcgError::InvalidSeriesData { reason });

        if let Some((slot, column)) = columns.iter().enumerate().find(|(_, c)| c.len() != len) {
            return invalid(format!(
                "column {} has {} values, index axis has {}",
                Channel::ALL[slot],
                column.len(),
                len
            ));
        }
        if let Some(pair) = rejections.windows(2).find(|pair| pair[0].index >= pair[1].index) {
            return invalid(format!(
                "rejection at row {} listed after row {}",
                pair[1].index, pair[0].index
            ));
        }
        if let Some(row) = rejections.iter().find(|r| r.index >= len) {
            return invalid(format!("rejection at row {} outside capture of {}", row.index, len));
        }

        let mut rejected = rejections.iter().map(|r| r.index).peekable();
        for row in 0..len {
            let present = columns.iter().filter(|column| column[row].is_some()).count();
            let listed = rejected.next_if_eq(&row).is_some();
            match (present, listed) {
                (DECODED_CHANNELS, false) | (0, true) => {}
                (0, false) => return invalid(format!("row {} is absent but not rejected", row)),
                (DECODED_CHANNELS, true) => {
                    return invalid(format!("row {} is rejected but has values", row))
                }
                (present, _) => {
                    return invalid(format!(
                        "row {} has {} of {} values",
                        row, present, DECODED_CHANNELS
                    ))
                }
            }
        }

        Ok(SeriesSet {
            id: Uuid::new_v4(),
            index: (0..len).collect(),
            columns,
            rejections,
        })
    }

    /// Transpose decoded samples, keeping one row per sample
    pub fn from_samples(samples: &[DecodedSample]) -> Self {
        let rejections = samples
            .iter()
            .enumerate()
            .filter_map(|(index, sample)| {
                sample.rejection().map(|reason| RowRejection {
                    index,
                    reason: reason.clone(),
                })
            })
            .collect();

        SeriesSet {
            id: Uuid::new_v4(),
            index: (0..samples.len()).collect(),
            columns: transpose(samples),
            rejections,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Shared sample-index axis, `0..len`
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Series for one decoded slot
    pub fn channel(&self, channel: Channel) -> ChannelSeries<'_> {
        ChannelSeries {
            channel,
            index: &self.index,
            values: &self.columns[channel.index()],
        }
    }

    /// Series for a display lead, via [`EcgLead::source`]
    pub fn lead(&self, lead: EcgLead) -> ChannelSeries<'_> {
        self.channel(lead.source())
    }

    /// All twelve series in decode order
    pub fn channels(&self) -> impl Iterator<Item = ChannelSeries<'_>> + '_ {
        Channel::ALL.into_iter().map(move |channel| self.channel(channel))
    }

    /// Rejected rows in ascending index order
    pub fn rejections(&self) -> &[RowRejection] {
        &self.rejections
    }

    /// Rejections among the first `rows` rows
    pub fn rejections_before(&self, rows: usize) -> &[RowRejection] {
        let end = self.rejections.partition_point(|r| r.index < rows);
        &self.rejections[..end]
    }

    pub fn summary(&self) -> AssemblySummary {
        let shape_rejected = self.rejections.iter().filter(|r| r.reason.is_shape()).count();
        let range_rejected = self.rejections.iter().filter(|r| r.reason.is_range()).count();

        AssemblySummary {
            total: self.len(),
            accepted: self.len() - self.rejections.len(),
            shape_rejected,
            range_rejected,
        }
    }
}

/// One channel paired with the shared index axis
#[derive(Debug, Clone, Copy)]
pub struct ChannelSeries<'a> {
    pub channel: Channel,
    pub index: &'a [usize],
    pub values: &'a [Option<Voltage>],
}

impl<'a> ChannelSeries<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Voltage> {
        self.values.get(position).copied().flatten()
    }

    /// (sample index, value) pairs, absent values included
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<Voltage>)> + 'a {
        let (index, values) = (self.index, self.values);
        index.iter().copied().zip(values.iter().copied())
    }

    /// Present values only, as plot coordinates in microvolts
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + 'a {
        self.iter()
            .filter_map(|(i, v)| v.map(|v| [i as f64, v.microvolts()]))
    }

    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Statistics over present values; `None` when nothing is present
    pub fn stats(&self) -> Option<ChannelStats> {
        let data: Vec<f64> = self.values.iter().flatten().map(|v| v.microvolts()).collect();
        if data.is_empty() {
            None
        } else {
            Some(ChannelStats::calculate(&data))
        }
    }
}

/// Basic statistics for a channel, in microvolts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f64,
    pub rms: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub peak_to_peak: f64,
}

impl ChannelStats {
    pub fn calculate(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                rms: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                peak_to_peak: 0.0,
            };
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let rms = (data.iter().map(|x| x * x).sum::<f64>() / n).sqrt();

        let variance = data.iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let min = data.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        Self {
            mean,
            rms,
            std_dev,
            min,
            max,
            peak_to_peak: max - min,
        }
    }
}
