//! Series assembly: decode a whole capture and reshape it per channel

use crate::config::DecoderConfig;
use crate::decoder::RecordDecoder;
use ecg_core::{DecodedSample, EcgResult, SeriesSet};
use tracing::{debug, info, warn};

pub use ecg_core::transpose;

/// Assemble a capture with the default calibration
pub fn assemble<I, S>(records: I) -> SeriesSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SeriesAssembler::default().assemble(records)
}

/// Decodes every record of a capture and builds its [`SeriesSet`]
#[derive(Debug, Clone, Default)]
pub struct SeriesAssembler {
    decoder: RecordDecoder,
}

impl SeriesAssembler {
    pub fn new(decoder: RecordDecoder) -> Self {
        Self { decoder }
    }

    pub fn with_config(config: DecoderConfig) -> EcgResult<Self> {
        Ok(Self::new(RecordDecoder::new(config)?))
    }

    pub fn decoder(&self) -> &RecordDecoder {
        &self.decoder
    }

    /// Decode records in order and transpose them into twelve series.
    ///
    /// Rejected records keep their row; they never stop the pass.
    pub fn assemble<I, S>(&self, records: I) -> SeriesSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let samples: Vec<DecodedSample> = records
            .into_iter()
            .map(|record| self.decoder.decode(record.as_ref()))
            .collect();

        let set = SeriesSet::from_samples(&samples);
        for row in set.rejections() {
            debug!(index = row.index, reason = %row.reason, "record rejected");
        }

        let summary = set.summary();
        if summary.total > 0 && summary.accepted == 0 {
            warn!(total = summary.total, "no record in capture was accepted");
        }
        info!(
            capture = %set.id(),
            total = summary.total,
            accepted = summary.accepted,
            shape_rejected = summary.shape_rejected,
            range_rejected = summary.range_rejected,
            "capture assembled"
        );

        set
    }

    /// Split a text buffer on `'\n'` and assemble every line.
    ///
    /// Lines keep any `'\r'`; a buffer ending in a newline yields one last
    /// empty record, which is rejected.
    pub fn assemble_text(&self, text: &str) -> SeriesSet {
        self.assemble(text.split('\n'))
    }
}
