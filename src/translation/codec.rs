/*!
 * Segment codec: packs a batch into one delimited payload and unpacks the
 * service's reply into ordered segments.
 *
 * Decoding reports how many segments actually came back. Comparing that
 * count with the batch is the reconciler's job.
 */

use crate::errors::CodecError;
use crate::language_utils::Direction;

use super::batch::Batch;

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITER: &str = "|||";

/// A batch serialized for one remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    /// Source texts joined by the delimiter
    pub payload: String,
    /// Translation direction, passed out of band
    pub direction: Direction,
    /// Number of segments in `payload`
    pub segment_count: usize,
}

/// Ordered segments split out of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSegments {
    segments: Vec<String>,
}

impl DecodedSegments {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.segments
    }

    pub fn into_vec(self) -> Vec<String> {
        self.segments
    }
}

/// Encoder/decoder for delimited batch payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentCodec {
    delimiter: String,
}

impl Default for SegmentCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl SegmentCodec {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Reject a source text that would split into more than one segment
    pub fn check_source(&self, text: &str) -> Result<(), CodecError> {
        if text.contains(self.delimiter.as_str()) {
            return Err(CodecError::EmbeddedDelimiter(self.delimiter.clone()));
        }
        Ok(())
    }

    /// Join the batch's source texts with the delimiter
    pub fn encode(&self, batch: &Batch, direction: &Direction) -> EncodedRequest {
        let payload = batch.source_texts().collect::<Vec<_>>().join(&self.delimiter);
        EncodedRequest {
            payload,
            direction: direction.clone(),
            segment_count: batch.len(),
        }
    }

    /// Split a raw response on the delimiter, trimming each segment
    pub fn decode(&self, raw: &str) -> Result<DecodedSegments, CodecError> {
        if raw.trim().is_empty() {
            return Err(CodecError::EmptyResponse);
        }

        let segments = raw
            .split(self.delimiter.as_str())
            .map(|segment| segment.trim().to_string())
            .collect();

        Ok(DecodedSegments { segments })
    }
}
