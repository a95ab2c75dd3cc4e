/*!
 * Reconciliation of decoded segments with their source fragments.
 *
 * Alignment is purely positional. When the segment count differs from the
 * batch size no pairing is attempted at all: every fragment of the batch
 * fails together.
 */

use log::warn;
use std::fmt;

use crate::document::TextLocation;
use crate::errors::{BatchFailure, CodecError};

use super::batch::{Batch, Fragment};
use super::codec::DecodedSegments;

/// Outcome for one fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationStatus {
    Translated,
    SkippedIneligible,
    /// Segments could not be aligned with the source fragments
    FailedMismatch,
    /// The remote call for the batch gave up
    FailedService,
    /// The translation could not be written to the document
    FailedWrite,
}

impl TranslationStatus {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::FailedMismatch | Self::FailedService | Self::FailedWrite
        )
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Translated => "translated",
            Self::SkippedIneligible => "skipped",
            Self::FailedMismatch => "failed (segment mismatch)",
            Self::FailedService => "failed (service)",
            Self::FailedWrite => "failed (write)",
        };
        f.write_str(label)
    }
}

/// Per-fragment result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub location: TextLocation,
    pub source_text: String,
    /// Present only when `status` is `Translated`
    pub translated_text: Option<String>,
    pub status: TranslationStatus,
}

impl TranslationResult {
    pub fn translated(fragment: &Fragment, text: String) -> Self {
        Self {
            location: fragment.location.clone(),
            source_text: fragment.source_text.clone(),
            translated_text: Some(text),
            status: TranslationStatus::Translated,
        }
    }

    pub fn untranslated(fragment: &Fragment, status: TranslationStatus) -> Self {
        Self {
            location: fragment.location.clone(),
            source_text: fragment.source_text.clone(),
            translated_text: None,
            status,
        }
    }
}

/// Maps a batch outcome onto per-fragment results
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler;

impl Reconciler {
    /// Check that the decoded segments line up with the batch
    pub fn check_alignment(batch: &Batch, segments: &DecodedSegments) -> Result<(), CodecError> {
        if segments.len() != batch.len() {
            return Err(CodecError::CountMismatch {
                expected: batch.len(),
                got: segments.len(),
            });
        }
        let blank = batch
            .fragments()
            .iter()
            .zip(segments.as_slice())
            .position(|(fragment, segment)| segment.is_empty() && !fragment.source_text.is_empty());
        if let Some(index) = blank {
            return Err(CodecError::EmptySegment { position: index + 1 });
        }
        Ok(())
    }

    /// Produce one result per fragment of `batch`, in batch order
    pub fn reconcile(
        batch: &Batch,
        outcome: Result<DecodedSegments, BatchFailure>,
    ) -> Vec<TranslationResult> {
        let segments = match outcome {
            Ok(segments) => match Self::check_alignment(batch, &segments) {
                Ok(()) => segments,
                Err(error) => {
                    warn!("⚠️ Batch {}: {}", batch.index + 1, error);
                    return Self::fail_all(batch, TranslationStatus::FailedMismatch);
                }
            },
            Err(BatchFailure::Codec(error)) => {
                warn!("⚠️ Batch {}: {}", batch.index + 1, error);
                return Self::fail_all(batch, TranslationStatus::FailedMismatch);
            }
            Err(BatchFailure::Service(error)) => {
                warn!("⚠️ Batch {}: {}", batch.index + 1, error);
                return Self::fail_all(batch, TranslationStatus::FailedService);
            }
        };

        batch
            .fragments()
            .iter()
            .zip(segments.into_vec())
            .map(|(fragment, text)| TranslationResult::translated(fragment, text))
            .collect()
    }

    fn fail_all(batch: &Batch, status: TranslationStatus) -> Vec<TranslationResult> {
        batch
            .fragments()
            .iter()
            .map(|fragment| TranslationResult::untranslated(fragment, status))
            .collect()
    }
}
