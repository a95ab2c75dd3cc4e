/*!
 * Pipeline orchestrator for translating one document at a time.
 *
 * For each document:
 * 1. Enumerate text locations in traversal order
 * 2. Partition them with the eligibility filter
 * 3. Batch the eligible fragments
 * 4. Per batch: encode, call, decode, reconcile, then write back
 *
 * A failing batch only affects its own fragments; later batches still run.
 */

use anyhow::Result;
use log::{debug, info, warn};
use std::fmt;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::document::Document;
use crate::errors::BatchFailure;
use crate::language_utils::Direction;

use super::batch::{Batch, Batcher, Fragment};
use super::client::TranslationClient;
use super::codec::SegmentCodec;
use super::eligibility::EligibilityFilter;
use super::reconcile::{Reconciler, TranslationResult, TranslationStatus};

/// Progress notification sent after each batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress {
    /// Batches finished so far in this document
    pub completed: usize,
    /// Batches in this document
    pub total: usize,
    /// Outcome counts of the batch just finished
    pub translated: usize,
    pub failed: usize,
}

/// Counters and per-fragment results for one document
#[derive(Debug, Clone, Default)]
pub struct DocumentReport {
    pub name: String,
    pub translated: usize,
    pub skipped: usize,
    pub failed_mismatch: usize,
    pub failed_service: usize,
    pub failed_write: usize,
    pub batches: usize,
    pub retries: usize,
    pub duration: Duration,
    pub results: Vec<TranslationResult>,
    /// Set when the translated document could not be written out
    pub save_error: Option<String>,
}

impl DocumentReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn failed(&self) -> usize {
        self.failed_mismatch + self.failed_service + self.failed_write
    }

    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }

    fn record(&mut self, result: TranslationResult) {
        match result.status {
            TranslationStatus::Translated => self.translated += 1,
            TranslationStatus::SkippedIneligible => self.skipped += 1,
            TranslationStatus::FailedMismatch => self.failed_mismatch += 1,
            TranslationStatus::FailedService => self.failed_service += 1,
            TranslationStatus::FailedWrite => self.failed_write += 1,
        }
        self.results.push(result);
    }

    /// Results with the given status, in processing order
    pub fn results_with(&self, status: TranslationStatus) -> impl Iterator<Item = &TranslationResult> {
        self.results.iter().filter(move |r| r.status == status)
    }
}

impl fmt::Display for DocumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} translated, {} skipped, {} failed ({} mismatch, {} service, {} write) in {} batch(es)",
            self.name,
            self.translated,
            self.skipped,
            self.failed(),
            self.failed_mismatch,
            self.failed_service,
            self.failed_write,
            self.batches
        )
    }
}

/// Outcome of a run across all documents
#[derive(Debug, Default)]
pub struct RunSummary {
    pub documents: Vec<DocumentReport>,
    /// Documents that could not be opened, translated or saved, with the reason
    pub failed_documents: Vec<(String, String)>,
    pub duration: Duration,
}

impl RunSummary {
    /// Keep a processed document's counts; an unsaved one is also a failure
    pub fn record_document(&mut self, report: DocumentReport) {
        if let Some(reason) = &report.save_error {
            self.failed_documents.push((report.name.clone(), reason.clone()));
        }
        self.documents.push(report);
    }

    /// Documents translated and written out
    pub fn saved_documents(&self) -> usize {
        self.documents.iter().filter(|d| d.is_saved()).count()
    }

    pub fn record_failure(&mut self, name: &str, reason: impl fmt::Display) {
        self.failed_documents.push((name.to_string(), reason.to_string()));
    }

    pub fn translated(&self) -> usize {
        self.documents.iter().map(|d| d.translated).sum()
    }

    pub fn skipped(&self) -> usize {
        self.documents.iter().map(|d| d.skipped).sum()
    }

    pub fn failed(&self) -> usize {
        self.documents.iter().map(|d| d.failed()).sum()
    }

    pub fn retries(&self) -> usize {
        self.documents.iter().map(|d| d.retries).sum()
    }

    /// True when every document was processed, even if some fragments failed
    pub fn all_documents_succeeded(&self) -> bool {
        self.failed_documents.is_empty()
    }
}

/// Drives documents through filter, batcher, codec, client and reconciler
#[derive(Debug)]
pub struct TranslationPipeline {
    client: TranslationClient,
    filter: EligibilityFilter,
    batcher: Batcher,
    codec: SegmentCodec,
    direction: Direction,
}

impl TranslationPipeline {
    pub fn new(
        client: TranslationClient,
        filter: EligibilityFilter,
        batcher: Batcher,
        codec: SegmentCodec,
        direction: Direction,
    ) -> Self {
        Self {
            client,
            filter,
            batcher,
            codec,
            direction,
        }
    }

    /// Assemble a pipeline from a validated config and a ready client
    pub fn from_config(config: &Config, client: TranslationClient) -> Result<Self> {
        Ok(Self::new(
            client,
            EligibilityFilter::new(config.batching.min_chars),
            Batcher::new(config.batching.batch_size)?,
            SegmentCodec::new(&config.translation.delimiter),
            config.target_language.direction(),
        ))
    }

    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    pub fn client(&self) -> &TranslationClient {
        &self.client
    }

    /// Split a document's locations into fragments to send and results
    /// settled without a call
    ///
    /// Ineligible text is skipped. Text holding the delimiter fails on its
    /// own as a mismatch so it cannot shift the rest of its batch.
    pub fn collect_fragments(&self, document: &dyn Document) -> (Vec<Fragment>, Vec<TranslationResult>) {
        let mut eligible = Vec::new();
        let mut settled = Vec::new();

        for (location, text) in document.text_locations() {
            let fragment = Fragment::new(location, text.trim());
            if !self.filter.is_eligible(&text) {
                settled.push(TranslationResult::untranslated(
                    &fragment,
                    TranslationStatus::SkippedIneligible,
                ));
            } else if let Err(error) = self.codec.check_source(&fragment.source_text) {
                warn!("⚠️ {}: {}", fragment.location, error);
                settled.push(TranslationResult::untranslated(
                    &fragment,
                    TranslationStatus::FailedMismatch,
                ));
            } else {
                eligible.push(fragment);
            }
        }

        (eligible, settled)
    }

    /// Number of batches a document will be split into
    pub fn planned_batches(&self, document: &dyn Document) -> usize {
        let (eligible, _) = self.collect_fragments(document);
        self.batcher.batch_count(eligible.len())
    }

    /// Encode, send and decode one batch
    async fn run_batch(&mut self, batch: &Batch) -> Vec<TranslationResult> {
        let request = self.codec.encode(batch, &self.direction);
        let outcome = match self.client.translate(&request).await {
            Ok(raw) => self.codec.decode(&raw).map_err(BatchFailure::from),
            Err(error) => Err(BatchFailure::from(error)),
        };
        Reconciler::reconcile(batch, outcome)
    }

    /// Translate every eligible location of `document` in place
    ///
    /// Fragment-level failures are reported, not returned as errors.
    pub async fn process_document(
        &mut self,
        document: &mut dyn Document,
        progress: Option<&(dyn Fn(BatchProgress) + Send + Sync)>,
    ) -> DocumentReport {
        let started = Instant::now();
        let retries_before = self.client.stats().retries;
        let mut report = DocumentReport::new(document.name());

        let (eligible, settled) = self.collect_fragments(document);
        for result in settled {
            report.record(result);
        }

        let batches = self.batcher.batches(eligible);
        report.batches = batches.len();
        info!(
            "📋 {}: {} fragment(s) to translate in {} batch(es), {} skipped",
            report.name,
            batches.iter().map(Batch::len).sum::<usize>(),
            batches.len(),
            report.skipped
        );

        let total = batches.len();
        for batch in &batches {
            debug!("Batch {}/{} ({} fragment(s))", batch.index + 1, total, batch.len());
            let results = self.run_batch(batch).await;

            let mut translated = 0;
            let mut failed = 0;
            for mut result in results {
                if let (TranslationStatus::Translated, Some(text)) =
                    (result.status, result.translated_text.as_deref())
                {
                    if let Err(e) = document.set_text(&result.location, text) {
                        warn!("⚠️ Could not write {}: {}", result.location, e);
                        result.status = TranslationStatus::FailedWrite;
                        result.translated_text = None;
                    }
                }
                if result.status == TranslationStatus::Translated {
                    translated += 1;
                } else {
                    failed += 1;
                }
                report.record(result);
            }

            if let Some(callback) = progress {
                callback(BatchProgress {
                    completed: batch.index + 1,
                    total,
                    translated,
                    failed,
                });
            }
        }

        report.retries = self.client.stats().retries - retries_before;
        report.duration = started.elapsed();
        report
    }
}
