/*!
 * Batch translation of spreadsheet text.
 *
 * - `eligibility`: decides which values are worth translating
 * - `batch`: groups fragments into size-bounded batches
 * - `codec`: packs a batch into one delimited payload and back
 * - `pacing`: minimum delay between remote calls
 * - `retry`: bounded exponential backoff state machine
 * - `prompts`: system instruction template and user message
 * - `client`: paced, retried calls to a provider
 * - `reconcile`: positional alignment of results with fragments
 * - `pipeline`: per-document orchestration and run summaries
 */

pub mod batch;
pub mod client;
pub mod codec;
pub mod eligibility;
pub mod pacing;
pub mod pipeline;
pub mod prompts;
pub mod reconcile;
pub mod retry;

// Re-export main types for easier usage
pub use self::batch::{Batch, Batcher, Fragment};
pub use self::client::{ClientStats, TranslationClient};
pub use self::codec::{DecodedSegments, EncodedRequest, SegmentCodec};
pub use self::eligibility::EligibilityFilter;
pub use self::pacing::RequestPacer;
pub use self::pipeline::{BatchProgress, DocumentReport, RunSummary, TranslationPipeline};
pub use self::prompts::PromptTemplate;
pub use self::reconcile::{Reconciler, TranslationResult, TranslationStatus};
pub use self::retry::{CallState, RetryMachine, RetryPolicy};
