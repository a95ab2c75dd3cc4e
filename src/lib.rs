/*!
 * # SheetwAI - Spreadsheet translation with AI
 *
 * A Rust library for batch-translating the text of spreadsheet documents
 * through an OpenAI-compatible completion endpoint.
 *
 * ## Features
 *
 * - Translate cell text and floating text shapes, leaving numbers,
 *   formulas and formatting untouched
 * - Vietnamese to Japanese and Japanese to Vietnamese
 * - Delimited batching with strict segment-count reconciliation
 * - Request pacing and retries with exponential backoff
 * - JSON workbook and CSV documents
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Document trait and the supported formats
 * - `translation`: The batching and reconciliation pipeline:
 *   - `translation::eligibility`: Which values are worth translating
 *   - `translation::batch`: Size-bounded batches
 *   - `translation::codec`: Delimited payload encoding and decoding
 *   - `translation::client`: Paced and retried remote calls
 *   - `translation::reconcile`: Positional alignment of results
 *   - `translation::pipeline`: Per-document orchestration
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Translation directions and language names
 * - `providers`: Client implementations for the remote service:
 *   - `providers::openai`: OpenAI-compatible chat completions client
 *   - `providers::mock`: Scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use document::{Document, TextLocation};
pub use errors::{AppError, BatchFailure, CodecError, DocumentError, ProviderError, ServiceError};
pub use language_utils::{Direction, TargetLanguage, get_language_name};
pub use translation::{RunSummary, TranslationPipeline, TranslationStatus};
