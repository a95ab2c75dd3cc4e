/*!
 * Error types for the sheetwai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The API answered but carried no text
    #[error("Empty response from API")]
    EmptyResponse,
}

impl ProviderError {
    /// Whether a retry of the same request may succeed.
    ///
    /// Network failures, rate limiting, server-side errors and empty or
    /// unparseable bodies are transient. Authentication failures and other
    /// client errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(_)
            | Self::ConnectionError(_)
            | Self::RateLimitExceeded(_)
            | Self::ParseError(_)
            | Self::EmptyResponse => true,
            Self::ApiError { status_code, .. } => *status_code == 429 || *status_code >= 500,
            Self::AuthenticationError(_) => false,
        }
    }
}

/// Terminal failure of one remote translation call
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Translation service failed after {attempts} attempt(s): {source}")]
pub struct ServiceError {
    /// Number of attempts made before giving up
    pub attempts: u32,
    /// The last error seen
    pub source: ProviderError,
}

/// Errors produced while decoding a delimited response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The response held no text at all
    #[error("Response contained no segments")]
    EmptyResponse,

    /// Segment count differs from the batch size
    #[error("Segment count mismatch: expected {expected}, got {got}")]
    CountMismatch {
        /// Fragments in the batch
        expected: usize,
        /// Segments received
        got: usize,
    },

    /// A segment came back blank for a fragment that had text
    #[error("Segment {position} is empty")]
    EmptySegment {
        /// One-based position in the batch
        position: usize,
    },

    /// The source text already contains the segment delimiter
    #[error("Source text contains the delimiter {0:?}")]
    EmbeddedDelimiter(String),
}

/// Why a whole batch could not be translated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchFailure {
    /// Remote call gave up
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Remote call succeeded but the payload could not be aligned
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors that can occur while reading, editing or saving a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document content could not be parsed or serialized
    #[error("Malformed document {path}: {message}")]
    Malformed {
        /// Path of the document
        path: String,
        /// What went wrong
        message: String,
    },

    /// The file extension is not a supported document format
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// A write targeted a location the document does not have
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document handling
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
