/*!
 * Provider implementations for the remote translation service.
 *
 * - OpenAI: any OpenAI-compatible chat completions endpoint (Gemini's
 *   OpenAI compatibility layer by default)
 * - Mock: scripted outcomes for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One chat completion request: a system instruction and a user message
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Behavioural directive for the model
    pub system: String,
    /// The message carrying the payload
    pub user: String,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Common trait for all LLM providers
///
/// Implementations perform exactly one remote call per `complete`; pacing
/// and retries belong to the translation client.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request and return the generated text
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod mock;
pub mod openai;
