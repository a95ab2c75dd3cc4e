/*!
 * Mock provider implementation for testing.
 *
 * - `MockProvider::working()` - translates every delimited segment
 * - `MockProvider::scripted()` - replays a fixed sequence of outcomes
 * - `MockProvider::failing()` - always fails with a transient error
 *
 * Every call is recorded together with the (tokio) instant it started, so
 * tests can check pacing without a network.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::time::Instant;

use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, Provider};

/// Marker the working mock puts in front of every translated segment
pub const MOCK_PREFIX: &str = "[TRANSLATED] ";

/// What the mock does once its script is exhausted
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Translate each segment of the payload
    Working { delimiter: String },
    /// Always fail with the given error
    Failing(ProviderError),
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Result<String, ProviderError>>,
    requests: Vec<CompletionRequest>,
    call_starts: Vec<Instant>,
}

/// Mock provider for testing translation behaviour
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified fallback behaviour
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// A provider that translates every `|||`-separated segment
    pub fn working() -> Self {
        Self::working_with_delimiter("|||")
    }

    /// A provider that translates every segment separated by `delimiter`
    pub fn working_with_delimiter(delimiter: &str) -> Self {
        Self::new(MockBehavior::Working {
            delimiter: delimiter.to_string(),
        })
    }

    /// A provider that always fails with a connection error
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing(ProviderError::ConnectionError(
            "mock connection refused".to_string(),
        )))
    }

    /// Replay `outcomes` in order, then behave like `working()`
    pub fn scripted(outcomes: Vec<Result<String, ProviderError>>) -> Self {
        let provider = Self::working();
        provider.state.lock().script.extend(outcomes);
        provider
    }

    /// Queue more scripted outcomes
    pub fn push_outcome(&self, outcome: Result<String, ProviderError>) {
        self.state.lock().script.push_back(outcome);
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Copies of every request received
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state.lock().requests.clone()
    }

    /// Start instants of every call
    pub fn call_starts(&self) -> Vec<Instant> {
        self.state.lock().call_starts.clone()
    }

    /// The delimited payload is everything after the first blank line of the
    /// user message
    pub fn payload_of(request: &CompletionRequest) -> &str {
        request
            .user
            .split_once("\n\n")
            .map(|(_, payload)| payload)
            .unwrap_or(&request.user)
    }

    fn translate_payload(payload: &str, delimiter: &str) -> String {
        payload
            .split(delimiter)
            .map(|segment| format!("{}{}", MOCK_PREFIX, segment.trim()))
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let scripted = {
            let mut state = self.state.lock();
            state.call_starts.push(Instant::now());
            state.requests.push(request.clone());
            state.script.pop_front()
        };

        if let Some(outcome) = scripted {
            return outcome;
        }

        match &self.behavior {
            MockBehavior::Working { delimiter } => Ok(Self::translate_payload(
                Self::payload_of(&request),
                delimiter,
            )),
            MockBehavior::Failing(error) => Err(error.clone()),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Working { .. } => Ok(()),
            MockBehavior::Failing(error) => Err(error.clone()),
        }
    }
}
