/*!
 * Translation client: one paced, retried remote call per batch.
 *
 * The client owns the request pacer, so every attempt (retries included)
 * honours the minimum delay between calls. It is used from a single task
 * and takes `&mut self`.
 */

use log::{debug, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::TranslationConfig;
use crate::errors::ServiceError;
use crate::providers::{CompletionRequest, Provider};

use super::codec::EncodedRequest;
use super::pacing::RequestPacer;
use super::prompts::{PromptTemplate, user_prompt};
use super::retry::{RetryMachine, RetryPolicy};

/// Counters collected across calls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientStats {
    /// Batches sent
    pub calls: usize,
    /// Remote attempts, retries included
    pub attempts: usize,
    /// Attempts beyond the first
    pub retries: usize,
    /// Calls that ended with a service error
    pub failures: usize,
    /// Wall time spent waiting on the provider
    pub api_duration: Duration,
}

/// Sends encoded batches to a provider under pacing and retry rules
#[derive(Debug)]
pub struct TranslationClient {
    provider: Arc<dyn Provider>,
    prompt: PromptTemplate,
    delimiter: String,
    pacer: RequestPacer,
    policy: RetryPolicy,
    stats: ClientStats,
}

impl TranslationClient {
    pub fn new(
        provider: Arc<dyn Provider>,
        prompt: PromptTemplate,
        delimiter: &str,
        api_delay: Duration,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            prompt,
            delimiter: delimiter.to_string(),
            pacer: RequestPacer::new(api_delay),
            policy,
            stats: ClientStats::default(),
        }
    }

    /// Build a client from the translation section of the config
    pub fn from_config(
        provider: Arc<dyn Provider>,
        prompt: PromptTemplate,
        config: &TranslationConfig,
    ) -> Self {
        Self::new(
            provider,
            prompt,
            &config.delimiter,
            Duration::from_millis(config.api_delay_ms),
            RetryPolicy::new(
                config.max_attempts,
                Duration::from_millis(config.retry_backoff_ms),
                Duration::from_millis(config.max_backoff_ms),
            ),
        )
    }

    pub fn stats(&self) -> &ClientStats {
        &self.stats
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn completion_request(&self, request: &EncodedRequest) -> CompletionRequest {
        CompletionRequest::new(
            self.prompt.system_prompt(&request.direction, &self.delimiter),
            user_prompt(&request.direction, &self.delimiter, &request.payload),
        )
    }

    /// Translate one encoded batch and return the raw response text
    ///
    /// Transient failures are retried with backoff; the pacer is consulted
    /// before every attempt.
    pub async fn translate(&mut self, request: &EncodedRequest) -> Result<String, ServiceError> {
        let completion = self.completion_request(request);
        let mut machine = RetryMachine::new(self.policy);
        self.stats.calls += 1;

        loop {
            self.pacer.await_next_slot().await;

            let attempt = machine.begin_attempt();
            self.stats.attempts += 1;
            if attempt > 1 {
                self.stats.retries += 1;
            }
            debug!(
                "Sending {} segment(s) ({}), attempt {}/{}",
                request.segment_count, request.direction, attempt, self.policy.max_attempts
            );

            let started = Instant::now();
            let call = self.provider.complete(completion.clone());
            machine.on_sent();
            let outcome = call.await;
            self.pacer.mark_call_finished();
            self.stats.api_duration += started.elapsed();

            match outcome {
                Ok(text) => {
                    machine.on_success();
                    return Ok(text);
                }
                Err(error) => match machine.on_failure(error.clone()) {
                    Some(backoff) => {
                        warn!(
                            "Attempt {}/{} failed: {} - retrying in {:?}",
                            attempt, self.policy.max_attempts, error, backoff
                        );
                        tokio::time::sleep(backoff).await;
                    }
                    None => {
                        self.stats.failures += 1;
                        return Err(machine.into_error().unwrap_or(ServiceError {
                            attempts: attempt,
                            source: error,
                        }));
                    }
                },
            }
        }
    }
}
