/*!
 * Request pacing.
 *
 * Keeps at least `min_interval` between the end of one remote call and the
 * start of the next. The pacer is owned by the translation client, which is
 * used sequentially, so the timestamp needs no synchronization.
 */

use std::time::Duration;
use tokio::time::Instant;

/// Enforces the minimum delay between consecutive remote calls
#[derive(Debug, Clone)]
pub struct RequestPacer {
    min_interval: Duration,
    last_call_end: Option<Instant>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call_end: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time still to wait before the next call may start
    pub fn remaining_delay(&self) -> Duration {
        match self.last_call_end {
            Some(end) => self.min_interval.saturating_sub(end.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Sleep until a call may start; returns immediately for the first call
    pub async fn await_next_slot(&mut self) {
        let wait = self.remaining_delay();
        if !wait.is_zero() {
            log::trace!("Pacing: waiting {:?} before next call", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Record that a call (successful or not) has just ended
    pub fn mark_call_finished(&mut self) {
        self.last_call_end = Some(Instant::now());
    }
}
