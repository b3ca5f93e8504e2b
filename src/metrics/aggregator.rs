use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::types::{FailureCode, OutcomeKind, RequestOutcome, ResultSnapshot};

/// Upper bound for preallocated latency slots; larger runs grow on demand.
const MAX_PREALLOCATED_LATENCIES: u64 = 1 << 20;

/// Thread-safe accumulator for the outcomes of one run.
///
/// Every mutation takes the same lock, so the success counter, the error
/// codes and the latency sequence always move together:
/// `successful_count + error_codes.len() == latencies.len()` holds for any
/// snapshot. The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    state: Mutex<ResultSnapshot>,
}

impl ResultAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator sized for `total_requests` outcomes.
    #[must_use]
    pub fn with_capacity(total_requests: u64) -> Self {
        let capacity = usize::try_from(total_requests.min(MAX_PREALLOCATED_LATENCIES)).unwrap_or(0);
        Self {
            state: Mutex::new(ResultSnapshot {
                successful_count: 0,
                error_codes: Vec::new(),
                latencies: Vec::with_capacity(capacity),
            }),
        }
    }

    pub fn record_success(&self, latency: Duration) {
        let mut state = self.lock();
        state.successful_count = state.successful_count.saturating_add(1);
        state.latencies.push(latency);
    }

    pub fn record_failure(&self, latency: Duration, code: FailureCode) {
        let mut state = self.lock();
        state.error_codes.push(code);
        state.latencies.push(latency);
    }

    /// Records a classified outcome through the matching operation.
    pub fn record(&self, outcome: &RequestOutcome) {
        match outcome.kind {
            OutcomeKind::Success { .. } => self.record_success(outcome.latency),
            OutcomeKind::HttpFailure { status } => {
                self.record_failure(outcome.latency, FailureCode::Status(status));
            }
            OutcomeKind::TransportFailure { kind } => {
                self.record_failure(outcome.latency, FailureCode::Transport(kind));
            }
        }
    }

    /// Copies the current state. Mid-run calls see a consistent prefix of
    /// the run.
    #[must_use]
    pub fn snapshot(&self) -> ResultSnapshot {
        self.lock().clone()
    }

    #[must_use]
    pub fn completed(&self) -> u64 {
        self.lock().completed()
    }

    // Outcomes are appended whole, so a poisoned lock still guards usable data.
    fn lock(&self) -> MutexGuard<'_, ResultSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
