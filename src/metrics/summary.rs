use std::collections::HashMap;
use std::time::Duration;

use super::histogram::LatencyHistogram;
use super::types::{FailureCode, ResultSnapshot, TransportErrorKind};

/// Number of occurrences of one failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: FailureCode,
    pub count: u64,
}

/// Read-only statistics of a finished run, handed to the reporters.
#[derive(Debug, Clone)]
pub struct Summary {
    pub elapsed: Duration,
    /// Requests the run was configured to issue.
    pub total_requests: u64,
    /// Requests actually attempted; lower than `total_requests` only when
    /// the run was interrupted.
    pub issued_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub timeout_requests: u64,
    pub transport_errors: u64,
    pub average_latency: Duration,
    pub min_latency: Duration,
    pub max_latency: Duration,
    pub p50_latency: Duration,
    pub p90_latency: Duration,
    pub p99_latency: Duration,
    pub success_rate_x100: u64,
    pub avg_rps_x100: u64,
    pub latencies: Vec<Duration>,
    /// Failure codes in order of first occurrence.
    pub error_distribution: Vec<ErrorEntry>,
}

impl Summary {
    #[must_use]
    pub fn from_snapshot(snapshot: ResultSnapshot, total_requests: u64, elapsed: Duration) -> Self {
        let issued_requests = snapshot.completed();
        let failed_requests = snapshot.failed_count();
        let error_distribution = error_distribution(&snapshot.error_codes);
        let timeout_requests = count_codes(&snapshot.error_codes, |code| {
            code == FailureCode::Transport(TransportErrorKind::Timeout)
        });
        let transport_errors = count_codes(&snapshot.error_codes, FailureCode::is_transport);

        let (p50_latency, p90_latency, p99_latency) =
            match LatencyHistogram::from_latencies(&snapshot.latencies) {
                Ok(histogram) => histogram.percentiles(),
                Err(err) => {
                    tracing::warn!("Failed to compute latency percentiles: {}", err);
                    (Duration::ZERO, Duration::ZERO, Duration::ZERO)
                }
            };

        Self {
            elapsed,
            total_requests,
            issued_requests,
            successful_requests: snapshot.successful_count,
            failed_requests,
            timeout_requests,
            transport_errors,
            average_latency: average_latency(&snapshot.latencies),
            min_latency: snapshot.latencies.iter().min().copied().unwrap_or_default(),
            max_latency: snapshot.latencies.iter().max().copied().unwrap_or_default(),
            p50_latency,
            p90_latency,
            p99_latency,
            success_rate_x100: success_rate_x100(snapshot.successful_count, issued_requests),
            avg_rps_x100: avg_rps_x100(issued_requests, elapsed),
            latencies: snapshot.latencies,
            error_distribution,
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.issued_requests == self.total_requests
    }
}

/// Mean of the sequence; zero for an empty sequence.
#[must_use]
pub(super) fn average_latency(latencies: &[Duration]) -> Duration {
    let total_nanos = latencies
        .iter()
        .fold(0u128, |acc, latency| acc.saturating_add(latency.as_nanos()));
    let count = u128::try_from(latencies.len()).unwrap_or(u128::MAX);
    let average = total_nanos.checked_div(count).unwrap_or(0);
    Duration::from_nanos(u64::try_from(average).unwrap_or(u64::MAX))
}

fn error_distribution(codes: &[FailureCode]) -> Vec<ErrorEntry> {
    let mut entries: Vec<ErrorEntry> = Vec::new();
    let mut positions: HashMap<FailureCode, usize> = HashMap::new();
    for code in codes {
        if let Some(entry) = positions
            .get(code)
            .and_then(|position| entries.get_mut(*position))
        {
            entry.count = entry.count.saturating_add(1);
        } else {
            positions.insert(*code, entries.len());
            entries.push(ErrorEntry {
                code: *code,
                count: 1,
            });
        }
    }
    entries
}

fn count_codes(codes: &[FailureCode], predicate: impl Fn(FailureCode) -> bool) -> u64 {
    let count = codes.iter().filter(|code| predicate(**code)).count();
    u64::try_from(count).unwrap_or(u64::MAX)
}

fn success_rate_x100(successful: u64, issued: u64) -> u64 {
    let scaled = u128::from(successful)
        .saturating_mul(10_000)
        .checked_div(u128::from(issued))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn avg_rps_x100(issued: u64, elapsed: Duration) -> u64 {
    let elapsed_ms = elapsed.as_millis().max(1);
    let scaled = u128::from(issued)
        .saturating_mul(100_000)
        .checked_div(elapsed_ms)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
