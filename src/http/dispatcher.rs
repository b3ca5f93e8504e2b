use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    config::RunConfig,
    error::{AppError, AppResult},
    metrics::{OutcomeKind, RequestOutcome, ResultAggregator, ResultSnapshot, Summary},
    shutdown::{ShutdownReceiver, ShutdownSender, shutdown_requested},
};

use super::client::{build_client, build_get_request};
use super::execution::execute_get;

/// Splits `total` requests across at most `workers` workers.
///
/// The first `total % workers` workers take one extra request, so the
/// assignment always sums to `total`. Only non-empty assignments are
/// returned: the result has `min(workers, total)` entries.
#[must_use]
pub fn partition(total: u64, workers: usize) -> Vec<u64> {
    let worker_count = u64::try_from(workers).unwrap_or(u64::MAX).min(total);
    let Some(base) = total.checked_div(worker_count) else {
        return Vec::new();
    };
    let remainder = total.checked_rem(worker_count).unwrap_or(0);

    (0..worker_count)
        .map(|idx| {
            if idx < remainder {
                base.saturating_add(1)
            } else {
                base
            }
        })
        .collect()
}

/// What a finished `run` reports back besides the aggregated outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub elapsed: Duration,
    /// Requests the workers actually issued in this run.
    pub issued: u64,
    pub requested: u64,
}

impl DispatchOutcome {
    #[must_use]
    pub const fn interrupted(&self) -> bool {
        self.issued < self.requested
    }
}

/// Result of one finished run: its outcome and everything it recorded.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub outcome: DispatchOutcome,
    pub snapshot: ResultSnapshot,
}

impl DispatchReport {
    #[must_use]
    pub fn into_summary(self) -> Summary {
        Summary::from_snapshot(self.snapshot, self.outcome.requested, self.outcome.elapsed)
    }
}

/// Owns the worker pool of one run.
///
/// Every worker shares the same client and reports into an aggregator the
/// dispatcher creates for itself. `run` consumes the dispatcher, so an
/// aggregator only ever holds the outcomes of a single run.
#[derive(Debug)]
pub struct Dispatcher {
    config: Arc<RunConfig>,
    client: Client,
    aggregator: Arc<ResultAggregator>,
    shutdown_tx: Option<ShutdownSender>,
    shutdown_rx: Option<ShutdownReceiver>,
}

struct Worker {
    id: usize,
    units: u64,
    client: Client,
    url: Url,
    quiet: bool,
    aggregator: Arc<ResultAggregator>,
    shutdown_rx: Option<ShutdownReceiver>,
}

impl Dispatcher {
    /// Binds a run configuration to a fresh aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built or the target
    /// cannot be turned into a GET request.
    pub fn new(config: RunConfig) -> AppResult<Self> {
        let client = build_client(&config)?;
        drop(build_get_request(&client, config.url())?);
        let aggregator = Arc::new(ResultAggregator::with_capacity(config.total_requests()));
        Ok(Self {
            config: Arc::new(config),
            client,
            aggregator,
            shutdown_tx: None,
            shutdown_rx: None,
        })
    }

    /// Lets workers stop issuing new requests once `shutdown_tx` fires.
    ///
    /// A shutdown broadcast after this call is honoured even if it arrives
    /// before `run` starts.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown_tx: &ShutdownSender) -> Self {
        self.shutdown_rx = Some(shutdown_tx.subscribe());
        self.shutdown_tx = Some(shutdown_tx.clone());
        self
    }

    /// Fires every configured request and waits for all workers.
    ///
    /// Failed requests are recorded, never returned as errors.
    ///
    /// # Errors
    ///
    /// Returns an error when a worker task panicked or was aborted. All
    /// workers are still joined first.
    pub async fn run(mut self) -> AppResult<DispatchReport> {
        let requested = self.config.total_requests();
        let assignments = partition(requested, self.config.concurrency());
        info!(
            "Dispatching {} requests across {} workers",
            requested,
            assignments.len()
        );

        let mut workers: Vec<Worker> = assignments
            .into_iter()
            .enumerate()
            .map(|(id, units)| Worker {
                id,
                units,
                client: self.client.clone(),
                url: self.config.url().clone(),
                quiet: self.config.quiet(),
                aggregator: Arc::clone(&self.aggregator),
                shutdown_rx: self.shutdown_tx.as_ref().map(ShutdownSender::subscribe),
            })
            .collect();

        if self.shutdown_rx.as_mut().is_some_and(shutdown_requested) {
            warn!("Shutdown requested before dispatch; no requests issued");
            workers.clear();
        }

        let started = Instant::now();
        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| tokio::spawn(worker.run()))
            .collect();

        let mut issued: u64 = 0;
        let mut first_failure = None;
        for handle in handles {
            match handle.await {
                Ok(completed) => issued = issued.saturating_add(completed),
                Err(err) => {
                    warn!("Worker task failed: {}", err);
                    first_failure.get_or_insert(err);
                }
            }
        }
        let elapsed = started.elapsed();

        if let Some(err) = first_failure {
            return Err(AppError::from(err));
        }

        info!("Dispatch finished: {} of {} requests issued", issued, requested);
        Ok(DispatchReport {
            outcome: DispatchOutcome {
                elapsed,
                issued,
                requested,
            },
            snapshot: self.aggregator.snapshot(),
        })
    }
}

impl Worker {
    /// Returns the number of requests this worker issued.
    async fn run(mut self) -> u64 {
        debug!("Worker {} started with {} requests", self.id, self.units);
        let mut completed: u64 = 0;
        while completed < self.units {
            if self.shutdown_rx.as_mut().is_some_and(shutdown_requested) {
                debug!(
                    "Worker {} stopping after {} of {} requests",
                    self.id, completed, self.units
                );
                return completed;
            }

            let outcome = execute_get(&self.client, &self.url).await;
            self.aggregator.record(&outcome);
            if !self.quiet {
                echo_outcome(&outcome);
            }
            completed = completed.saturating_add(1);
        }
        debug!("Worker {} finished", self.id);
        completed
    }
}

fn echo_outcome(outcome: &RequestOutcome) {
    match outcome.kind {
        OutcomeKind::Success { status } | OutcomeKind::HttpFailure { status } => {
            let reason = StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or_default();
            println!("Response status: {} {}", status, reason);
        }
        OutcomeKind::TransportFailure { kind } => {
            println!("Request failed: transport error ({})", kind.as_str());
        }
    }
}
