//! Per-request outcomes, the shared result aggregator and the derived summary.
mod aggregator;
mod histogram;
mod summary;
mod types;


pub use aggregator::ResultAggregator;
pub use histogram::LatencyHistogram;
pub use summary::{ErrorEntry, Summary};
pub use types::{
    FailureCode, OutcomeKind, RequestOutcome, ResultSnapshot, SUCCESS_STATUS,
    TRANSPORT_ERROR_CODE, TransportErrorKind,
};
