use std::fmt;
use std::time::Duration;

/// The only status classified as a success.
pub const SUCCESS_STATUS: u16 = 200;

/// Integer rendering of [`FailureCode::Transport`]; no HTTP status is 0.
pub const TRANSPORT_ERROR_CODE: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

impl TransportErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Other => "other",
        }
    }
}

/// Code recorded for every failed request.
///
/// Transport failures never share a value with an HTTP status, so the
/// error distribution can tell "server answered 500" apart from "server
/// never answered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureCode {
    Transport(TransportErrorKind),
    Status(u16),
}

impl FailureCode {
    #[must_use]
    pub const fn as_code(self) -> u16 {
        match self {
            FailureCode::Transport(_) => TRANSPORT_ERROR_CODE,
            FailureCode::Status(status) => status,
        }
    }

    #[must_use]
    pub const fn is_transport(self) -> bool {
        matches!(self, FailureCode::Transport(_))
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCode::Transport(kind) => write!(f, "transport error ({})", kind.as_str()),
            FailureCode::Status(status) => write!(f, "{}", status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success { status: u16 },
    HttpFailure { status: u16 },
    TransportFailure { kind: TransportErrorKind },
}

/// Classified result of one request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub latency: Duration,
    pub kind: OutcomeKind,
}

impl RequestOutcome {
    #[must_use]
    pub const fn from_status(latency: Duration, status: u16) -> Self {
        let kind = if status == SUCCESS_STATUS {
            OutcomeKind::Success { status }
        } else {
            OutcomeKind::HttpFailure { status }
        };
        Self { latency, kind }
    }

    #[must_use]
    pub const fn transport(latency: Duration, kind: TransportErrorKind) -> Self {
        Self {
            latency,
            kind: OutcomeKind::TransportFailure { kind },
        }
    }

    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.kind, OutcomeKind::Success { .. })
    }

    #[must_use]
    pub const fn failure_code(&self) -> Option<FailureCode> {
        match self.kind {
            OutcomeKind::Success { .. } => None,
            OutcomeKind::HttpFailure { status } => Some(FailureCode::Status(status)),
            OutcomeKind::TransportFailure { kind } => Some(FailureCode::Transport(kind)),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self.kind {
            OutcomeKind::Success { status } | OutcomeKind::HttpFailure { status } => Some(status),
            OutcomeKind::TransportFailure { .. } => None,
        }
    }
}

/// Point-in-time copy of everything the aggregator has recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSnapshot {
    pub successful_count: u64,
    pub error_codes: Vec<FailureCode>,
    pub latencies: Vec<Duration>,
}

impl ResultSnapshot {
    #[must_use]
    pub fn completed(&self) -> u64 {
        u64::try_from(self.latencies.len()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn failed_count(&self) -> u64 {
        u64::try_from(self.error_codes.len()).unwrap_or(u64::MAX)
    }
}
