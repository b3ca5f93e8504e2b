use std::fmt::Write as _;
use std::time::Duration;

use crate::error::{AppError, AppResult, ReportError};

pub(super) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line)
        .map_err(|err| AppError::report(ReportError::WriteLine { source: err }))
}

pub(super) fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

/// Renders a duration with millisecond precision below one second and
/// second precision above, e.g. `12.345ms` or `3.201s`.
pub(super) fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        let micros = duration.as_micros();
        format!("{}.{:03}ms", micros / 1_000, micros % 1_000)
    } else {
        format!("{}.{:03}s", duration.as_secs(), duration.subsec_millis())
    }
}

/// Milliseconds with three decimals, for machine-readable chart data.
pub(super) fn millis_x1000(duration: Duration) -> String {
    let micros = duration.as_micros();
    format!("{}.{:03}", micros / 1_000, micros % 1_000)
}
