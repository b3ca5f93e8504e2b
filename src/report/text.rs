use crate::error::AppResult;
use crate::metrics::Summary;

use super::format::{format_duration, format_x100, write_line};

/// Human-readable summary; used for the console and the `text` encoding.
pub(crate) fn render_text(summary: &Summary) -> AppResult<String> {
    let mut output = String::new();

    write_line(
        &mut output,
        &format!("Total time spent: {}", format_duration(summary.elapsed)),
    )?;
    write_line(
        &mut output,
        &format!("Total requests: {}", summary.total_requests),
    )?;
    if !summary.is_complete() {
        write_line(
            &mut output,
            &format!(
                "Issued requests: {} of {} requested (interrupted)",
                summary.issued_requests, summary.total_requests
            ),
        )?;
    }
    write_line(
        &mut output,
        &format!(
            "Successful requests: {} ({}%)",
            summary.successful_requests,
            format_x100(summary.success_rate_x100)
        ),
    )?;
    write_line(
        &mut output,
        &format!("Failed requests: {}", summary.failed_requests),
    )?;
    write_line(
        &mut output,
        &format!(
            "Timeouts / Transport errors: {} / {}",
            summary.timeout_requests, summary.transport_errors
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "Average request time spent: {}",
            format_duration(summary.average_latency)
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "Min/Max request time: {} / {}",
            format_duration(summary.min_latency),
            format_duration(summary.max_latency)
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "P50/P90/P99 request time: {} / {} / {}",
            format_duration(summary.p50_latency),
            format_duration(summary.p90_latency),
            format_duration(summary.p99_latency)
        ),
    )?;
    write_line(
        &mut output,
        &format!("Requests per second: {}", format_x100(summary.avg_rps_x100)),
    )?;

    write_line(&mut output, "Error distribution:")?;
    for entry in &summary.error_distribution {
        write_line(&mut output, &format!("  {}: {}", entry.code, entry.count))?;
    }

    Ok(output)
}

/// Prints the summary to stdout.
///
/// # Errors
///
/// Returns an error if the summary text cannot be assembled.
pub fn print_summary(summary: &Summary) -> AppResult<()> {
    print!("{}", render_text(summary)?);
    Ok(())
}
