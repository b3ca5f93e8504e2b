use serde::Serialize;

use crate::metrics::Summary;

use super::format::{format_duration, format_x100};

/// Serialized form of a run, keyed with human-readable field names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct Report {
    #[serde(rename = "Total time spent")]
    pub(crate) total_time_spent: String,
    #[serde(rename = "Total requests")]
    pub(crate) total_requests: u64,
    #[serde(rename = "Issued requests")]
    pub(crate) issued_requests: u64,
    #[serde(rename = "Average request time spent")]
    pub(crate) average_request_time_spent: String,
    #[serde(rename = "Minimum request time spent")]
    pub(crate) min_request_time_spent: String,
    #[serde(rename = "Maximum request time spent")]
    pub(crate) max_request_time_spent: String,
    #[serde(rename = "P50 request time spent")]
    pub(crate) p50_request_time_spent: String,
    #[serde(rename = "P90 request time spent")]
    pub(crate) p90_request_time_spent: String,
    #[serde(rename = "P99 request time spent")]
    pub(crate) p99_request_time_spent: String,
    #[serde(rename = "Requests per second")]
    pub(crate) requests_per_second: String,
    #[serde(rename = "Successful requests")]
    pub(crate) successful_requests: u64,
    #[serde(rename = "Failed requests")]
    pub(crate) failed_requests: u64,
    #[serde(rename = "Errors Distribution")]
    pub(crate) error_distribution: Vec<ReportErrorEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct ReportErrorEntry {
    /// HTTP status, or 0 for transport failures.
    #[serde(rename = "Code")]
    pub(crate) code: u16,
    #[serde(rename = "Count")]
    pub(crate) count: u64,
    #[serde(rename = "Label")]
    pub(crate) label: String,
}

impl Report {
    pub(crate) fn from_summary(summary: &Summary) -> Self {
        Self {
            total_time_spent: format_duration(summary.elapsed),
            total_requests: summary.total_requests,
            issued_requests: summary.issued_requests,
            average_request_time_spent: format_duration(summary.average_latency),
            min_request_time_spent: format_duration(summary.min_latency),
            max_request_time_spent: format_duration(summary.max_latency),
            p50_request_time_spent: format_duration(summary.p50_latency),
            p90_request_time_spent: format_duration(summary.p90_latency),
            p99_request_time_spent: format_duration(summary.p99_latency),
            requests_per_second: format_x100(summary.avg_rps_x100),
            successful_requests: summary.successful_requests,
            failed_requests: summary.failed_requests,
            error_distribution: summary
                .error_distribution
                .iter()
                .map(|entry| ReportErrorEntry {
                    code: entry.code.as_code(),
                    count: entry.count,
                    label: entry.code.to_string(),
                })
                .collect(),
        }
    }
}
