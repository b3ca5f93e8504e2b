use crate::args::EncodeFormat;
use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::Summary;

use super::format::write_line;
use super::model::Report;
use super::text::render_text;

/// Serializes the summary in the requested encoding.
pub(crate) fn encode_report(summary: &Summary, encode: EncodeFormat) -> AppResult<String> {
    match encode {
        EncodeFormat::Text => render_text(summary),
        EncodeFormat::Json => serde_json::to_string_pretty(&Report::from_summary(summary))
            .map_err(|err| AppError::report(ReportError::SerializeJson { source: err })),
        EncodeFormat::Yaml => serde_yaml::to_string(&Report::from_summary(summary))
            .map_err(|err| AppError::report(ReportError::SerializeYaml { source: err })),
        EncodeFormat::Toml => toml::to_string_pretty(&Report::from_summary(summary))
            .map_err(|err| AppError::report(ReportError::SerializeToml { source: err })),
        EncodeFormat::Csv => encode_csv(&Report::from_summary(summary)),
        EncodeFormat::Xml => encode_xml(&Report::from_summary(summary)),
    }
}

fn encode_csv(report: &Report) -> AppResult<String> {
    let mut output = String::new();
    let rows = [
        ("Total time spent", report.total_time_spent.clone()),
        ("Total requests", report.total_requests.to_string()),
        ("Issued requests", report.issued_requests.to_string()),
        (
            "Average request time spent",
            report.average_request_time_spent.clone(),
        ),
        (
            "Minimum request time spent",
            report.min_request_time_spent.clone(),
        ),
        (
            "Maximum request time spent",
            report.max_request_time_spent.clone(),
        ),
        ("P50 request time spent", report.p50_request_time_spent.clone()),
        ("P90 request time spent", report.p90_request_time_spent.clone()),
        ("P99 request time spent", report.p99_request_time_spent.clone()),
        ("Requests per second", report.requests_per_second.clone()),
        ("Successful requests", report.successful_requests.to_string()),
        ("Failed requests", report.failed_requests.to_string()),
    ];
    for (key, value) in rows {
        write_line(&mut output, &format!("{},{}", csv_field(key), csv_field(&value)))?;
    }
    for entry in &report.error_distribution {
        write_line(
            &mut output,
            &format!(
                "{},{}",
                csv_field(&format!("Error {}", entry.label)),
                entry.count
            ),
        )?;
    }
    Ok(output)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

fn encode_xml(report: &Report) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    write_line(&mut output, "<Report>")?;
    let elements = [
        ("TotalTimeSpent", report.total_time_spent.clone()),
        ("TotalRequests", report.total_requests.to_string()),
        ("IssuedRequests", report.issued_requests.to_string()),
        (
            "AverageRequestTimeSpent",
            report.average_request_time_spent.clone(),
        ),
        (
            "MinimumRequestTimeSpent",
            report.min_request_time_spent.clone(),
        ),
        (
            "MaximumRequestTimeSpent",
            report.max_request_time_spent.clone(),
        ),
        ("P50RequestTimeSpent", report.p50_request_time_spent.clone()),
        ("P90RequestTimeSpent", report.p90_request_time_spent.clone()),
        ("P99RequestTimeSpent", report.p99_request_time_spent.clone()),
        ("RequestsPerSecond", report.requests_per_second.clone()),
        ("SuccessfulRequests", report.successful_requests.to_string()),
        ("FailedRequests", report.failed_requests.to_string()),
    ];
    for (name, value) in elements {
        write_line(
            &mut output,
            &format!("  <{}>{}</{}>", name, xml_escape(&value), name),
        )?;
    }
    write_line(&mut output, "  <ErrorDistribution>")?;
    for entry in &report.error_distribution {
        write_line(&mut output, "    <Error>")?;
        write_line(&mut output, &format!("      <Code>{}</Code>", entry.code))?;
        write_line(&mut output, &format!("      <Count>{}</Count>", entry.count))?;
        write_line(
            &mut output,
            &format!("      <Label>{}</Label>", xml_escape(&entry.label)),
        )?;
        write_line(&mut output, "    </Error>")?;
    }
    write_line(&mut output, "  </ErrorDistribution>")?;
    write_line(&mut output, "</Report>")?;
    Ok(output)
}

pub(super) fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
