use super::*;
use crate::args::parsers::parse_duration_arg;
use crate::error::{AppError, AppResult};
use clap::Parser;
use std::time::Duration;

fn parse_test_args<const N: usize>(argv: [&str; N]) -> AppResult<TestArgs> {
    let args = StresserArgs::try_parse_from(argv)
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;
    let Command::Test(test_args) = args.command;
    Ok(test_args)
}

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["stresser", "test", "--url", "http://localhost"])?;

    if args.url.as_deref() != Some("http://localhost") {
        return Err(AppError::validation("Unexpected url"));
    }
    if args.requests != 100 {
        return Err(AppError::validation(format!(
            "Unexpected default requests: {}",
            args.requests
        )));
    }
    if args.concurrency.get() != 10 {
        return Err(AppError::validation("Unexpected default concurrency"));
    }
    if args.quiet {
        return Err(AppError::validation("Expected quiet to default to false"));
    }
    if args.output != "report.txt" {
        return Err(AppError::validation("Unexpected default output"));
    }
    if args.format != ReportFormat::Stdout {
        return Err(AppError::validation("Unexpected default format"));
    }
    if args.encode.is_some() || args.request_timeout.is_some() {
        return Err(AppError::validation("Expected no encode/timeout by default"));
    }
    Ok(())
}

#[test]
fn parse_args_short_flags() -> AppResult<()> {
    let args = parse_test_args([
        "stresser",
        "test",
        "-u",
        "http://localhost:8080/api",
        "-r",
        "7",
        "-c",
        "3",
        "-q",
        "-o",
        "out",
        "-e",
        "yaml",
        "-f",
        "all",
    ])?;

    if args.requests != 7 || args.concurrency.get() != 3 {
        return Err(AppError::validation("Unexpected requests/concurrency"));
    }
    if !args.quiet {
        return Err(AppError::validation("Expected quiet"));
    }
    if args.output != "out" {
        return Err(AppError::validation("Unexpected output"));
    }
    if args.encode != Some(EncodeFormat::Yaml) {
        return Err(AppError::validation("Expected yaml encoding"));
    }
    if args.format != ReportFormat::All {
        return Err(AppError::validation("Expected all format"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_concurrency() -> AppResult<()> {
    let result = StresserArgs::try_parse_from([
        "stresser",
        "test",
        "--url",
        "http://localhost",
        "--concurrency",
        "0",
    ]);
    if result.is_ok() {
        return Err(AppError::validation("Expected zero concurrency to fail"));
    }
    Ok(())
}

#[test]
fn parse_args_accepts_zero_requests() -> AppResult<()> {
    let args = parse_test_args(["stresser", "test", "-u", "http://localhost", "-r", "0"])?;
    if args.requests != 0 {
        return Err(AppError::validation("Expected zero requests"));
    }
    Ok(())
}

#[test]
fn parse_args_timeout() -> AppResult<()> {
    let args = parse_test_args([
        "stresser",
        "test",
        "-u",
        "http://localhost",
        "--timeout",
        "250ms",
    ])?;
    if args.request_timeout != Some(Duration::from_millis(250)) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    Ok(())
}

#[test]
fn parse_args_requires_subcommand() -> AppResult<()> {
    if StresserArgs::try_parse_from(["stresser", "--url", "http://localhost"]).is_ok() {
        return Err(AppError::validation("Expected missing subcommand to fail"));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> AppResult<()> {
    let cases = [
        ("10", Duration::from_secs(10)),
        ("1500ms", Duration::from_millis(1500)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }
    for bad in ["", "ms", "5x", "0s"] {
        if parse_duration_arg(bad).is_ok() {
            return Err(AppError::validation(format!(
                "Expected '{}' to be rejected",
                bad
            )));
        }
    }
    Ok(())
}

#[test]
fn report_format_flags() -> AppResult<()> {
    if ReportFormat::Stdout.writes_file() || ReportFormat::Stdout.writes_html() {
        return Err(AppError::validation("stdout must not write files"));
    }
    if !ReportFormat::Txt.writes_file() || ReportFormat::Txt.writes_html() {
        return Err(AppError::validation("txt writes only the encoded file"));
    }
    if ReportFormat::Html.writes_file() || !ReportFormat::Html.writes_html() {
        return Err(AppError::validation("html writes only the html file"));
    }
    if !ReportFormat::All.writes_file() || !ReportFormat::All.writes_html() {
        return Err(AppError::validation("all writes both"));
    }
    Ok(())
}
