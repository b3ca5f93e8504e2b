use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use super::defaults::{DEFAULT_CONCURRENCY, DEFAULT_OUTPUT, DEFAULT_REQUESTS};
use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::{EncodeFormat, PositiveUsize, ReportFormat};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    arg_required_else_help = true,
    about = "Fixed-concurrency HTTP stress tester: fires N GET requests across C workers and reports latency and error distribution."
)]
pub struct StresserArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Start a stress test against a single URL
    ///
    /// Example: stresser test --url http://localhost:8080/api/v1/test --requests 100 --concurrency 10
    Test(TestArgs),
}

#[derive(Debug, Args, Clone)]
pub struct TestArgs {
    /// Target URL (required here or in the config file)
    #[arg(long, short, env = "STRESSER_URL")]
    pub url: Option<String>,

    /// Total number of requests to issue
    #[arg(long, short = 'r', default_value = DEFAULT_REQUESTS, env = "STRESSER_REQUESTS")]
    pub requests: u64,

    /// Number of concurrent workers
    #[arg(
        long,
        short = 'c',
        default_value = DEFAULT_CONCURRENCY,
        value_parser = parse_positive_usize,
        env = "STRESSER_CONCURRENCY"
    )]
    pub concurrency: PositiveUsize,

    /// Quiet mode (don't print every response status)
    #[arg(long, short)]
    pub quiet: bool,

    /// Output file for the report
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Encoding of the report file (csv, json, toml, yaml, xml, text)
    #[arg(long = "encode", short = 'e', ignore_case = true)]
    pub encode: Option<EncodeFormat>,

    /// Where the report goes (stdout, txt, html, all)
    #[arg(long = "format", short = 'f', default_value = "stdout", ignore_case = true)]
    pub format: ReportFormat,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", value_parser = parse_duration_arg, env = "STRESSER_TIMEOUT")]
    pub request_timeout: Option<Duration>,

    /// Insert a local timestamp into report file names
    #[arg(long)]
    pub timestamp: bool,

    /// Path to config file (TOML or JSON). Defaults to ./stresser.toml or ./stresser.json.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
