use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, TestArgs};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not given on the
/// command line.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut TestArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "quiet")
        && let Some(quiet) = config.quiet
    {
        args.quiet = quiet;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = output;
    }

    if !is_cli(matches, "encode")
        && let Some(encode) = config.encode
    {
        args.encode = Some(encode);
    }

    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = format;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = Some(timeout.to_duration()?);
    }

    if !is_cli(matches, "timestamp")
        && let Some(timestamp) = config.timestamp
    {
        args.timestamp = timestamp;
    }

    Ok(())
}

/// Environment values count as explicit, so only defaults get overridden.
fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
