use std::time::Duration;

use url::Url;

use crate::args::{PositiveUsize, TestArgs};
use crate::error::{AppError, AppResult, ValidationError};

/// Immutable input of a single run.
///
/// Built once before the dispatcher starts; a `RunConfig` always holds an
/// absolute http(s) URL with a host and a concurrency of at least one.
#[derive(Debug, Clone)]
pub struct RunConfig {
    url: Url,
    total_requests: u64,
    concurrency: PositiveUsize,
    quiet: bool,
    request_timeout: Option<Duration>,
}

impl RunConfig {
    /// Validates the target URL and builds a run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is empty, unparsable, not http(s), or
    /// has no host.
    pub fn new(
        url: &str,
        total_requests: u64,
        concurrency: PositiveUsize,
        quiet: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            url: parse_target_url(url)?,
            total_requests,
            concurrency,
            quiet,
            request_timeout: None,
        })
    }

    /// Builds the run configuration from merged CLI/config arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid.
    pub fn from_args(args: &TestArgs) -> AppResult<Self> {
        let url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let config = Self::new(url, args.requests, args.concurrency, args.quiet)?
            .with_request_timeout(args.request_timeout);
        Ok(config)
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency.get()
    }

    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.quiet
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

fn parse_target_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidUrl {
        url: trimmed.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(url)
}
