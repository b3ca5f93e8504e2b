use reqwest::{Client, Request};
use url::Url;

use crate::{
    args::DEFAULT_USER_AGENT,
    config::RunConfig,
    error::{AppError, AppResult, HttpError},
};

/// Builds the single client shared by every worker of a run.
///
/// # Errors
///
/// Returns an error when the underlying TLS backend or connector cannot be
/// initialized.
pub fn build_client(config: &RunConfig) -> AppResult<Client> {
    let mut client_builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
    if let Some(timeout) = config.request_timeout() {
        client_builder = client_builder.timeout(timeout);
    }

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Builds the GET request for `url` once, so a bad target is rejected before
/// any worker starts.
pub(super) fn build_get_request(client: &Client, url: &Url) -> AppResult<Request> {
    client.get(url.clone()).build().map_err(|err| {
        AppError::http(HttpError::BuildRequestFailed {
            url: url.to_string(),
            source: err,
        })
    })
}
