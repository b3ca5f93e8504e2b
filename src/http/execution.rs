use std::time::Instant;

use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::metrics::{RequestOutcome, TransportErrorKind};

/// Issues one GET against `url` and classifies the result.
///
/// The latency covers the whole exchange including the drained body; for
/// transport failures it is the time until the failure surfaced. This never
/// fails: every error becomes a [`RequestOutcome`].
pub async fn execute_get(client: &Client, url: &Url) -> RequestOutcome {
    let started = Instant::now();
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(err) => {
            debug!("Request failed: {}", err);
            return RequestOutcome::transport(started.elapsed(), transport_kind(&err));
        }
    };

    let status = response.status().as_u16();
    match drain_response_body(response).await {
        Ok(_) => RequestOutcome::from_status(started.elapsed(), status),
        Err(err) => {
            debug!("Failed to read response body: {}", err);
            RequestOutcome::transport(started.elapsed(), transport_kind(&err))
        }
    }
}

fn transport_kind(err: &reqwest::Error) -> TransportErrorKind {
    if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
