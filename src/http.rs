//! Shared plumbing for HTTP upstream calls
//!
//! All backends bound their calls with [`bounded`] and classify responses with
//! [`read_json`], so every upstream maps failures onto the same error kinds.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::credentials::UpstreamProvider;
use crate::GasFeeError;

/// Longest upstream body excerpt carried in an error message.
const MAX_BODY_EXCERPT: usize = 256;

/// Build the HTTP client shared by a backend.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Run `fut`, failing with `UpstreamTimeout` once `timeout` elapses.
pub(crate) async fn bounded<T, F>(
    provider: UpstreamProvider,
    timeout: Duration,
    fut: F,
) -> Result<T, GasFeeError>
where
    F: Future<Output = Result<T, GasFeeError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| GasFeeError::timeout(provider, timeout))?
}

/// Classify a transport-level reqwest failure.
pub(crate) fn send_error(
    provider: UpstreamProvider,
    timeout: Duration,
    err: reqwest::Error,
) -> GasFeeError {
    if err.is_timeout() {
        GasFeeError::timeout(provider, timeout)
    } else {
        // Strip the URL: it may carry an API key in the query string
        GasFeeError::unavailable(provider, err.without_url())
    }
}

/// Read a response body as JSON.
///
/// Non-success statuses become `UpstreamRejected`; bodies that do not parse
/// as `T` become `MalformedUpstreamPayload`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: UpstreamProvider,
    timeout: Duration,
    response: reqwest::Response,
) -> Result<T, GasFeeError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| send_error(provider, timeout, e))?;

    if !status.is_success() {
        return Err(GasFeeError::rejected(
            provider,
            format!("HTTP {status}: {}", excerpt(&body)),
        ));
    }

    serde_json::from_str(&body).map_err(|e| GasFeeError::malformed(provider, e.to_string()))
}

/// First [`MAX_BODY_EXCERPT`] characters of `body`, on a char boundary.
pub(crate) fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
