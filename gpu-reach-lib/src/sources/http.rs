//! Plain HTTP plumbing shared by the source adapters.
//!
//! Requests are sent once. A transport failure or a non-success status is a fetch error and
//! is returned to the caller; nothing is retried.

use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};

const LOG_TARGET: &str = "      http";

const USER_AGENT: &str = concat!("gpu-reach/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client shared by all adapters.
pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(30))
        .build()
        .into_app_err("unable to create HTTP client")
}

/// GET `url` and return the response body as text.
pub async fn get_text(client: &reqwest::Client, url: &str) -> Result<String> {
    log::debug!(target: LOG_TARGET, "GET {url}");
    let response = client
        .get(url)
        .send()
        .await
        .into_app_err_with(|| format!("sending HTTP request to {url}"))?;

    read_body(response, url).await
}

/// POST `body` to `url` with the given content type and return the response body as text.
pub async fn post_text(client: &reqwest::Client, url: &str, content_type: &str, body: String) -> Result<String> {
    log::debug!(target: LOG_TARGET, "POST {url} ({} bytes)", body.len());
    let response = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(body)
        .send()
        .await
        .into_app_err_with(|| format!("sending HTTP request to {url}"))?;

    read_body(response, url).await
}

async fn read_body(response: reqwest::Response, url: &str) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        bail!("unexpected HTTP status {status} from {url}");
    }

    response
        .text()
        .await
        .into_app_err_with(|| format!("reading response body from {url}"))
}
