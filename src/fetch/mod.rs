//! Loading raw source bytes from HTTP endpoints or the local filesystem.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

/// Issues a GET for `url` through `client` and returns the response body.
///
/// # Errors
///
/// Returns an error if the URL does not parse, the request fails, or the
/// server answers with a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("GET {url} answered with status {status}");
    }

    Ok(resp.bytes().await?.to_vec())
}

/// Loads a source from a URL (anything starting with `http`) or a file path.
#[tracing::instrument(skip(client))]
pub async fn load_bytes<C: HttpClient>(client: &C, location: &str) -> Result<Vec<u8>> {
    let bytes = if location.starts_with("http") {
        info!("Downloading source");
        fetch_bytes(client, location)
            .await
            .with_context(|| format!("failed to download {location}"))?
    } else {
        std::fs::read(location).with_context(|| format!("failed to read {location}"))?
    };

    debug!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}
