//! HTTP fetching and subscription blob decoding.
//!
//! The HTTP side sits behind the [`HttpFetch`] trait so the pipeline can be
//! tested with canned responses. One GET, no retry: the tool is invoked
//! interactively and a failed fetch is reported to the operator as-is.

use base64::Engine as _;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::TproxyError;
use crate::link::{decode_link, ServerDescriptor, BASE64};

#[cfg(test)]
use mockall::automock;

/// Trait for HTTP text fetches, allowing dependency injection for testing.
#[cfg_attr(test, automock)]
pub trait HttpFetch: Send + Sync {
    /// Issue a blocking GET and return the response body.
    ///
    /// A transport failure or non-success status is a
    /// [`TproxyError::Network`].
    fn get_text(&self, url: &str) -> Result<String, TproxyError>;
}

/// Real fetcher backed by a blocking reqwest client.
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, TproxyError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("tproxyctl/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TproxyError::Network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetcher {
    fn get_text(&self, url: &str) -> Result<String, TproxyError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TproxyError::Network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TproxyError::Network(format!("HTTP {} from {}", status, url)));
        }

        response
            .text()
            .map_err(|e| TproxyError::Network(format!("failed to read body from {}: {}", url, e)))
    }
}

/// Fetch the subscription blob recorded in the client config and decode it
/// into the ordered server list.
pub fn fetch_servers(
    fetcher: &dyn HttpFetch,
    config: &ClientConfig,
) -> Result<Vec<ServerDescriptor>, TproxyError> {
    info!("Fetching subscription from {}", config.subscribe);
    let body = fetcher.get_text(&config.subscribe)?;
    decode_subscription(&body)
}

/// Decode a base64 subscription blob into server descriptors, one per link
/// line. A single malformed line fails the whole decode; a partially decoded
/// server list is never returned.
pub fn decode_subscription(blob: &str) -> Result<Vec<ServerDescriptor>, TproxyError> {
    let decoded = BASE64
        .decode(blob.trim())
        .map_err(|e| TproxyError::MalformedLink(format!("invalid base64 subscription: {}", e)))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| TproxyError::MalformedLink("subscription is not UTF-8".to_string()))?;

    let servers: Vec<ServerDescriptor> = decoded
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .map(decode_link)
        .collect::<Result<_, _>>()?;

    debug!("Decoded {} link line(s)", servers.len());
    Ok(servers)
}
