//! HTTP page fetcher
//!
//! This module handles all outbound GETs made by the probers:
//! - Building HTTP clients with the fixed desktop-browser User-Agent
//! - Following redirects
//! - Bounding every request with a timeout
//! - Classifying failures into `FetchError`

use crate::{FetchError, FetchResult};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Desktop browser User-Agent; many catalog front ends reject unidentified clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

const MAX_REDIRECTS: usize = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,
    /// Page body
    pub body: String,
}

/// Performs GET requests with a fixed identifying header set
///
/// Never retries; one failed request is one `FetchError`.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Builds a fetcher
    ///
    /// # Arguments
    ///
    /// * `user_agent` - The User-Agent header sent with every request
    /// * `timeout` - Upper bound on each whole request, redirects included
    ///
    /// # Returns
    ///
    /// * `Ok(PageFetcher)` - Successfully built HTTP client
    /// * `Err(reqwest::Error)` - Failed to build client
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches a URL and returns its body
    ///
    /// # Error Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 4xx / 5xx status | `FetchError::Status` |
    /// | Timeout | `FetchError::Timeout` |
    /// | Malformed URL, DNS, connection, TLS, redirect limit, body read | `FetchError::Network` |
    pub async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Links on the page are relative to where the redirects ended
        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| classify(url, e))?;

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}

fn classify(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
