// src/site/http.rs
// =============================================================================
// Downloads and parses a site manifest over HTTP.
//
// Key functionality:
// - One GET per manifest, no retries
// - Bounded timeout and redirect limit, so a request always finishes
// - Non-2xx status and transport failures -> RequestFailed
// - A body that isn't a manifest -> ParseFailed
//
// The fetcher only talks to the `ManifestSource` trait, which keeps the
// network out of its tests.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::manifest::{parse_manifest, Manifest};
use super::resolve::ManifestUrl;
use crate::error::AnalyzeError;

// User-Agent sent with every manifest request
pub const USER_AGENT: &str = concat!("site-analyzer/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            redirect_limit: 5,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

// Anything that can hand back a manifest for a manifest URL
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch_manifest(&self, url: &ManifestUrl) -> Result<Manifest, AnalyzeError>;
}

// The real thing: a reqwest client built once and reused
#[derive(Debug, Clone)]
pub struct ManifestClient {
    client: Client,
}

impl ManifestClient {
    pub fn new(settings: &FetchSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ManifestSource for ManifestClient {
    async fn fetch_manifest(&self, url: &ManifestUrl) -> Result<Manifest, AnalyzeError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(describe_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::RequestFailed(format!("HTTP {}", status)));
        }

        // Reading the body can still time out or drop mid-way
        let body = response.text().await.map_err(describe_error)?;

        parse_manifest(&body)
    }
}

// Turns a reqwest error into a RequestFailed with a short reason
fn describe_error(error: reqwest::Error) -> AnalyzeError {
    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };

    AnalyzeError::RequestFailed(reason)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for the manifest source?
//    - The fetcher only needs "give me a manifest for this URL"
//    - Tests hand it a fake that answers instantly, no server needed
//    - #[async_trait] is needed because the trait method is async
//
// 2. Why build the Client once?
//    - A reqwest Client holds a connection pool and TLS setup
//    - Building it per request throws that away
//
// 3. What does .timeout() cover?
//    - The whole request: connect, headers and body
//    - connect_timeout is a tighter limit on just the connect step
// -----------------------------------------------------------------------------
