// src/site/fetcher.rs
// =============================================================================
// The site fetcher: owns the Idle/Loading/Loaded/Failed state for one
// analysis session.
//
// How it works:
// 1. `begin` resolves the raw input and, if it's good, moves to Loading and
//    hands out a PendingRequest tagged with a fresh sequence number
// 2. Whoever runs the request calls `complete` with that number and the
//    outcome
// 3. Only the latest sequence number is allowed to change the state, so a
//    slow, older response can never overwrite a newer one
//
// `analyze` glues the two together for the common case of one request at a
// time. Tests drive `begin`/`complete` directly to control ordering.
// =============================================================================

use log::{debug, info, warn};

use super::http::ManifestSource;
use super::manifest::{Manifest, ResultItem, SiteInfo};
use super::resolve::{resolve_manifest_url, ManifestUrl};
use crate::error::AnalyzeError;
use crate::render::{cards_for, CardView};

// Exactly one of these holds at any time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading {
        seq: u64,
        url: ManifestUrl,
    },
    Loaded {
        site: SiteInfo,
        results: Vec<ResultItem>,
        /// Content root that item slugs and locations are appended to
        base_url: String,
    },
    Failed {
        message: String,
    },
}

// A request the caller still has to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub seq: u64,
    pub url: ManifestUrl,
}

#[derive(Debug, Default)]
pub struct SiteFetcher {
    state: FetchState,
    latest_seq: u64,
    manifest_url: Option<ManifestUrl>,
}

impl SiteFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // Runs one full analysis: resolve, fetch, apply.
    //
    // Returns the state after the attempt. Errors never escape; they end up
    // as FetchState::Failed.
    pub async fn analyze(&mut self, raw: &str, source: &dyn ManifestSource) -> &FetchState {
        let Some(request) = self.begin(raw) else {
            return &self.state;
        };

        info!("Fetching manifest {} (request #{})", request.url, request.seq);
        let outcome = source.fetch_manifest(&request.url).await;
        self.complete(request.seq, outcome);

        &self.state
    }

    // Starts a new analysis. Any request still in flight becomes stale,
    // even when this input turns out to be invalid.
    pub fn begin(&mut self, raw: &str) -> Option<PendingRequest> {
        self.latest_seq += 1;
        let seq = self.latest_seq;

        match resolve_manifest_url(raw) {
            Ok(url) => {
                self.manifest_url = Some(url.clone());
                self.state = FetchState::Loading {
                    seq,
                    url: url.clone(),
                };
                Some(PendingRequest { seq, url })
            }
            Err(err) => {
                warn!("Rejected site URL {:?}", raw.trim());
                self.manifest_url = None;
                self.state = FetchState::Failed {
                    message: err.to_string(),
                };
                None
            }
        }
    }

    // Applies the outcome of request `seq`.
    //
    // Returns false (and changes nothing) if `seq` isn't the latest request.
    pub fn complete(&mut self, seq: u64, outcome: Result<Manifest, AnalyzeError>) -> bool {
        if seq != self.latest_seq {
            debug!(
                "Dropping stale response for request #{} (latest is #{})",
                seq, self.latest_seq
            );
            return false;
        }

        let base_url = match &self.state {
            FetchState::Loading { seq: loading, url } if *loading == seq => url.base_url(),
            _ => {
                debug!("Request #{} already settled", seq);
                return false;
            }
        };

        self.state = match outcome {
            Ok(manifest) => {
                info!(
                    "Loaded site {:?} with {} item(s)",
                    manifest.metadata.site.name,
                    manifest.items.len()
                );
                FetchState::Loaded {
                    site: manifest.metadata.site,
                    results: manifest.items,
                    base_url,
                }
            }
            Err(err) => {
                warn!("Request #{} failed: {}", seq, err);
                FetchState::Failed {
                    message: err.to_string(),
                }
            }
        };

        true
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading { .. })
    }

    // The last successfully resolved manifest URL, if the last input was valid
    pub fn manifest_url(&self) -> Option<&ManifestUrl> {
        self.manifest_url.as_ref()
    }

    pub fn site_info(&self) -> Option<&SiteInfo> {
        match &self.state {
            FetchState::Loaded { site, .. } => Some(site),
            _ => None,
        }
    }

    // One card per loaded item, in manifest order; empty unless Loaded
    pub fn cards(&self) -> Vec<CardView> {
        cards_for(&self.state)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INVALID_URL_MESSAGE;
    use crate::logging;
    use crate::site::http::{FetchSettings, ManifestClient};
    use crate::site::manifest::parse_manifest;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Returns the same canned outcome for every URL and counts calls
    struct FakeSource {
        outcome: Result<Manifest, AnalyzeError>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(outcome: Result<Manifest, AnalyzeError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn body(body: &str) -> Self {
            Self::new(parse_manifest(body))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ManifestSource for FakeSource {
        async fn fetch_manifest(&self, _url: &ManifestUrl) -> Result<Manifest, AnalyzeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn site_named(name: &str) -> Manifest {
        parse_manifest(&format!(
            r#"{{"metadata":{{"site":{{"name":"{}"}}}},"items":[]}}"#,
            name
        ))
        .unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let fetcher = SiteFetcher::new();
        assert_eq!(fetcher.state(), &FetchState::Idle);
        assert!(!fetcher.is_loading());
    }

    #[tokio::test]
    async fn test_analyze_loads_site_and_items() {
        logging::initialize_for_tests();
        let source = FakeSource::body(
            r#"{"metadata":{"site":{"name":"X"}},"items":[{"title":"A","slug":"a"}]}"#,
        );
        let mut fetcher = SiteFetcher::new();

        fetcher.analyze("example.com/docs", &source).await;

        assert_eq!(fetcher.site_info().map(|s| s.name.as_str()), Some("X"));
        let cards = fetcher.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "A");
        assert_eq!(cards[0].content_url, "https://example.com/docs/a");
        assert_eq!(fetcher.error_message(), None);
        assert!(!fetcher.is_loading());
    }

    #[tokio::test]
    async fn test_empty_items_is_loaded_without_error() {
        let source = FakeSource::body(r#"{"metadata":{"site":{"name":"X"}},"items":[]}"#);
        let mut fetcher = SiteFetcher::new();

        fetcher.analyze("example.com", &source).await;

        assert!(matches!(fetcher.state(), FetchState::Loaded { .. }));
        assert!(fetcher.cards().is_empty());
        assert_eq!(fetcher.error_message(), None);
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_request() {
        let source = FakeSource::body(r#"{"metadata":{"site":{}},"items":[]}"#);
        let mut fetcher = SiteFetcher::new();

        fetcher.analyze("not a url at all://###", &source).await;

        assert_eq!(fetcher.error_message(), Some(INVALID_URL_MESSAGE));
        assert_eq!(fetcher.manifest_url(), None);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_request_failure_leaves_loading() {
        let source = FakeSource::new(Err(AnalyzeError::RequestFailed("HTTP 500".to_string())));
        let mut fetcher = SiteFetcher::new();

        fetcher.analyze("example.com", &source).await;

        let message = fetcher.error_message().unwrap();
        assert!(!message.is_empty());
        assert!(!fetcher.is_loading());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_non_2xx_from_server_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/site.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let client = ManifestClient::new(&FetchSettings::default()).unwrap();
        let mut fetcher = SiteFetcher::new();

        fetcher.analyze(&server.uri(), &client).await;

        assert_eq!(
            fetcher.error_message(),
            Some("Failed to load site data: HTTP 503 Service Unavailable")
        );
        assert!(!fetcher.is_loading());
    }

    #[tokio::test]
    async fn test_new_analysis_clears_previous_result() {
        let mut fetcher = SiteFetcher::new();
        fetcher
            .analyze("example.com", &FakeSource::new(Ok(site_named("Old"))))
            .await;
        assert!(fetcher.site_info().is_some());

        let pending = fetcher.begin("example.org").unwrap();

        assert!(fetcher.is_loading());
        assert_eq!(fetcher.site_info(), None);
        assert_eq!(fetcher.error_message(), None);
        assert_eq!(pending.url.as_str(), "https://example.org/site.json");
    }

    #[test]
    fn test_only_latest_request_updates_state() {
        let mut fetcher = SiteFetcher::new();
        let first = fetcher.begin("first.example.com").unwrap();
        let second = fetcher.begin("second.example.com").unwrap();
        assert!(second.seq > first.seq);

        // The older response arrives first and is dropped
        assert!(!fetcher.complete(first.seq, Ok(site_named("First"))));
        assert!(fetcher.is_loading());

        assert!(fetcher.complete(second.seq, Ok(site_named("Second"))));
        assert_eq!(fetcher.site_info().map(|s| s.name.as_str()), Some("Second"));
        match fetcher.state() {
            FetchState::Loaded { base_url, .. } => {
                assert_eq!(base_url, "https://second.example.com/")
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn test_late_response_does_not_overwrite_newer_result() {
        let mut fetcher = SiteFetcher::new();
        let first = fetcher.begin("first.example.com").unwrap();
        let second = fetcher.begin("second.example.com").unwrap();

        assert!(fetcher.complete(second.seq, Ok(site_named("Second"))));
        assert!(!fetcher.complete(first.seq, Ok(site_named("First"))));

        assert_eq!(fetcher.site_info().map(|s| s.name.as_str()), Some("Second"));
    }

    #[test]
    fn test_invalid_input_supersedes_pending_request() {
        let mut fetcher = SiteFetcher::new();
        let pending = fetcher.begin("example.com").unwrap();

        assert_eq!(fetcher.begin("not a url at all://###"), None);
        assert!(!fetcher.complete(pending.seq, Ok(site_named("Late"))));

        assert_eq!(fetcher.error_message(), Some(INVALID_URL_MESSAGE));
    }

    #[test]
    fn test_completing_twice_is_ignored() {
        let mut fetcher = SiteFetcher::new();
        let pending = fetcher.begin("example.com").unwrap();

        assert!(fetcher.complete(pending.seq, Ok(site_named("Once"))));
        assert!(!fetcher.complete(
            pending.seq,
            Err(AnalyzeError::RequestFailed("again".to_string()))
        ));
        assert_eq!(fetcher.site_info().map(|s| s.name.as_str()), Some("Once"));
    }
}
