// src/site/mod.rs
// =============================================================================
// Everything about getting a site's manifest.
//
// Submodules:
// - resolve: raw input -> manifest URL (pure, no network)
// - manifest: the site.json data model and parser
// - http: the reqwest-backed manifest source
// - fetcher: the Idle/Loading/Loaded/Failed state machine
// =============================================================================

mod fetcher;
mod http;
mod manifest;
mod resolve;

pub use fetcher::{FetchState, SiteFetcher};
pub use http::{FetchSettings, ManifestClient};
pub use manifest::{ItemMetadata, ResultItem, SiteInfo};

#[cfg(test)]
pub use manifest::parse_manifest;
