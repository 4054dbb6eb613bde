// src/render/list.rs
// =============================================================================
// Maps the manifest's item list into card view-models.
//
// One card per item, in manifest order. Nothing is sorted, merged or
// dropped; an empty list just means no cards.
// =============================================================================

use serde::Serialize;

use crate::site::{FetchState, ItemMetadata, ResultItem};

// Everything a card needs, with links already made absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub title: String,
    pub description: String,
    /// base URL + slug
    pub content_url: String,
    /// base URL + location
    pub source_url: String,
    pub metadata: ItemMetadata,
}

pub fn card_views(results: &[ResultItem], base_url: &str) -> Vec<CardView> {
    results
        .iter()
        .map(|item| CardView {
            title: item.title.clone(),
            description: item.description.clone(),
            content_url: join_url(base_url, &item.slug),
            source_url: join_url(base_url, &item.location),
            metadata: item.metadata.clone().unwrap_or_default(),
        })
        .collect()
}

// Cards for whatever the fetcher currently holds (none unless Loaded)
pub fn cards_for(state: &FetchState) -> Vec<CardView> {
    match state {
        FetchState::Loaded {
            results, base_url, ..
        } => card_views(results, base_url),
        _ => Vec::new(),
    }
}

// `base` usually ends in '/', so a leading '/' on the tail would double it
fn join_url(base: &str, tail: &str) -> String {
    format!("{}{}", base, tail.trim_start_matches('/'))
}
