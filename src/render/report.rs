// src/render/report.rs
// =============================================================================
// Machine-readable output for --json.
//
// The report is the same information the terminal page shows, already
// formatted: the summary block, and one entry per card with its links.
// =============================================================================

use serde::Serialize;

use super::card::{format_card, CardDisplay};
use super::summary::{format_summary, SummaryDisplay};
use crate::site::{FetchState, SiteFetcher};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<SummaryDisplay>,
    pub cards: Vec<CardDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn from_fetcher(fetcher: &SiteFetcher) -> Self {
        let status = match fetcher.state() {
            FetchState::Idle => ReportStatus::Idle,
            FetchState::Loading { .. } => ReportStatus::Loading,
            FetchState::Loaded { .. } => ReportStatus::Loaded,
            FetchState::Failed { .. } => ReportStatus::Failed,
        };

        Self {
            status,
            manifest_url: fetcher.manifest_url().map(|url| url.to_string()),
            site: fetcher.site_info().map(format_summary),
            cards: fetcher.cards().iter().map(format_card).collect(),
            error: fetcher.error_message().map(str::to_string),
        }
    }
}
