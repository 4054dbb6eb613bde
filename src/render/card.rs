// src/render/card.rs
// =============================================================================
// Formats a single card's fields for display.
//
// - Updated date: Unix seconds -> "Tue, 14 Nov 2023 22:13:20 GMT"
// - Read time: the minutes number as text
// - Image: only when the item has one (no placeholder)
// - Two links, both meant to open in a new browsing context
//
// Missing values never fail; they just render as empty strings.
//
// Rust concepts:
// - chrono: date/time types; DateTime::from_timestamp returns None when the
//   number is out of range instead of panicking
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::list::CardView;

// Same shape HTTP dates use, e.g. "Thu, 01 Jan 1970 00:00:00 GMT"
const CARD_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

// Where a link opens. Card links always leave the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// New tab/window (`target="_blank"` in markup)
    NewContext,
}

impl LinkTarget {
    // Short note printed after the link in the terminal
    pub fn hint(self) -> &'static str {
        match self {
            LinkTarget::NewContext => "opens in a new window",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
    pub target: LinkTarget,
}

impl Link {
    fn external(label: &'static str, href: &str) -> Self {
        Self {
            label,
            href: href.to_string(),
            target: LinkTarget::NewContext,
        }
    }
}

// Display-ready strings for one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDisplay {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub updated: String,
    pub read_time: String,
    pub content_link: Link,
    pub source_link: Link,
}

pub fn format_card(card: &CardView) -> CardDisplay {
    CardDisplay {
        title: card.title.clone(),
        description: card.description.clone(),
        image: card.metadata.image.clone().filter(|url| !url.is_empty()),
        updated: format_card_date(card.metadata.updated),
        read_time: card
            .metadata
            .read_time
            .map(|minutes| minutes.to_string())
            .unwrap_or_default(),
        content_link: Link::external("View Content", &card.content_url),
        source_link: Link::external("View Source", &card.source_url),
    }
}

pub fn format_card_date(timestamp: Option<i64>) -> String {
    format_timestamp(timestamp, CARD_DATE_FORMAT)
}

// Formats Unix seconds as UTC; absent or out-of-range gives ""
pub(crate) fn format_timestamp(timestamp: Option<i64>, format: &str) -> String {
    timestamp
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|date| date.format(format).to_string())
        .unwrap_or_default()
}
