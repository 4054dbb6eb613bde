// src/render/components.rs
// =============================================================================
// The two terminal components.
//
// <site-search> draws the whole page:
//   heading, the manifest URL being analyzed, the error line (when Failed),
//   the site summary (when Loaded), then one <site-card> per item.
//
// <site-card> draws a single content item.
// =============================================================================

use std::fmt::{self, Write};

use super::card::format_card;
use super::list::CardView;
use super::registry::{Component, ComponentRegistry, Props};
use super::summary::format_summary;
use crate::site::SiteFetcher;

pub const SEARCH_TAG: &str = "site-search";
pub const CARD_TAG: &str = "site-card";

const HEADING: &str = "Analyze Your Site";

pub struct SearchComponent;

impl Component for SearchComponent {
    fn tag(&self) -> &'static str {
        SEARCH_TAG
    }

    fn render(
        &self,
        props: Props<'_>,
        registry: &ComponentRegistry,
        out: &mut String,
    ) -> fmt::Result {
        let Props::Search(fetcher) = props else {
            return Ok(());
        };

        writeln!(out, "{}", HEADING)?;
        writeln!(out, "{}", "=".repeat(HEADING.len()))?;

        if let Some(url) = fetcher.manifest_url() {
            writeln!(out, "🔍 Manifest: {}", url)?;
        }
        if fetcher.is_loading() {
            writeln!(out, "⏳ Analyzing...")?;
        }
        if let Some(message) = fetcher.error_message() {
            writeln!(out, "❌ {}", message)?;
        }

        render_summary(fetcher, out)?;

        for card in fetcher.cards() {
            registry.render(CARD_TAG, Props::Card(&card), out)?;
        }

        Ok(())
    }
}

fn render_summary(fetcher: &SiteFetcher, out: &mut String) -> fmt::Result {
    let Some(site) = fetcher.site_info() else {
        return Ok(());
    };
    let summary = format_summary(site);

    writeln!(out)?;
    writeln!(out, "📘 {}", summary.name)?;
    if !summary.description.is_empty() {
        writeln!(out, "   {}", summary.description)?;
    }
    writeln!(out, "   Theme: {}", summary.theme)?;
    writeln!(out, "   Created: {}", summary.created)?;
    writeln!(out, "   Last Updated: {}", summary.updated)?;

    let count = fetcher.cards().len();
    writeln!(out, "   📄 {} item(s)", count)
}

pub struct CardComponent;

impl Component for CardComponent {
    fn tag(&self) -> &'static str {
        CARD_TAG
    }

    fn render(
        &self,
        props: Props<'_>,
        _registry: &ComponentRegistry,
        out: &mut String,
    ) -> fmt::Result {
        let Props::Card(card) = props else {
            return Ok(());
        };
        render_card(card, out)
    }
}

fn render_card(card: &CardView, out: &mut String) -> fmt::Result {
    let display = format_card(card);

    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(out, "{}", display.title)?;
    if let Some(image) = &display.image {
        writeln!(out, "   🖼  {}", image)?;
    }
    if !display.description.is_empty() {
        writeln!(out, "   {}", display.description)?;
    }
    writeln!(out, "   Updated: {}", display.updated)?;
    if !display.read_time.is_empty() {
        writeln!(out, "   Read time: {} minute(s)", display.read_time)?;
    }
    for link in [&display.content_link, &display.source_link] {
        writeln!(out, "   {}: {} ({})", link.label, link.href, link.target.hint())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{parse_manifest, ItemMetadata};

    fn render_page(fetcher: &SiteFetcher) -> String {
        let registry = ComponentRegistry::with_defaults().unwrap();
        let mut out = String::new();
        registry
            .render(SEARCH_TAG, Props::Search(fetcher), &mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_loaded_page_shows_summary_and_cards() {
        let mut fetcher = SiteFetcher::new();
        let pending = fetcher.begin("example.com").unwrap();
        let manifest = parse_manifest(
            r#"{"metadata":{"site":{"name":"Docs","theme":"clean-one","created":0}},
                "items":[{"title":"Intro","slug":"intro","metadata":{"readtime":3}},
                         {"title":"Usage","slug":"usage"}]}"#,
        );
        fetcher.complete(pending.seq, manifest);

        let page = render_page(&fetcher);

        assert!(page.starts_with("Analyze Your Site\n"));
        assert!(page.contains("Manifest: https://example.com/site.json"));
        assert!(page.contains("📘 Docs"));
        assert!(page.contains("Theme: clean-one"));
        assert!(page.contains("Created: 1970-01-01 00:00:00 UTC"));
        assert!(page.contains("2 item(s)"));
        assert!(page.contains("View Content: https://example.com/intro"));
        assert!(page.contains("Read time: 3 minute(s)"));
        assert_eq!(page.matches("Read time:").count(), 1);
        assert!(page.find("Intro").unwrap() < page.find("Usage").unwrap());
    }

    #[test]
    fn test_failed_page_shows_only_error() {
        let mut fetcher = SiteFetcher::new();
        fetcher.begin("not a url at all://###");

        let page = render_page(&fetcher);

        assert!(page.contains("❌ Invalid URL. Please provide a valid site URL."));
        assert!(!page.contains("Manifest:"));
        assert!(!page.contains("View Content"));
    }

    #[test]
    fn test_card_without_image_has_no_image_line() {
        let card = CardView {
            title: "Plain".to_string(),
            description: String::new(),
            content_url: "https://example.com/plain".to_string(),
            source_url: "https://example.com/plain.html".to_string(),
            metadata: ItemMetadata::default(),
        };
        let mut out = String::new();

        render_card(&card, &mut out).unwrap();

        assert!(!out.contains("🖼"));
        assert!(out.contains("Updated: \n"));
        assert!(out.contains("View Source: https://example.com/plain.html (opens in a new window)"));
    }

    #[test]
    fn test_card_component_ignores_search_props() {
        let registry = ComponentRegistry::new();
        let fetcher = SiteFetcher::new();
        let mut out = String::new();

        CardComponent
            .render(Props::Search(&fetcher), &registry, &mut out)
            .unwrap();

        assert!(out.is_empty());
    }
}
