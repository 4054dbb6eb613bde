// src/render/mod.rs
// =============================================================================
// Turning a fetched manifest into something to look at.
//
// Submodules:
// - list: result items -> card view-models
// - card: one card's display strings (dates, read time, links)
// - summary: the site summary block
// - registry: tag name -> component lookup, built once at startup
// - components: the <site-search> and <site-card> terminal components
// - report: the --json output
// =============================================================================

mod card;
mod components;
mod list;
mod registry;
mod report;
mod summary;

pub use components::SEARCH_TAG;
pub use list::{cards_for, CardView};
pub use registry::{ComponentRegistry, Props};
pub use report::Report;
