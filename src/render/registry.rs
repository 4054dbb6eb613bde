// src/render/registry.rs
// =============================================================================
// Component registry: maps a tag name ("site-search", "site-card") to the
// component that renders it.
//
// The registry is built once at startup and passed around explicitly.
// Registering a second component under a tag that's already taken is an
// error; the first registration stays in place.
//
// Rust concepts:
// - Trait objects (Box<dyn Component>): different component types stored in
//   one map
// - HashMap entry API: check-and-insert in one lookup
// =============================================================================

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use log::warn;

use super::components::{CardComponent, SearchComponent};
use super::list::CardView;
use crate::error::RegistryError;
use crate::site::SiteFetcher;

// Typed properties handed to a component
#[derive(Debug, Clone, Copy)]
pub enum Props<'a> {
    Search(&'a SiteFetcher),
    Card(&'a CardView),
}

pub trait Component: Send + Sync {
    // Name the component is registered under
    fn tag(&self) -> &'static str;

    // Writes the component's text. Components ignore props meant for
    // another component.
    fn render(&self, props: Props<'_>, registry: &ComponentRegistry, out: &mut String)
        -> fmt::Result;
}

#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<&'static str, Box<dyn Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A registry holding the search and card components
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(Box::new(SearchComponent))?;
        registry.register(Box::new(CardComponent))?;
        Ok(registry)
    }

    pub fn register(&mut self, component: Box<dyn Component>) -> Result<(), RegistryError> {
        match self.components.entry(component.tag()) {
            Entry::Occupied(entry) => Err(RegistryError::Duplicate(entry.key().to_string())),
            Entry::Vacant(entry) => {
                entry.insert(component);
                Ok(())
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<&dyn Component> {
        self.components.get(tag).map(|component| component.as_ref())
    }

    // Renders `tag` into `out`; an unknown tag renders nothing
    pub fn render(&self, tag: &str, props: Props<'_>, out: &mut String) -> fmt::Result {
        match self.get(tag) {
            Some(component) => component.render(props, self, out),
            None => {
                warn!("No component registered for <{}>", tag);
                Ok(())
            }
        }
    }
}
