// src/error.rs
// =============================================================================
// Error types for the analyzer.
//
// Every failure while analyzing a site falls into one of three buckets:
// - InvalidUrl: what the user typed can't be turned into a manifest URL
// - RequestFailed: the server answered with a non-2xx status, or we never
//   got an answer at all (DNS, TLS, timeout, ...)
// - ParseFailed: we got a body, but it isn't a site manifest
//
// The fetcher turns any of these into a single message string for display,
// so the Display text below is what the user actually reads.
//
// Rust concepts:
// - thiserror: derive macro that writes the std::error::Error impl for us
// =============================================================================

use thiserror::Error;

// Message shown when the resolver rejects the input
pub const INVALID_URL_MESSAGE: &str = "Invalid URL. Please provide a valid site URL.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The raw input could not be turned into a manifest URL
    #[error("{}", INVALID_URL_MESSAGE)]
    InvalidUrl,

    /// Non-success HTTP status or transport failure
    #[error("Failed to load site data: {0}")]
    RequestFailed(String),

    /// The response body was not a site manifest
    #[error("Failed to read site data: {0}")]
    ParseFailed(String),
}

// Errors from the component registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a component is already registered under '{0}'")]
    Duplicate(String),
}
