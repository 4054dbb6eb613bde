// src/site/resolve.rs
// =============================================================================
// Turns whatever the user typed into the address of the site's manifest.
//
// Steps:
// 1. Trim the input, and add "https://" if there's no scheme at all
//    (any scheme other than http/https is rejected)
// 2. Parse it with the `url` crate (fail = InvalidUrl, nothing is fetched)
// 3. Make sure the path ends in "site.json", keeping any path prefix
//
// Examples:
//   "example.com"              -> "https://example.com/site.json"
//   "example.com/docs"         -> "https://example.com/docs/site.json"
//   "http://example.com/site.json" -> unchanged
//
// This step never touches the network.
// =============================================================================

use std::fmt;

use url::Url;

use crate::error::AnalyzeError;

// Name of the manifest file every site publishes at its content root
pub const MANIFEST_FILE: &str = "site.json";

const DEFAULT_SCHEME: &str = "https://";

// A URL that is absolute and whose path ends in the manifest file name.
//
// The only way to get one is `resolve_manifest_url`, so holders never need
// to re-check either property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUrl {
    url: Url,
}

impl ManifestUrl {
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    // The content root: the manifest URL without "site.json", query or
    // fragment. For ".../site.json" this ends in '/', so item slugs can be
    // appended directly.
    pub fn base_url(&self) -> String {
        let mut base = self.url.clone();
        let root = self
            .url
            .path()
            .strip_suffix(MANIFEST_FILE)
            .unwrap_or(self.url.path())
            .to_string();
        base.set_path(&root);
        base.set_query(None);
        base.set_fragment(None);
        base.to_string()
    }
}

impl fmt::Display for ManifestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

// Resolves raw user input into a canonical manifest URL
//
// Returns: Err(AnalyzeError::InvalidUrl) if the input can't be parsed or has
// no host. There is no partial result.
pub fn resolve_manifest_url(raw: &str) -> Result<ManifestUrl, AnalyzeError> {
    let trimmed = raw.trim();

    let with_scheme = match scheme_of(trimmed) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => {
            trimmed.to_string()
        }
        Some(_) => return Err(AnalyzeError::InvalidUrl),
        None => format!("{}{}", DEFAULT_SCHEME, trimmed),
    };

    let mut url = Url::parse(&with_scheme).map_err(|_| AnalyzeError::InvalidUrl)?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(AnalyzeError::InvalidUrl);
    }

    if !url.path().ends_with(MANIFEST_FILE) {
        let path = url.path();
        let manifest_path = if path.ends_with('/') {
            format!("{}{}", path, MANIFEST_FILE)
        } else {
            format!("{}/{}", path, MANIFEST_FILE)
        };
        url.set_path(&manifest_path);
    }

    Ok(ManifestUrl { url })
}

// The scheme the user typed, if any: letters/digits/+-. before ":/".
// "example.com:8080/docs" has none (the port isn't followed by '/').
fn scheme_of(input: &str) -> Option<&str> {
    let (scheme, rest) = input.split_once(':')?;
    let looks_like_scheme = scheme
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    (looks_like_scheme && rest.starts_with('/')).then_some(scheme)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a newtype (ManifestUrl) instead of a String?
//    - The type itself says "this was checked"
//    - Functions that take a ManifestUrl can't be handed raw user input
//
// 2. What does map_err do?
//    - Converts the error inside a Result, leaving Ok values alone
//    - Here it swaps url::ParseError for our own AnalyzeError::InvalidUrl
// -----------------------------------------------------------------------------
