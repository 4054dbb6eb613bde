// src/site/manifest.rs
// =============================================================================
// The site manifest (site.json) as we read it.
//
// Shape we rely on:
//   {
//     "metadata": { "site": { "name": ..., "description": ..., ... } },
//     "items": [ { "title": ..., "slug": ..., "metadata": { ... } }, ... ]
//   }
//
// `metadata.site` and `items` must be present, otherwise the document isn't
// a manifest and parsing fails. Everything inside them is optional: sites in
// the wild leave fields out, use strings for numbers, or put objects where
// we expect text. A missing or odd-looking field reads as empty/absent
// rather than failing the whole manifest.
//
// Rust concepts:
// - serde derive: generates the JSON <-> struct code
// - deserialize_with: plug a custom function in for one field
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Manifest {
    pub metadata: ManifestMetadata,
    pub items: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestMetadata {
    pub site: SiteInfo,
}

// Site-level information shown in the summary block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub theme: String,
    /// Unix epoch seconds
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created: Option<i64>,
    /// Unix epoch seconds
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub updated: Option<i64>,
}

// One content item. Items have no id; their position in `items` is their
// identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::object")]
    pub metadata: Option<ItemMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default, deserialize_with = "lenient::optional_text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unix epoch seconds
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub updated: Option<i64>,
    /// Estimated minutes to read
    #[serde(rename = "readtime", default, deserialize_with = "lenient::minutes")]
    pub read_time: Option<u64>,
}

// Parses a response body into a manifest
pub fn parse_manifest(body: &str) -> Result<Manifest, AnalyzeError> {
    serde_json::from_str(body).map_err(|e| AnalyzeError::ParseFailed(e.to_string()))
}

// Field-level parsers that never fail on a wrong JSON type.
// Each one goes through serde_json::Value and picks what it can use.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    // Anything but a JSON object reads as absent
    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(map @ Value::Object(_)) => serde_json::from_value(map).ok(),
            _ => None,
        })
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional_text(deserializer)?.unwrap_or_default())
    }

    // Strings pass through, numbers are printed, objects contribute their
    // "name" (or "element") field, as a theme object does.
    pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let text = match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Object(map)) => ["name", "element"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        };
        Ok(text.filter(|s| !s.trim().is_empty()))
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Some(Value::String(s)) => parse_number(&s).map(|f| f as i64),
            _ => None,
        })
    }

    pub fn minutes<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let minutes = match value {
            Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().and_then(to_minutes)),
            Some(Value::String(s)) => parse_number(&s).and_then(to_minutes),
            _ => None,
        };
        Ok(minutes)
    }

    fn parse_number(s: &str) -> Option<f64> {
        s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
    }

    fn to_minutes(f: f64) -> Option<u64> {
        (f.is_finite() && f >= 0.0).then(|| f.round() as u64)
    }
}
