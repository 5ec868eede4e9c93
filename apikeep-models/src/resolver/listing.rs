//! Parsing of vendor models-listing responses.

use serde::Deserialize;

use crate::registry::{ListingProbe, ListingShape};

/// `{"data": [{"id": "..."}]}` (OpenAI, Groq, DeepSeek, Azure).
#[derive(Debug, Deserialize)]
struct DataIdsBody {
    #[serde(default)]
    data: Vec<DataEntry>,
}

#[derive(Debug, Deserialize)]
struct DataEntry {
    #[serde(default)]
    id: serde_json::Value,
}

/// `{"models": [{"name": "..."}]}` (Google, Cohere).
#[derive(Debug, Deserialize)]
struct ModelNamesBody {
    #[serde(default)]
    models: Vec<NameEntry>,
}

#[derive(Debug, Deserialize)]
struct NameEntry {
    #[serde(default)]
    name: serde_json::Value,
}

/// Entries whose identifier is null or not a string are skipped.
fn text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

/// Extract model identifiers from a listing body, applying the prefix rule and
/// the allow-list. Ordering and deduplication are left to the caller.
pub(crate) fn parse_listing(probe: &ListingProbe, body: &str) -> serde_json::Result<Vec<String>> {
    let names: Vec<String> = match &probe.shape {
        ListingShape::DataIds => serde_json::from_str::<DataIdsBody>(body)?
            .data
            .into_iter()
            .filter_map(|e| text(e.id))
            .collect(),
        ListingShape::ModelNames { strip_prefix } => {
            let names = serde_json::from_str::<ModelNamesBody>(body)?
                .models
                .into_iter()
                .filter_map(|e| text(e.name));
            match strip_prefix {
                Some(prefix) => names
                    .filter_map(|name| name.strip_prefix(prefix.as_str()).map(str::to_string))
                    .collect(),
                None => names.collect(),
            }
        }
    };

    Ok(names
        .into_iter()
        .filter(|name| !name.is_empty() && probe.allows(name))
        .collect())
}
