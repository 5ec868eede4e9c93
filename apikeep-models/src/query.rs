//! Result types produced by the model catalog resolver.
//!
//! A resolution either yields a [`ModelCatalog`] or a [`QueryError`]; the two
//! are never mixed. Failure is never encoded as a sentinel entry in the model list.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a single `resolve_models` call.
pub type ModelQueryResult = std::result::Result<ModelCatalog, QueryError>;

/// Where the models in a catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// Discovered from, or confirmed by, a live vendor call.
    Verified,
    /// Taken from the registry presets without any network call.
    Preset,
    /// The vendor only supports manually typed model names.
    Manual,
}

/// An ordered, deduplicated list of model identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Model identifiers, case preserved.
    pub models: Vec<String>,
    /// Provenance of the list.
    pub source: CatalogSource,
    /// Caller-visible hint (e.g. "enter the model name manually").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ModelCatalog {
    /// Catalog parsed from a listing endpoint: sorted lexicographically and deduplicated.
    pub fn listed(models: impl IntoIterator<Item = String>) -> Self {
        let mut models: Vec<String> = models.into_iter().collect();
        models.sort();
        models.dedup();
        Self {
            models,
            source: CatalogSource::Verified,
            hint: None,
        }
    }

    /// Catalog built from a preset list, keeping its curated order.
    pub fn from_presets(presets: &[String], source: CatalogSource) -> Self {
        let mut seen = HashSet::new();
        let models = presets
            .iter()
            .filter(|m| seen.insert(m.as_str()))
            .cloned()
            .collect();
        Self {
            models,
            source,
            hint: None,
        }
    }

    /// Empty catalog for vendors whose model must be typed by hand.
    pub fn manual(hint: impl Into<String>) -> Self {
        Self {
            models: Vec::new(),
            source: CatalogSource::Manual,
            hint: Some(hint.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// First model, used as the default selection.
    pub fn first(&self) -> Option<&str> {
        self.models.first().map(String::as_str)
    }
}

/// Closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryErrorKind {
    /// No credential supplied for a vendor that needs one.
    MissingCredential,
    /// Vendor is not in the registry.
    UnsupportedVendor,
    /// The vendor rejected the credential (401, 403, or vendor equivalent).
    InvalidCredential,
    /// Any other non-success HTTP status.
    UpstreamUnavailable { status: u16 },
    /// The probe did not complete within the timeout.
    Timeout,
    /// DNS, connection or TLS failure.
    NetworkUnreachable,
    /// The caller cancelled the probe.
    Cancelled,
    /// Unexpected failure inside the probe.
    Internal,
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing credential"),
            Self::UnsupportedVendor => write!(f, "unsupported vendor"),
            Self::InvalidCredential => write!(f, "invalid credential"),
            Self::UpstreamUnavailable { status } => write!(f, "upstream unavailable ({status})"),
            Self::Timeout => write!(f, "timeout"),
            Self::NetworkUnreachable => write!(f, "network unreachable"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Internal => write!(f, "internal error"),
        }
    }
}

/// A resolver failure: its category plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub message: String,
}

impl QueryError {
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::MissingCredential, message)
    }

    pub fn unsupported_vendor(vendor: &str) -> Self {
        Self::new(QueryErrorKind::UnsupportedVendor, vendor)
    }

    pub fn cancelled() -> Self {
        Self::new(QueryErrorKind::Cancelled, "probe cancelled")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Internal, message)
    }

    /// Whether the vendor rejected the credential itself.
    pub fn is_invalid_credential(&self) -> bool {
        self.kind == QueryErrorKind::InvalidCredential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_sorts_and_deduplicates() {
        let catalog = ModelCatalog::listed(vec![
            "whisper-1".to_string(),
            "gpt-4".to_string(),
            "gpt-4".to_string(),
            "GPT-4".to_string(),
        ]);
        assert_eq!(catalog.models, vec!["GPT-4", "gpt-4", "whisper-1"]);
        assert_eq!(catalog.source, CatalogSource::Verified);
        assert!(catalog.hint.is_none());
    }

    #[test]
    fn from_presets_keeps_curated_order() {
        let presets = vec![
            "glm-4".to_string(),
            "glm-3-turbo".to_string(),
            "glm-4".to_string(),
        ];
        let catalog = ModelCatalog::from_presets(&presets, CatalogSource::Preset);
        assert_eq!(catalog.models, vec!["glm-4", "glm-3-turbo"]);
        assert_eq!(catalog.first(), Some("glm-4"));
    }

    #[test]
    fn manual_catalog_carries_hint_not_models() {
        let catalog = ModelCatalog::manual("type it");
        assert!(catalog.is_empty());
        assert_eq!(catalog.source, CatalogSource::Manual);
        assert_eq!(catalog.hint.as_deref(), Some("type it"));
    }

    #[test]
    fn query_error_display_includes_kind_and_message() {
        let err = QueryError::new(
            QueryErrorKind::UpstreamUnavailable { status: 502 },
            "bad gateway",
        );
        assert_eq!(err.to_string(), "upstream unavailable (502): bad gateway");
    }

    #[test]
    fn query_error_kind_serializes_with_tag() {
        let json = serde_json::to_string(&QueryErrorKind::UpstreamUnavailable { status: 500 })
            .unwrap();
        assert_eq!(json, r#"{"kind":"upstream_unavailable","status":500}"#);
    }
}
