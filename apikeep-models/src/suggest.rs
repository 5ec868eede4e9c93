//! Caller-side policy for turning a resolution into something to show.
//!
//! The resolver never substitutes presets for a failed probe. Front ends that
//! want a fallback use [`ModelSuggestions`], which keeps a verified list and a
//! degraded preset suggestion visibly distinct.

use crate::query::{CatalogSource, ModelQueryResult, QueryError, QueryErrorKind};
use crate::registry::VendorRegistry;

/// Endpoint and presets to prefill when a vendor is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorDefaults {
    pub endpoint: String,
    pub presets: Vec<String>,
    pub manual_entry: bool,
}

impl VendorDefaults {
    /// Defaults for a vendor; `None` when it is not registered.
    pub fn for_vendor(registry: &VendorRegistry, vendor: &str) -> Option<Self> {
        let profile = registry.profile(vendor)?;
        Some(Self {
            endpoint: profile.default_endpoint.clone(),
            presets: profile.preset_models.clone(),
            manual_entry: profile.is_manual_entry(),
        })
    }

    /// Model to preselect.
    pub fn default_model(&self) -> Option<&str> {
        self.presets.first().map(String::as_str)
    }
}

/// What to offer the user after a resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSuggestions {
    /// The vendor confirmed these models.
    Verified(Vec<String>),
    /// Presets for a vendor that offers no live check. Unverified but expected.
    Preset(Vec<String>),
    /// Presets offered because the probe did not produce a usable list.
    Degraded { presets: Vec<String>, reason: String },
    /// The model must be typed by hand.
    Manual { hint: String },
    /// Nothing to offer.
    Unavailable(QueryError),
}

impl ModelSuggestions {
    pub fn from_result(registry: &VendorRegistry, vendor: &str, result: &ModelQueryResult) -> Self {
        let presets = registry.presets(vendor).to_vec();

        match result {
            Ok(catalog) if catalog.source == CatalogSource::Manual => Self::Manual {
                hint: catalog.hint.clone().unwrap_or_default(),
            },
            Ok(catalog) if catalog.source == CatalogSource::Preset && !catalog.is_empty() => {
                Self::Preset(catalog.models.clone())
            }
            Ok(catalog) if !catalog.is_empty() => Self::Verified(catalog.models.clone()),
            Ok(_) if presets.is_empty() => Self::Unavailable(QueryError::new(
                QueryErrorKind::Internal,
                "no models returned",
            )),
            Ok(_) => Self::Degraded {
                presets,
                reason: "no models returned".to_string(),
            },
            Err(err) if err.kind == QueryErrorKind::InvalidCredential && !presets.is_empty() => {
                Self::Degraded {
                    presets,
                    reason: err.to_string(),
                }
            }
            Err(err) => Self::Unavailable(err.clone()),
        }
    }

    /// Models to list, verified or not.
    pub fn models(&self) -> &[String] {
        match self {
            Self::Verified(models) | Self::Preset(models) => models,
            Self::Degraded { presets, .. } => presets,
            Self::Manual { .. } | Self::Unavailable(_) => &[],
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ModelCatalog;
    use crate::registry::CUSTOM_VENDOR;

    #[test]
    fn defaults_for_known_vendor() {
        let registry = VendorRegistry::builtin();
        let defaults = VendorDefaults::for_vendor(&registry, "DeepSeek").unwrap();
        assert_eq!(defaults.endpoint, "https://api.deepseek.com/v1");
        assert_eq!(defaults.default_model(), Some("deepseek-chat"));
        assert!(!defaults.manual_entry);
    }

    #[test]
    fn defaults_for_custom_vendor_are_empty() {
        let registry = VendorRegistry::builtin();
        let defaults = VendorDefaults::for_vendor(&registry, CUSTOM_VENDOR).unwrap();
        assert!(defaults.endpoint.is_empty());
        assert!(defaults.presets.is_empty());
        assert!(defaults.manual_entry);
        assert!(VendorDefaults::for_vendor(&registry, "Nope").is_none());
    }

    #[test]
    fn verified_list_passes_through() {
        let registry = VendorRegistry::builtin();
        let result = Ok(ModelCatalog::listed(vec!["gpt-4o".to_string()]));
        let suggestions = ModelSuggestions::from_result(&registry, "OpenAI", &result);
        assert!(suggestions.is_verified());
        assert_eq!(suggestions.models(), ["gpt-4o".to_string()]);
    }

    #[test]
    fn static_presets_are_not_verified() {
        let registry = VendorRegistry::builtin();
        let result = Ok(ModelCatalog::from_presets(
            registry.presets("Moonshot"),
            CatalogSource::Preset,
        ));
        let suggestions = ModelSuggestions::from_result(&registry, "Moonshot", &result);
        assert!(matches!(suggestions, ModelSuggestions::Preset(_)));
        assert!(!suggestions.is_verified());
        assert_eq!(suggestions.models(), registry.presets("Moonshot"));
    }

    #[test]
    fn empty_listing_degrades_to_presets() {
        let registry = VendorRegistry::builtin();
        let result = Ok(ModelCatalog::listed(Vec::new()));
        let suggestions = ModelSuggestions::from_result(&registry, "Groq", &result);
        let ModelSuggestions::Degraded { presets, reason } = &suggestions else {
            panic!("expected degraded, got {suggestions:?}");
        };
        assert_eq!(presets.as_slice(), registry.presets("Groq"));
        assert_eq!(reason, "no models returned");
        assert!(!suggestions.is_verified());
    }

    #[test]
    fn invalid_credential_degrades_with_reason() {
        let registry = VendorRegistry::builtin();
        let result = Err(QueryError::new(
            QueryErrorKind::InvalidCredential,
            "OpenAI rejected the API key (HTTP 401)",
        ));
        let suggestions = ModelSuggestions::from_result(&registry, "OpenAI", &result);
        let ModelSuggestions::Degraded { reason, .. } = suggestions else {
            panic!("expected degraded");
        };
        assert!(reason.contains("invalid credential"));
    }

    #[test]
    fn other_errors_are_unavailable() {
        let registry = VendorRegistry::builtin();
        let result = Err(QueryError::new(QueryErrorKind::Timeout, "slow"));
        let suggestions = ModelSuggestions::from_result(&registry, "OpenAI", &result);
        assert!(matches!(
            &suggestions,
            ModelSuggestions::Unavailable(e) if e.kind == QueryErrorKind::Timeout
        ));
        assert!(suggestions.models().is_empty());
    }

    #[test]
    fn manual_catalog_becomes_manual_suggestion() {
        let registry = VendorRegistry::builtin();
        let result = Ok(ModelCatalog::manual("type it"));
        let suggestions = ModelSuggestions::from_result(&registry, CUSTOM_VENDOR, &result);
        assert_eq!(
            suggestions,
            ModelSuggestions::Manual {
                hint: "type it".to_string()
            }
        );
    }
}
