//! Stored credential records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::ApiKey;
use crate::query::ModelCatalog;

/// A vendor credential together with the settings chosen for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Row id assigned by whatever store persists the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub vendor: String,
    #[serde(with = "secret_serde")]
    pub secret: ApiKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(vendor: impl Into<String>, secret: impl Into<ApiKey>) -> Self {
        Self {
            id: None,
            vendor: vendor.into(),
            secret: secret.into(),
            endpoint: None,
            model: None,
            notes: None,
            example_code: None,
            created_at: Utc::now(),
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = non_blank(endpoint.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = non_blank(model.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = non_blank(notes.into());
        self
    }

    pub fn example_code(mut self, code: impl Into<String>) -> Self {
        self.example_code = non_blank(code.into());
        self
    }

    /// Select the catalog's first model if none is chosen yet.
    ///
    /// Returns whether the model changed.
    pub fn apply_catalog(&mut self, catalog: &ModelCatalog) -> bool {
        if self.model.is_some() {
            return false;
        }
        match catalog.first() {
            Some(first) => {
                self.model = Some(first.to_string());
                true
            }
            None => false,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

mod secret_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::auth::ApiKey;

    pub fn serialize<S: Serializer>(key: &ApiKey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(key.expose_secret())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ApiKey, D::Error> {
        String::deserialize(deserializer).map(ApiKey::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CatalogSource;

    #[test]
    fn builder_trims_and_drops_blank_fields() {
        let record = CredentialRecord::new("OpenAI", "sk-1")
            .endpoint(" https://api.openai.com/v1 ")
            .notes("   ")
            .model("gpt-4o");
        assert_eq!(record.endpoint.as_deref(), Some("https://api.openai.com/v1"));
        assert_eq!(record.notes, None);
        assert_eq!(record.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn apply_catalog_only_fills_missing_model() {
        let catalog = ModelCatalog::from_presets(
            &["deepseek-chat".to_string(), "deepseek-coder".to_string()],
            CatalogSource::Preset,
        );

        let mut record = CredentialRecord::new("DeepSeek", "sk");
        assert!(record.apply_catalog(&catalog));
        assert_eq!(record.model.as_deref(), Some("deepseek-chat"));

        let mut chosen = CredentialRecord::new("DeepSeek", "sk").model("deepseek-coder");
        assert!(!chosen.apply_catalog(&catalog));
        assert_eq!(chosen.model.as_deref(), Some("deepseek-coder"));
    }

    #[test]
    fn apply_empty_catalog_is_noop() {
        let mut record = CredentialRecord::new("自定义", "k");
        assert!(!record.apply_catalog(&ModelCatalog::manual("type it")));
        assert!(record.model.is_none());
    }

    #[test]
    fn debug_hides_secret_but_json_keeps_it() {
        let record = CredentialRecord::new("Groq", "gsk-secret");
        assert!(!format!("{record:?}").contains("gsk-secret"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["secret"], "gsk-secret");
        assert!(json.get("endpoint").is_none());
        assert!(json.get("id").is_none());

        let back: CredentialRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.secret.expose_secret(), "gsk-secret");
        assert_eq!(back.created_at, record.created_at);
    }
}
