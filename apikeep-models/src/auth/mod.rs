//! Credential management for vendor API keys.
//!
//! Keys live in the system keyring (one entry per vendor, the account being the
//! vendor display name). An optional environment-variable fallback covers CI
//! and headless machines.
//!
//! # Example
//!
//! ```ignore
//! use apikeep_models::auth::CredentialStore;
//!
//! let store = CredentialStore::new("apikeep").with_env_fallback();
//!
//! store.set("OpenAI", "sk-...")?;
//! let key = store.get("OpenAI")?;
//! ```

use std::env;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{Error, Result};

/// Keyring service name used by the CLI.
pub const DEFAULT_SERVICE: &str = "apikeep";

/// A secret API key that prevents accidental logging.
///
/// The key is wrapped in `SecretString`, so `Debug` is redacted and the
/// memory is zeroized on drop.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Expose the secret key value.
    ///
    /// Use sparingly - only when actually sending to an API.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the key is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Environment variable consulted for each vendor.
const ENV_VARS: &[(&str, &str)] = &[
    ("OpenAI", "OPENAI_API_KEY"),
    ("Google", "GOOGLE_API_KEY"),
    ("Anthropic", "ANTHROPIC_API_KEY"),
    ("Cohere", "COHERE_API_KEY"),
    ("Groq", "GROQ_API_KEY"),
    ("DeepSeek", "DEEPSEEK_API_KEY"),
    ("Moonshot", "MOONSHOT_API_KEY"),
    ("智谱AI", "ZHIPUAI_API_KEY"),
    ("阿里通义", "DASHSCOPE_API_KEY"),
    ("Microsoft Azure", "AZURE_OPENAI_API_KEY"),
    ("Hugging Face", "HF_TOKEN"),
    ("Perplexity", "PERPLEXITY_API_KEY"),
    ("Together AI", "TOGETHER_API_KEY"),
];

/// Environment variable name for a vendor, if one is known.
pub fn env_var_for_vendor(vendor: &str) -> Option<&'static str> {
    ENV_VARS
        .iter()
        .find(|(v, _)| *v == vendor)
        .map(|(_, var)| *var)
}

/// Credential storage backed by the system keyring.
///
/// Lookups check the keyring first, then the vendor's environment variable
/// when `env_fallback` is enabled. Writes always go to the keyring; the
/// environment is read-only.
pub struct CredentialStore {
    service_name: String,
    env_fallback: bool,
}

impl CredentialStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            env_fallback: false,
        }
    }

    pub fn with_env_fallback(mut self) -> Self {
        self.env_fallback = true;
        self
    }

    /// Set fallback from configuration.
    pub fn env_fallback(mut self, enabled: bool) -> Self {
        self.env_fallback = enabled;
        self
    }

    /// Get the API key for a vendor.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialsNotFound` if no non-blank key is found.
    pub fn get(&self, vendor: &str) -> Result<ApiKey> {
        if let Some(key) = self.get_from_keyring(vendor) {
            debug!(vendor, "retrieved API key from keyring");
            return Ok(key);
        }

        if self.env_fallback
            && let Some(key) = self.get_from_env(vendor)
        {
            debug!(vendor, "retrieved API key from environment");
            return Ok(key);
        }

        Err(Error::CredentialsNotFound(vendor.to_string()))
    }

    /// Store a key for a vendor in the system keyring.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidApiKey` for a blank key and `Error::Keyring` if
    /// the keyring operation fails.
    pub fn set(&self, vendor: &str, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidApiKey);
        }
        let entry = self.keyring_entry(vendor)?;
        entry
            .set_password(key)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        debug!(vendor, "stored API key in keyring");
        Ok(())
    }

    /// Delete a vendor's key from the system keyring.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialsNotFound` if nothing is stored and
    /// `Error::Keyring` for other keyring failures.
    pub fn delete(&self, vendor: &str) -> Result<()> {
        let entry = self.keyring_entry(vendor)?;
        entry.delete_credential().map_err(|e| match e {
            keyring::Error::NoEntry => Error::CredentialsNotFound(vendor.to_string()),
            _ => Error::Keyring(e.to_string()),
        })?;
        debug!(vendor, "deleted API key from keyring");
        Ok(())
    }

    pub fn has(&self, vendor: &str) -> bool {
        self.get(vendor).is_ok()
    }

    /// Vendors among `candidates` that have a credential, in candidate order.
    ///
    /// The keyring cannot be enumerated, so callers pass the vendor names
    /// they care about (usually the registry's).
    pub fn list_vendors<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        candidates
            .into_iter()
            .filter(|vendor| self.credential_source(vendor).is_some())
            .map(str::to_string)
            .collect()
    }

    pub fn has_in_keyring(&self, vendor: &str) -> bool {
        self.get_from_keyring(vendor).is_some()
    }

    pub fn has_in_env(&self, vendor: &str) -> bool {
        self.get_from_env(vendor).is_some()
    }

    /// Where a vendor's credential would be read from.
    pub fn credential_source(&self, vendor: &str) -> Option<CredentialSource> {
        if self.has_in_keyring(vendor) {
            Some(CredentialSource::Keyring)
        } else if self.env_fallback && self.has_in_env(vendor) {
            Some(CredentialSource::Environment)
        } else {
            None
        }
    }

    fn keyring_entry(&self, vendor: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service_name, vendor).map_err(|e| Error::Keyring(e.to_string()))
    }

    fn get_from_keyring(&self, vendor: &str) -> Option<ApiKey> {
        let entry = self.keyring_entry(vendor).ok()?;
        entry
            .get_password()
            .ok()
            .map(ApiKey::new)
            .filter(|k| !k.is_blank())
    }

    fn get_from_env(&self, vendor: &str) -> Option<ApiKey> {
        let env_var = env_var_for_vendor(vendor)?;
        env::var(env_var)
            .ok()
            .map(ApiKey::new)
            .filter(|k| !k.is_blank())
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

/// Source of a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Keyring,
    Environment,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyring => write!(f, "keyring"),
            Self::Environment => write!(f, "environment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const MISSING_SERVICE: &str = "apikeep-test-nonexistent";

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-secret-key-12345");
        let debug = format!("{:?}", key);
        assert_eq!(debug, "ApiKey([REDACTED])");
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn api_key_blank_detection() {
        assert!(ApiKey::new("").is_blank());
        assert!(ApiKey::new(" \n").is_blank());
        assert!(!ApiKey::new("sk").is_blank());
    }

    #[test]
    fn api_key_from_string() {
        let key: ApiKey = "my-key".into();
        assert_eq!(key.expose_secret(), "my-key");

        let key: ApiKey = String::from("my-key").into();
        assert_eq!(key.expose_secret(), "my-key");
    }

    #[test]
    fn env_var_for_known_vendors() {
        assert_eq!(env_var_for_vendor("OpenAI"), Some("OPENAI_API_KEY"));
        assert_eq!(env_var_for_vendor("DeepSeek"), Some("DEEPSEEK_API_KEY"));
        assert_eq!(
            env_var_for_vendor("Microsoft Azure"),
            Some("AZURE_OPENAI_API_KEY")
        );
        assert_eq!(env_var_for_vendor("openai"), None);
        assert_eq!(env_var_for_vendor("自定义"), None);
    }

    #[test]
    fn set_rejects_blank_key() {
        let store = CredentialStore::new(MISSING_SERVICE);
        assert!(matches!(store.set("OpenAI", "   "), Err(Error::InvalidApiKey)));
    }

    #[test]
    #[serial]
    fn env_fallback_is_used_when_enabled() {
        // SAFETY: serialized with other env-mutating tests
        unsafe { env::set_var("DEEPSEEK_API_KEY", "test-key-from-env") };

        let with = CredentialStore::new(MISSING_SERVICE).with_env_fallback();
        let without = CredentialStore::new(MISSING_SERVICE);
        let found = with.get("DeepSeek");
        let missing = without.get("DeepSeek");
        let source = with.credential_source("DeepSeek");

        // SAFETY: serialized with other env-mutating tests
        unsafe { env::remove_var("DEEPSEEK_API_KEY") };

        assert_eq!(found.unwrap().expose_secret(), "test-key-from-env");
        assert!(matches!(missing, Err(Error::CredentialsNotFound(v)) if v == "DeepSeek"));
        assert_eq!(source, Some(CredentialSource::Environment));
    }

    #[test]
    #[serial]
    fn blank_env_value_counts_as_missing() {
        // SAFETY: serialized with other env-mutating tests
        unsafe { env::set_var("GROQ_API_KEY", "  ") };

        let store = CredentialStore::new(MISSING_SERVICE).with_env_fallback();
        let has = store.has("Groq");

        // SAFETY: serialized with other env-mutating tests
        unsafe { env::remove_var("GROQ_API_KEY") };

        assert!(!has);
    }

    #[test]
    #[serial]
    fn list_vendors_keeps_candidate_order() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            env::set_var("MOONSHOT_API_KEY", "k1");
            env::set_var("COHERE_API_KEY", "k2");
        }

        let store = CredentialStore::new(MISSING_SERVICE).with_env_fallback();
        let vendors = store.list_vendors(["Moonshot", "OpenAI", "Cohere"]);

        // SAFETY: serialized with other env-mutating tests
        unsafe {
            env::remove_var("MOONSHOT_API_KEY");
            env::remove_var("COHERE_API_KEY");
        }

        assert!(vendors.contains(&"Moonshot".to_string()));
        assert!(vendors.contains(&"Cohere".to_string()));
        let moonshot = vendors.iter().position(|v| v == "Moonshot").unwrap();
        let cohere = vendors.iter().position(|v| v == "Cohere").unwrap();
        assert!(moonshot < cohere);
    }

    #[test]
    fn unknown_vendor_without_fallback_fails() {
        let store = CredentialStore::new(MISSING_SERVICE);
        assert!(store.get("Acme AI").is_err());
        assert_eq!(store.credential_source("Acme AI"), None);
    }
}
