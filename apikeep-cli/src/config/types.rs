use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default probe timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawApikeepConfig {
    #[serde(default)]
    pub resolver: RawResolverConfig,

    #[serde(default)]
    pub credentials: RawCredentialsConfig,

    #[serde(default)]
    pub vendors: BTreeMap<String, VendorOverride>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawResolverConfig {
    /// Seconds before a probe is abandoned
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCredentialsConfig {
    /// Read `<VENDOR>_API_KEY` variables when the keyring has no entry
    pub env_fallback: Option<bool>,
}

/// Per-vendor settings, keyed by vendor display name
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VendorOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApikeepConfig {
    #[serde(default)]
    pub resolver: ResolverSection,

    #[serde(default)]
    pub credentials: CredentialsSection,

    #[serde(default)]
    pub vendors: BTreeMap<String, VendorOverride>,
}

impl ApikeepConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.resolver.timeout_secs)
    }

    /// Configured endpoint for a vendor, if any.
    pub fn endpoint_for(&self, vendor: &str) -> Option<&str> {
        self.vendors
            .get(vendor)
            .and_then(|v| v.endpoint.as_deref())
            .filter(|e| !e.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSection {
    pub timeout_secs: u64,
}

impl Default for ResolverSection {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub env_fallback: bool,
}

impl Default for CredentialsSection {
    fn default() -> Self {
        Self { env_fallback: true }
    }
}
