//! Vendor registry: known vendors, their default endpoints, preset model lists
//! and the probe strategy used to validate a credential.
//!
//! The registry is the single source of truth shared by front ends (for
//! populating vendor pickers) and the resolver (for dispatch). It is read-only
//! once constructed; adding a vendor is a new [`VendorProfile`] entry, not new
//! branching logic.
//!
//! # Example
//!
//! ```
//! use apikeep_models::registry::VendorRegistry;
//!
//! let registry = VendorRegistry::builtin();
//! let openai = registry.lookup("OpenAI").unwrap();
//! assert_eq!(openai.default_endpoint, "https://api.openai.com/v1");
//! assert!(registry.lookup("not-a-vendor").is_none());
//! ```

mod builtin;

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::{Error, Result};

pub use builtin::CUSTOM_VENDOR;

/// How the credential is attached to a probe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`.
    Bearer,
    /// Key sent verbatim in the named header (e.g. `x-api-key`).
    Header(String),
    /// Key sent as the named query-string parameter (e.g. `?key=`).
    QueryParam(String),
}

/// Shape of a models listing response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingShape {
    /// `{"data": [{"id": "..."}]}`
    DataIds,
    /// `{"models": [{"name": "..."}]}`. When `strip_prefix` is set, only names
    /// carrying the prefix are kept and the prefix is removed.
    ModelNames { strip_prefix: Option<String> },
}

/// A vendor that exposes a models-list REST call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingProbe {
    /// Path appended to the endpoint, e.g. `/models`.
    pub path: String,
    pub auth: AuthStyle,
    pub shape: ListingShape,
    /// Case-insensitive substrings; an entry is kept if it contains any.
    /// Empty means keep everything.
    pub allow_list: Vec<String>,
    /// Statuses besides 401/403 that mean the credential was rejected.
    pub unauthorized: Vec<u16>,
    /// The default endpoint is a placeholder; an override is mandatory.
    pub requires_endpoint: bool,
}

impl ListingProbe {
    pub fn new(path: &str, auth: AuthStyle, shape: ListingShape) -> Self {
        Self {
            path: path.to_string(),
            auth,
            shape,
            allow_list: Vec::new(),
            unauthorized: Vec::new(),
            requires_endpoint: false,
        }
    }

    pub fn allow(mut self, keywords: &[&str]) -> Self {
        self.allow_list = keywords.iter().map(|k| k.to_lowercase()).collect();
        self
    }

    pub fn unauthorized_on(mut self, statuses: &[u16]) -> Self {
        self.unauthorized = statuses.to_vec();
        self
    }

    pub fn requires_endpoint(mut self) -> Self {
        self.requires_endpoint = true;
        self
    }

    /// Whether a listed model passes the allow-list.
    pub fn allows(&self, model: &str) -> bool {
        if self.allow_list.is_empty() {
            return true;
        }
        let lowered = model.to_lowercase();
        self.allow_list.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// A vendor without a listing endpoint; a minimal inference call validates the key.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticProbe {
    /// Path appended to the endpoint, e.g. `/messages`.
    pub path: String,
    pub auth: AuthStyle,
    /// Extra headers required by the vendor (e.g. an API version).
    pub headers: Vec<(String, String)>,
    /// JSON body of the minimal request.
    pub body: Value,
    /// Statuses that prove the credential was accepted.
    pub accepted: Vec<u16>,
}

impl SyntheticProbe {
    pub fn new(path: &str, auth: AuthStyle, body: Value) -> Self {
        Self {
            path: path.to_string(),
            auth,
            headers: Vec::new(),
            body,
            accepted: vec![200],
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn accept(mut self, statuses: &[u16]) -> Self {
        self.accepted = statuses.to_vec();
        self
    }
}

/// How a vendor's credential is validated and its models enumerated.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeStrategy {
    Listing(ListingProbe),
    Synthetic(SyntheticProbe),
    /// No network call; the preset list is authoritative.
    StaticOnly,
    /// No network call and no presets; the model is typed by hand.
    ManualEntry,
}

impl ProbeStrategy {
    /// Short label used in listings and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Listing(_) => "listing-endpoint",
            Self::Synthetic(_) => "synthetic-request",
            Self::StaticOnly => "static-only",
            Self::ManualEntry => "manual-entry",
        }
    }

    /// Whether resolution works without a credential.
    pub fn needs_credential(&self) -> bool {
        matches!(self, Self::Listing(_) | Self::Synthetic(_))
    }
}

/// Static description of one vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorProfile {
    /// Unique, case-sensitive display name.
    pub name: String,
    /// Base URL the probe path is appended to.
    pub default_endpoint: String,
    /// Curated fallback models, in display order.
    pub preset_models: Vec<String>,
    pub probe: ProbeStrategy,
}

impl VendorProfile {
    pub fn new(name: &str, default_endpoint: &str, presets: &[&str], probe: ProbeStrategy) -> Self {
        Self {
            name: name.to_string(),
            default_endpoint: default_endpoint.to_string(),
            preset_models: presets.iter().map(|m| m.to_string()).collect(),
            probe,
        }
    }

    pub fn is_manual_entry(&self) -> bool {
        matches!(self.probe, ProbeStrategy::ManualEntry)
    }
}

/// Read-only table of known vendors in registration order.
#[derive(Debug, Clone)]
pub struct VendorRegistry {
    profiles: Vec<VendorProfile>,
    index: HashMap<String, usize>,
}

impl VendorRegistry {
    /// Build a registry from profiles. A later profile with the same name
    /// replaces the earlier one but keeps its position.
    pub fn new(profiles: impl IntoIterator<Item = VendorProfile>) -> Self {
        let mut registry = Self {
            profiles: Vec::new(),
            index: HashMap::new(),
        };
        for profile in profiles {
            if profile.preset_models.is_empty() && !profile.is_manual_entry() {
                warn!(vendor = %profile.name, "vendor registered without preset models");
            }
            match registry.index.get(&profile.name) {
                Some(&pos) => registry.profiles[pos] = profile,
                None => {
                    registry
                        .index
                        .insert(profile.name.clone(), registry.profiles.len());
                    registry.profiles.push(profile);
                }
            }
        }
        registry
    }

    /// The vendors known to the application out of the box.
    pub fn builtin() -> Self {
        Self::new(builtin::profiles())
    }

    /// Replace a vendor's default endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::VendorNotFound` if the vendor is not registered.
    pub fn with_endpoint_override(mut self, vendor: &str, endpoint: &str) -> Result<Self> {
        let pos = *self
            .index
            .get(vendor)
            .ok_or_else(|| Error::VendorNotFound(vendor.to_string()))?;
        self.profiles[pos].default_endpoint = endpoint.to_string();
        Ok(self)
    }

    /// Look up a vendor that supports automatic model resolution or presets.
    ///
    /// Returns `None` for unknown vendors and for manual-entry pseudo-vendors;
    /// callers should treat `None` as "manual entry only".
    pub fn lookup(&self, vendor: &str) -> Option<&VendorProfile> {
        self.profile(vendor).filter(|p| !p.is_manual_entry())
    }

    /// Raw access to any registered profile, manual-entry ones included.
    pub fn profile(&self, vendor: &str) -> Option<&VendorProfile> {
        self.index.get(vendor).map(|&pos| &self.profiles[pos])
    }

    /// Whether the vendor is registered as manual-entry only.
    pub fn is_manual_entry(&self, vendor: &str) -> bool {
        self.profile(vendor).is_some_and(VendorProfile::is_manual_entry)
    }

    /// Preset models for a vendor; empty for unknown or manual-entry vendors.
    pub fn presets(&self, vendor: &str) -> &[String] {
        self.profile(vendor)
            .map(|p| p.preset_models.as_slice())
            .unwrap_or(&[])
    }

    /// Vendor names in registration (display) order.
    pub fn known_vendor_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    /// Iterate over all profiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VendorProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for VendorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
