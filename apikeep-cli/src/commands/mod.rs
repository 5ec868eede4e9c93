pub mod auth;
pub mod config;
pub mod models;
pub mod template;
pub mod vendors;

use anyhow::{Result, bail};
use apikeep_models::{VendorProfile, VendorRegistry};
use apikeep_models::auth::{CredentialStore, DEFAULT_SERVICE};

use crate::config::ApikeepConfig;

/// Credential store configured from the loaded settings.
pub(crate) fn credential_store(config: &ApikeepConfig) -> CredentialStore {
    CredentialStore::new(DEFAULT_SERVICE).env_fallback(config.credentials.env_fallback)
}

/// Registered profile for `vendor`, or an error listing the known vendors.
pub(crate) fn known_vendor<'a>(
    registry: &'a VendorRegistry,
    vendor: &str,
) -> Result<&'a VendorProfile> {
    let Some(profile) = registry.profile(vendor) else {
        bail!(
            "Unknown vendor '{}'. Known vendors: {}",
            vendor,
            registry.known_vendor_names().join(", ")
        );
    };
    Ok(profile)
}
