use super::types::{
    ApikeepConfig, CredentialsSection, DEFAULT_TIMEOUT_SECS, RawApikeepConfig,
    RawCredentialsConfig, RawResolverConfig, ResolverSection,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<ApikeepConfig> {
        Self::load_layers(&[Self::user_config_path(), Self::project_config_path()])
    }

    /// Load and merge config files in order; later files win. Missing files are skipped.
    pub fn load_layers(paths: &[PathBuf]) -> Result<ApikeepConfig> {
        let mut raw = RawApikeepConfig::default();

        for path in paths {
            if let Some(layer) = Self::read_raw(path)? {
                debug!(path = %path.display(), "loaded config layer");
                raw = Self::merge_raw(raw, layer);
            }
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path (`$XDG_CONFIG_HOME/apikeep/config.toml`)
    pub fn user_config_path() -> PathBuf {
        apikeep_paths::user_config_file()
    }

    /// Get project config path
    /// Can be overridden with APIKEEP_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("APIKEEP_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".apikeep/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<Option<RawApikeepConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let raw = toml::from_str(&contents)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(Some(raw))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawApikeepConfig, overlay: RawApikeepConfig) -> RawApikeepConfig {
        let mut vendors = base.vendors;
        for (name, over) in overlay.vendors {
            let entry = vendors.entry(name).or_default();
            entry.endpoint = over.endpoint.or(entry.endpoint.take());
        }

        RawApikeepConfig {
            resolver: RawResolverConfig {
                timeout_secs: overlay.resolver.timeout_secs.or(base.resolver.timeout_secs),
            },
            credentials: RawCredentialsConfig {
                env_fallback: overlay
                    .credentials
                    .env_fallback
                    .or(base.credentials.env_fallback),
            },
            vendors,
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawApikeepConfig) -> ApikeepConfig {
        ApikeepConfig {
            resolver: ResolverSection {
                timeout_secs: raw
                    .resolver
                    .timeout_secs
                    .filter(|s| *s > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            credentials: CredentialsSection {
                env_fallback: raw.credentials.env_fallback.unwrap_or(true),
            },
            vendors: raw.vendors,
        }
    }
}
