//! Model discovery for a vendor credential.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use apikeep_models::auth::{ApiKey, env_var_for_vendor};
use apikeep_models::suggest::ModelSuggestions;
use apikeep_models::{
    ModelCatalogResolver, ModelQueryResult, QueryErrorKind, VendorProfile, VendorRegistry,
};
use clap::Args;
use tracing::debug;

use crate::config::{ApikeepConfig, ConfigLoader};

/// Arguments for `apikeep models`.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Vendor display name (e.g. OpenAI, DeepSeek)
    pub vendor: String,

    /// API key to check (defaults to the stored credential)
    #[arg(long)]
    pub key: Option<String>,

    /// Endpoint to probe instead of the vendor default
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Probe timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run models command.
pub async fn run(args: ModelsArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let registry = Arc::new(VendorRegistry::builtin());
    let profile = super::known_vendor(&registry, &args.vendor)?;

    let credential = credential_for(&args, &config, profile)?;
    let endpoint = args
        .endpoint
        .as_deref()
        .or_else(|| config.endpoint_for(&args.vendor));
    let timeout = args
        .timeout
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout());

    let resolver =
        Arc::new(ModelCatalogResolver::new(Arc::clone(&registry)).with_timeout(timeout));
    let handle = resolver.spawn(&args.vendor, &credential, endpoint);

    // Ctrl-C aborts the in-flight probe
    let cancel = handle.cancellation_token();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });
    let result = handle.join().await;
    watcher.abort();

    if args.json {
        return print_json(&result);
    }

    let suggestions = ModelSuggestions::from_result(&registry, &args.vendor, &result);
    print!("{}", render(&args.vendor, &suggestions));

    if let Err(err) = result {
        bail!("{err}");
    }
    Ok(())
}

/// Pick the credential: `--key`, then the store, then blank.
fn credential_for(
    args: &ModelsArgs,
    config: &ApikeepConfig,
    profile: &VendorProfile,
) -> Result<ApiKey> {
    if let Some(key) = &args.key {
        return Ok(ApiKey::new(key.as_str()));
    }
    if !profile.probe.needs_credential() {
        return Ok(ApiKey::new(""));
    }

    match super::credential_store(config).get(&profile.name) {
        Ok(key) => Ok(key),
        Err(apikeep_models::Error::CredentialsNotFound(_)) => {
            debug!(vendor = %profile.name, "no stored credential");
            Ok(ApiKey::new(""))
        }
        Err(e) => Err(e.into()),
    }
}

fn print_json(result: &ModelQueryResult) -> Result<()> {
    match result {
        Ok(catalog) => {
            println!("{}", serde_json::to_string_pretty(catalog)?);
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(err)?);
            bail!("{err}")
        }
    }
}

fn render(vendor: &str, suggestions: &ModelSuggestions) -> String {
    let mut out = String::new();

    match suggestions {
        ModelSuggestions::Verified(models) => {
            let _ = writeln!(out, "Models for {vendor} (verified):");
            for model in models {
                let _ = writeln!(out, "  {model}");
            }
        }
        ModelSuggestions::Preset(models) => {
            let _ = writeln!(out, "Models for {vendor} (preset list, no live check available):");
            for model in models {
                let _ = writeln!(out, "  {model}");
            }
        }
        ModelSuggestions::Degraded { presets, reason } => {
            let _ = writeln!(out, "Could not verify models for {vendor}: {reason}");
            let _ = writeln!(out, "Suggested presets (unverified):");
            for model in presets {
                let _ = writeln!(out, "  {model}");
            }
        }
        ModelSuggestions::Manual { hint } => {
            let _ = writeln!(out, "{vendor}: {hint}");
        }
        ModelSuggestions::Unavailable(err) if err.kind == QueryErrorKind::MissingCredential => {
            let env_hint = env_var_for_vendor(vendor)
                .map(|v| format!(" or set {v}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "Store a key with `apikeep auth {vendor}`{env_hint}, or pass --key."
            );
        }
        ModelSuggestions::Unavailable(_) => {}
    }
    out
}
