//! API key management for vendors.

use anyhow::{Result, bail};
use apikeep_models::VendorRegistry;
use apikeep_models::auth::{CredentialStore, env_var_for_vendor};
use clap::Args;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::config::ConfigLoader;

/// Arguments for `apikeep auth`.
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Vendor to configure (e.g. OpenAI, 智谱AI)
    pub vendor: Option<String>,

    /// List vendors with a stored or environment credential
    #[arg(long)]
    pub list: bool,

    /// Delete the stored credential
    #[arg(long)]
    pub delete: bool,
}

pub fn run(args: AuthArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let registry = VendorRegistry::builtin();
    let store = super::credential_store(&config);

    if args.list {
        list(&store, &registry);
        return Ok(());
    }

    let Some(vendor) = args.vendor else {
        bail!("Vendor required. Use --list to see configured vendors.");
    };
    let profile = super::known_vendor(&registry, &vendor)?;

    if args.delete {
        match store.delete(&profile.name) {
            Ok(()) => println!("Credentials for '{}' deleted.", profile.name),
            Err(apikeep_models::Error::CredentialsNotFound(_)) => {
                println!("No credentials found for '{}'.", profile.name);
            }
            Err(e) => bail!("Failed to delete credentials: {}", e),
        }
        return Ok(());
    }

    let env_hint = env_var_for_vendor(&profile.name)
        .map(|v| format!(" (or set {})", v))
        .unwrap_or_default();
    println!("Enter API key for {}{}", profile.name, env_hint);

    let key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("API key")
        .interact()?;

    if key.trim().is_empty() {
        bail!("API key cannot be empty");
    }

    store.set(&profile.name, &key)?;
    println!("Credentials for '{}' saved to keyring.", profile.name);
    if profile.probe.needs_credential() {
        println!("Check it with: apikeep models \"{}\"", profile.name);
    }

    Ok(())
}

fn list(store: &CredentialStore, registry: &VendorRegistry) {
    let vendors = store.list_vendors(registry.known_vendor_names());
    if vendors.is_empty() {
        println!("No API credentials configured.");
        println!();
        println!("Configure credentials with: apikeep auth <vendor>");
        return;
    }

    println!("Configured vendors:");
    println!();
    for vendor in vendors {
        let source = store
            .credential_source(&vendor)
            .map(|s| format!("({s})"))
            .unwrap_or_default();
        println!("  {} {}", vendor, source);
    }
}
