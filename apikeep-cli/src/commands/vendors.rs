//! Vendor catalog commands.

use anyhow::Result;
use apikeep_models::registry::{AuthStyle, ProbeStrategy, VendorProfile};
use apikeep_models::VendorRegistry;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::config::ConfigLoader;

/// Arguments for `apikeep vendor`.
#[derive(Args, Debug)]
pub struct VendorArgs {
    /// Vendor display name (e.g. OpenAI, 智谱AI)
    pub name: String,
}

/// List all registered vendors.
pub fn list() -> Result<()> {
    let config = ConfigLoader::load()?;
    let registry = VendorRegistry::builtin();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Vendor").fg(Color::Cyan),
        Cell::new("Endpoint").fg(Color::Cyan),
        Cell::new("Strategy").fg(Color::Cyan),
        Cell::new("Presets").fg(Color::Cyan),
    ]);

    for profile in registry.iter() {
        let endpoint = config
            .endpoint_for(&profile.name)
            .unwrap_or(&profile.default_endpoint);
        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(if endpoint.is_empty() { "-" } else { endpoint }),
            Cell::new(profile.probe.label()),
            Cell::new(profile.preset_models.len()),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Show one vendor in detail.
pub fn show(args: VendorArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let registry = VendorRegistry::builtin();
    let profile = super::known_vendor(&registry, &args.name)?;

    print!("{}", describe(profile, config.endpoint_for(&profile.name)));
    Ok(())
}

fn describe(profile: &VendorProfile, configured_endpoint: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Vendor: {}\n", profile.name));

    if profile.default_endpoint.is_empty() {
        out.push_str("Endpoint: (user supplied)\n");
    } else {
        out.push_str(&format!("Endpoint: {}\n", profile.default_endpoint));
    }
    if let Some(endpoint) = configured_endpoint {
        out.push_str(&format!("Configured endpoint: {endpoint}\n"));
    }

    out.push_str(&format!("Strategy: {}\n", profile.probe.label()));
    if let Some(detail) = probe_detail(&profile.probe) {
        out.push_str(&format!("Probe: {detail}\n"));
    }

    if profile.is_manual_entry() {
        out.push_str("\nModels are entered manually for this vendor.\n");
    } else {
        out.push_str("\nPreset models:\n");
        for model in &profile.preset_models {
            out.push_str(&format!("  {model}\n"));
        }
    }
    out
}

fn probe_detail(probe: &ProbeStrategy) -> Option<String> {
    let (method, path, auth) = match probe {
        ProbeStrategy::Listing(p) => ("GET", &p.path, &p.auth),
        ProbeStrategy::Synthetic(p) => ("POST", &p.path, &p.auth),
        ProbeStrategy::StaticOnly | ProbeStrategy::ManualEntry => return None,
    };
    let auth = match auth {
        AuthStyle::Bearer => "bearer token".to_string(),
        AuthStyle::Header(name) => format!("{name} header"),
        AuthStyle::QueryParam(name) => format!("?{name}= query parameter"),
    };
    Some(format!("{method} {path} ({auth})"))
}
