//! `apikeep config` subcommands.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ConfigLoader;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
    /// Print the config layers and data directory, marking missing ones
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let text = match args.command {
        ConfigCommands::Show => toml::to_string_pretty(&ConfigLoader::load()?)?,
        ConfigCommands::Path => path_report(&[
            ("User config", ConfigLoader::user_config_path()),
            ("Project config", ConfigLoader::project_config_path()),
            ("Data directory", apikeep_paths::data_dir()),
        ]),
    };
    println!("{}", text.trim_end());
    Ok(())
}

/// One aligned line per location, in layer order.
fn path_report(locations: &[(&str, PathBuf)]) -> String {
    let width = locations
        .iter()
        .map(|(label, _)| label.len() + 1)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, path) in locations {
        let status = if path.exists() { "" } else { " (not found)" };
        let _ = writeln!(
            out,
            "{:<width$} {}{status}",
            format!("{label}:"),
            path.display()
        );
    }
    out
}
