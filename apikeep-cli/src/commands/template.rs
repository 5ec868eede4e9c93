use std::path::PathBuf;

use anyhow::{Context, Result};
use apikeep_models::VendorRegistry;
use apikeep_models::templates::render_example;
use clap::Args;

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Vendor display name
    pub vendor: String,

    /// Write the snippet to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: TemplateArgs) -> Result<()> {
    let registry = VendorRegistry::builtin();
    let code = render_example(&registry, &args.vendor);

    match args.output {
        Some(path) => {
            std::fs::write(&path, &code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Example for {} written to {}", args.vendor, path.display());
        }
        None => print!("{code}"),
    }
    Ok(())
}
