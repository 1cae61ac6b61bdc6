use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecanvas_config::{site_from_json, ConfigError};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Site configuration JSON file
    pub file: PathBuf,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)
        .map_err(|err| anyhow!("cannot read {}: {}", args.file.display(), err))?;

    match site_from_json(&raw) {
        Ok(site) => {
            println!(
                "{} {} is valid ({} pages)",
                "✓".green(),
                args.file.display(),
                site.pages.len()
            );
            Ok(())
        }
        Err(ConfigError::Invalid(violations)) => {
            println!("{} {} is invalid:", "✗".red(), args.file.display());
            for violation in &violations {
                println!("   {} {}", "·".red(), violation);
            }
            Err(anyhow!("{} violation(s)", violations.len()))
        }
        Err(err) => Err(err.into()),
    }
}
