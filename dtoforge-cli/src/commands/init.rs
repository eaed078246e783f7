//! Starter configuration

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use dtoforge::config::CONFIG_FILE;
use dtoforge::DtoForgeConfig;

const HEADER: &str = "\
# dtoforge configuration
#
# Every value can be overridden with DTOFORGE_ environment variables, using
# __ between sections: DTOFORGE_PROJECT__PACKAGE=com.acme.dto

";

/// Write a configuration file holding the defaults
#[derive(Debug, Clone, Args)]
pub struct InitCommand {
    /// Where to write the file
    #[arg(default_value = CONFIG_FILE)]
    pub path: PathBuf,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Write the starter file, returning its path
    pub fn execute(&self) -> Result<PathBuf> {
        if self.path.exists() && !self.force {
            bail!(
                "{} already exists (use --force to replace it)",
                self.path.display()
            );
        }

        let body = toml::to_string_pretty(&DtoForgeConfig::default())
            .context("Failed to serialize default configuration")?;
        fs::write(&self.path, format!("{HEADER}{body}"))
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;

        println!(
            "{} {}",
            style("Created").green().bold(),
            style(self.path.display()).cyan()
        );

        Ok(self.path.clone())
    }
}
