//! Source generation
//!
//! Reads a definition table, rebuilds the class tree and writes one source
//! file per class.
//!
//! # Example
//!
//! ```bash
//! dtoforge generate definitions.csv --output src/main/java/com/acme/dto \
//!   --package com.acme.dto
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use dtoforge::{DtoForgeConfig, LayeredTreeBuilder, ResourceRenderer, TemplateRegistry};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::source::CsvRowSource;
use crate::writer::{OutputWriter, WrittenFile};
use crate::CollisionArg;

/// Generate sources from a definition table
#[derive(Debug, Clone, Args)]
pub struct GenerateCommand {
    /// Definition table (CSV, or TSV by extension)
    pub input: PathBuf,

    /// Output directory (overrides `output.dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package of the generated classes (overrides `project.package`)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Directory with template overrides (overrides `templates.template_dir`)
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Policy for classes sharing a name (overrides `output.collision`)
    #[arg(long, value_enum)]
    pub collision: Option<CollisionArg>,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Command reading `input` with every setting taken from configuration
    #[must_use]
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            output: None,
            package: None,
            templates: None,
            collision: None,
            dry_run: false,
        }
    }

    /// Run the generation, returning the files written (or planned, on a
    /// dry run)
    pub fn execute(&self, config: &DtoForgeConfig) -> Result<Vec<WrittenFile>> {
        println!(
            "\n{} {}",
            style("Generating sources from").cyan().bold(),
            style(self.input.display()).green().bold()
        );

        let mut meta = config.project.clone();
        if let Some(package) = &self.package {
            meta.package.clone_from(package);
        }

        let rows = CsvRowSource::new(config.columns.clone())
            .read_path(&self.input)
            .with_context(|| format!("Failed to read definition table: {}", self.input.display()))?;

        let forest = LayeredTreeBuilder::new()
            .build(&rows)
            .context("Failed to build class tree")?;

        let templates = match self.templates.as_ref().or(config.templates.template_dir.as_ref()) {
            Some(dir) => TemplateRegistry::with_overrides(dir)
                .with_context(|| format!("Failed to load templates from: {}", dir.display()))?,
            None => TemplateRegistry::new().context("Failed to load built-in templates")?,
        };

        let collision = self.collision.map_or(config.output.collision, Into::into);
        let renderer = ResourceRenderer::new(meta.clone())?
            .with_templates(templates)
            .with_collision_policy(collision);

        let sources = renderer.render(&forest).context("Failed to render sources")?;

        let writer = OutputWriter::new(
            self.output
                .clone()
                .unwrap_or_else(|| config.output.dir.clone()),
        );

        if self.dry_run {
            let planned = writer.plan(&sources, &meta);
            println!(
                "\n{} {} files:",
                style("Would generate").yellow().bold(),
                planned.len()
            );
            for file in &planned {
                println!("  {} {}", style("•").yellow(), style(file.path.display()).dim());
            }
            return Ok(planned);
        }

        let progress = ProgressBar::new(u64::try_from(sources.len()).unwrap_or(u64::MAX));
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.green} {pos}/{len} {msg}")
                .context("Failed to set progress style")?,
        );

        let files = writer.write(&sources, &meta, |file| {
            progress.set_message(file.class.clone());
            progress.inc(1);
        })?;
        progress.finish_and_clear();

        println!(
            "\n{} {} files:",
            style("Generated").green().bold(),
            files.len()
        );
        for file in &files {
            println!("  {} {}", style("✓").green(), style(file.path.display()).dim());
        }

        info!(
            classes = files.len(),
            dir = %writer.dir().display(),
            "Generation finished"
        );

        Ok(files)
    }
}
