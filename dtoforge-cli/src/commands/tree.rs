//! Class tree inspection
//!
//! Prints the class tree a definition table describes, without rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dtoforge::{ClassDefinition, DtoForgeConfig, LayeredTreeBuilder};

use crate::source::CsvRowSource;

/// Print the class tree of a definition table
#[derive(Debug, Clone, Args)]
pub struct TreeCommand {
    /// Definition table (CSV, or TSV by extension)
    pub input: PathBuf,

    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,
}

impl TreeCommand {
    /// Build the tree and print it, returning the printed text
    pub fn execute(&self, config: &DtoForgeConfig) -> Result<String> {
        let rows = CsvRowSource::new(config.columns.clone())
            .read_path(&self.input)
            .with_context(|| format!("Failed to read definition table: {}", self.input.display()))?;

        let forest = LayeredTreeBuilder::new()
            .build(&rows)
            .context("Failed to build class tree")?;

        let text = if self.json {
            serde_json::to_string_pretty(&forest).context("Failed to serialize class tree")?
        } else {
            outline(&forest)
        };

        println!("{text}");
        Ok(text)
    }
}

/// Indented outline of a forest, one line per class and field
#[must_use]
pub fn outline(forest: &[ClassDefinition]) -> String {
    let mut out = String::new();
    for class in forest {
        write_class(&mut out, class, 0);
    }
    out
}

fn write_class(out: &mut String, class: &ClassDefinition, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{} ({})\n", class.name, class.description));

    for item in &class.items {
        let marker = if item.invariant { " [required]" } else { "" };
        out.push_str(&format!(
            "{indent}  {}: {}{marker}\n",
            item.variable_name, item.data_type
        ));
        for child in &item.children {
            write_class(out, child, depth + 2);
        }
    }
}
