//! dtoforge: generate DTO class sources from layered definition tables
//!
//! A definition table is a flat list of rows, each tagged with an integer
//! `layer`. Class-start rows and field rows alternate by layer, and nested
//! classes sit two layers deeper than the field that owns them. dtoforge
//! rebuilds the class tree from those rows and renders one source file per
//! class, with a field block per member and three constructors (default,
//! required-argument and copying).
//!
//! # Quick Start
//!
//! ```rust
//! use dtoforge::{LayeredTreeBuilder, ProjectMeta, ResourceRenderer, RowRecord};
//!
//! # fn main() -> dtoforge::Result<()> {
//! let rows = vec![
//!     RowRecord::class_start(1, 0, "Person", "A person"),
//!     RowRecord::field(2, 1, "name", "String", true),
//!     RowRecord::field(3, 1, "age", "int", false),
//! ];
//!
//! let forest = LayeredTreeBuilder::new().build(&rows)?;
//! let sources = ResourceRenderer::new(ProjectMeta::new("com.acme.dto"))?.render(&forest)?;
//!
//! assert!(sources["Person"].contains("public Person(String name) {"));
//! # Ok(())
//! # }
//! ```
//!
//! # Pipeline
//!
//! 1. [`RowRecord`]s come from a tabular source (the CLI reads CSV).
//! 2. [`LayeredTreeBuilder`] turns them into a [`ClassDefinition`] forest.
//! 3. [`ResourceRenderer`] renders every class, delegating constructor bodies
//!    to [`ConstructorStrategy`], into a class name → source text map.

#![allow(clippy::missing_errors_doc)]

pub mod builder;
pub mod config;
pub mod error;
pub mod meta;
pub mod model;
pub mod observability;
pub mod render;
pub mod row;
pub mod strategy;

pub use builder::LayeredTreeBuilder;
pub use config::DtoForgeConfig;
pub use error::{DtoForgeError, Result};
pub use meta::ProjectMeta;
pub use model::{ClassDefinition, FieldItem};
pub use render::{CollisionPolicy, RenderedSources, ResourceRenderer, TemplateRegistry};
pub use row::RowRecord;
pub use strategy::{ConstructorKind, ConstructorStrategy};

/// Build and render in one step with the built-in templates
///
/// # Errors
///
/// Returns the first structural or precondition error encountered.
pub fn generate(rows: &[RowRecord], meta: ProjectMeta) -> Result<RenderedSources> {
    let forest = LayeredTreeBuilder::new().build(rows)?;
    ResourceRenderer::new(meta)?.render(&forest)
}
