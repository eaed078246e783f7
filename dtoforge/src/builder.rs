//! Layered tree reconstruction
//!
//! Definition tables carry no parent pointers; nesting is encoded in the
//! `layer` column alone. At a given nesting level with base layer `b`:
//!
//! - a row at `b - 1` starts a class,
//! - a row at `b` is a field of the current class,
//! - a row above `b` opens a nested table owned by the most recent field,
//!   which is built recursively with base layer `b + 2`,
//! - a row below `b - 1` ends the level.
//!
//! ```text
//! layer  name
//! 0      Person           class (base 1)
//! 1        name           field
//! 1        address        field
//! 2          Address      nested class (base 3)
//! 3            street     nested field
//! 1        age            field, ends the nested level
//! ```
//!
//! Logically deleted rows are skipped wherever they appear, but still count
//! as consumed by the level that passed over them.

use tracing::{debug, trace};

use crate::error::{DtoForgeError, Result};
use crate::model::{ClassDefinition, FieldItem};
use crate::row::RowRecord;

/// Base layer of the outermost table
pub const ROOT_BASE_LAYER: u32 = 1;

/// Rebuilds the class forest from a flat, layer-tagged row sequence
#[derive(Debug, Clone, Copy)]
pub struct LayeredTreeBuilder {
    base_layer: u32,
}

impl Default for LayeredTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayeredTreeBuilder {
    /// Builder for tables whose root classes sit at layer 0
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base_layer: ROOT_BASE_LAYER,
        }
    }

    /// Use a different outermost base layer
    ///
    /// Root class-start rows are expected at `base_layer - 1`.
    #[must_use]
    pub const fn with_base_layer(mut self, base_layer: u32) -> Self {
        self.base_layer = base_layer;
        self
    }

    /// Build the class forest
    ///
    /// Rows after the point where the outermost level ends (a layer below
    /// `base_layer - 1`) are ignored. Empty input yields an empty forest.
    ///
    /// # Errors
    ///
    /// Returns a structural error for an unparseable layer or flag cell, a
    /// field row with no enclosing class, or a nested table with no owning
    /// field. Nothing is returned for the rows processed before the failure.
    pub fn build(&self, rows: &[RowRecord]) -> Result<Vec<ClassDefinition>> {
        let (forest, consumed) = build_level(rows, 0, self.base_layer)?;

        debug!(
            rows = rows.len(),
            consumed,
            classes = forest.len(),
            "Built definition forest"
        );

        Ok(forest)
    }
}

/// Build one nesting level starting at `start`
///
/// Returns the level's forest and how many rows it consumed, so the caller
/// can resume right after the last row that belongs here.
fn build_level(
    rows: &[RowRecord],
    start: usize,
    base_layer: u32,
) -> Result<(Vec<ClassDefinition>, usize)> {
    let mut forest: Vec<ClassDefinition> = Vec::new();
    let mut cursor = start;

    while cursor < rows.len() {
        let row = &rows[cursor];

        if row.logical_delete()? {
            trace!(row = row.index(), "Skipping logically deleted row");
            cursor += 1;
            continue;
        }

        let layer = row.layer()?;
        let class_layer = base_layer.checked_sub(1);

        if class_layer.is_some_and(|class_layer| layer < class_layer) {
            break;
        }

        if class_layer == Some(layer) && layer % 2 == 0 {
            debug!(row = row.index(), layer, class = row.variable_name(), "Class start");
            forest.push(ClassDefinition::new(row.variable_name(), row.description()));
            cursor += 1;
        } else if layer > base_layer {
            let owner = forest
                .last_mut()
                .and_then(|class| class.items.last_mut())
                .ok_or(DtoForgeError::OrphanTable {
                    row: row.index(),
                    layer,
                })?;

            let (children, consumed) = build_level(rows, cursor, base_layer.saturating_add(2))?;
            debug!(
                row = row.index(),
                field = %owner.variable_name,
                classes = children.len(),
                consumed,
                "Nested table"
            );
            owner.children.extend(children);
            cursor += consumed;
        } else {
            let class = forest.last_mut().ok_or_else(|| DtoForgeError::OrphanField {
                row: row.index(),
                field: row.variable_name().to_string(),
                layer,
            })?;
            class.items.push(field_item(row)?);
            cursor += 1;
        }
    }

    Ok((forest, cursor - start))
}

fn field_item(row: &RowRecord) -> Result<FieldItem> {
    Ok(FieldItem {
        variable_name: row.variable_name().to_string(),
        data_type: row.data_type().to_string(),
        initial_value: row.initial_value().to_string(),
        description: row.description().to_string(),
        invariant: row.invariant()?,
        children: Vec::new(),
    })
}
