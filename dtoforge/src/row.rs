//! Tabular row records
//!
//! A [`RowRecord`] is one line of the definition table exposed as a
//! key→value mapping. Keys are the semantic column keys in [`keys`]; the
//! tabular reader maps its own header names onto them.

use std::collections::HashMap;

use crate::error::{DtoForgeError, Result};

/// Semantic column keys
pub mod keys {
    /// Nesting depth tag
    pub const LAYER: &str = "layer";
    /// Logical delete flag
    pub const LOGICAL_DELETE: &str = "logical_delete";
    /// Variable (or class) name
    pub const VARIABLE_NAME: &str = "variable_name";
    /// Declared type
    pub const DATA_TYPE: &str = "data_type";
    /// Initial value expression
    pub const INITIAL_VALUE: &str = "initial_value";
    /// Required-argument flag
    pub const INVARIANT: &str = "invariant";
    /// Human description
    pub const DESCRIPTION: &str = "description";

    /// All keys, in table order
    pub const ALL: [&str; 7] = [
        LAYER,
        LOGICAL_DELETE,
        VARIABLE_NAME,
        DATA_TYPE,
        INITIAL_VALUE,
        INVARIANT,
        DESCRIPTION,
    ];
}

/// One row of the definition table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    index: usize,
    values: HashMap<String, String>,
}

impl RowRecord {
    /// Create a row from a 1-based index and its cells
    #[must_use]
    pub const fn new(index: usize, values: HashMap<String, String>) -> Self {
        Self { index, values }
    }

    /// Row that starts a class at `layer`
    #[must_use]
    pub fn class_start(index: usize, layer: u32, name: &str, description: &str) -> Self {
        Self::default()
            .with_index(index)
            .with(keys::LAYER, &layer.to_string())
            .with(keys::VARIABLE_NAME, name)
            .with(keys::DESCRIPTION, description)
    }

    /// Plain field row at `layer`
    #[must_use]
    pub fn field(index: usize, layer: u32, name: &str, data_type: &str, invariant: bool) -> Self {
        Self::default()
            .with_index(index)
            .with(keys::LAYER, &layer.to_string())
            .with(keys::VARIABLE_NAME, name)
            .with(keys::DATA_TYPE, data_type)
            .with(keys::INVARIANT, if invariant { "true" } else { "false" })
    }

    /// Set a cell value
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Mark the row as logically deleted
    #[must_use]
    pub fn deleted(self) -> Self {
        self.with(keys::LOGICAL_DELETE, "true")
    }

    /// Replace the row index
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// 1-based source row index
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Raw cell text, empty when the cell is absent
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.values.get(key).map_or("", |v| v.trim())
    }

    /// Nesting depth
    ///
    /// # Errors
    ///
    /// Returns [`DtoForgeError::InvalidLayer`] when the cell is blank or not a
    /// non-negative integer.
    pub fn layer(&self) -> Result<u32> {
        let raw = self.text(keys::LAYER);
        raw.parse::<u32>().map_err(|_| DtoForgeError::InvalidLayer {
            row: self.index,
            value: raw.to_string(),
        })
    }

    /// Whether the row is excluded from the tree
    ///
    /// # Errors
    ///
    /// Returns [`DtoForgeError::InvalidFlag`] for an unrecognised flag value.
    pub fn logical_delete(&self) -> Result<bool> {
        self.flag(keys::LOGICAL_DELETE)
    }

    /// Whether the field belongs in the required-argument constructor
    ///
    /// # Errors
    ///
    /// Returns [`DtoForgeError::InvalidFlag`] for an unrecognised flag value.
    pub fn invariant(&self) -> Result<bool> {
        self.flag(keys::INVARIANT)
    }

    /// Variable name (class name on class-start rows)
    #[must_use]
    pub fn variable_name(&self) -> &str {
        self.text(keys::VARIABLE_NAME)
    }

    /// Declared type
    #[must_use]
    pub fn data_type(&self) -> &str {
        self.text(keys::DATA_TYPE)
    }

    /// Initial value expression
    #[must_use]
    pub fn initial_value(&self) -> &str {
        self.text(keys::INITIAL_VALUE)
    }

    /// Description
    #[must_use]
    pub fn description(&self) -> &str {
        self.text(keys::DESCRIPTION)
    }

    /// Whether every cell is blank
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }

    fn flag(&self, column: &'static str) -> Result<bool> {
        let raw = self.text(column);
        match raw.to_lowercase().as_str() {
            "" | "false" | "no" | "n" | "0" => Ok(false),
            "true" | "yes" | "y" | "1" | "x" => Ok(true),
            _ => Err(DtoForgeError::InvalidFlag {
                row: self.index,
                column,
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_parsing() {
        let row = RowRecord::field(1, 3, "name", "String", false);
        assert_eq!(row.layer().unwrap(), 3);

        let row = RowRecord::default().with_index(7).with(keys::LAYER, "two");
        let err = row.layer().unwrap_err();
        assert!(matches!(err, DtoForgeError::InvalidLayer { row: 7, .. }));

        let row = RowRecord::default().with_index(8);
        assert!(row.layer().is_err());

        let row = RowRecord::default().with(keys::LAYER, "-1");
        assert!(row.layer().is_err());
    }

    #[test]
    fn test_flags() {
        let row = RowRecord::default()
            .with(keys::INVARIANT, " Yes ")
            .with(keys::LOGICAL_DELETE, "");
        assert!(row.invariant().unwrap());
        assert!(!row.logical_delete().unwrap());

        let row = RowRecord::default().with(keys::INVARIANT, "X");
        assert!(row.invariant().unwrap());

        let row = RowRecord::default().with_index(4).with(keys::INVARIANT, "maybe");
        let err = row.invariant().unwrap_err();
        assert!(matches!(
            err,
            DtoForgeError::InvalidFlag { row: 4, column: "invariant", .. }
        ));
    }

    #[test]
    fn test_missing_cells_are_empty() {
        let row = RowRecord::default();
        assert_eq!(row.variable_name(), "");
        assert_eq!(row.data_type(), "");
        assert!(row.is_blank());
        assert!(!RowRecord::class_start(1, 0, "Person", "A person").is_blank());
    }

    #[test]
    fn test_deleted() {
        let row = RowRecord::field(2, 1, "age", "int", false).deleted();
        assert!(row.logical_delete().unwrap());
    }
}
