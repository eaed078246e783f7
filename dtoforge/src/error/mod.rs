//! Error types and error handling
//!
//! Errors fall into two fatal families:
//!
//! - **Structural** errors describe a malformed input row (unparseable layer or
//!   flag cell, rows that cannot be placed in the tree). They carry the 1-based
//!   row index so the offending line can be located.
//! - **Precondition** errors describe a tree that cannot be rendered (blank
//!   names or types, classes without fields, colliding class names).
//!
//! Empty input is not an error: it yields an empty forest and an empty output.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DtoForgeError>;

/// Generator error type
#[derive(Debug, Error)]
pub enum DtoForgeError {
    /// Layer cell is empty or not a non-negative integer
    #[error("row {row}: invalid layer value '{value}'")]
    InvalidLayer {
        /// 1-based row index
        row: usize,
        /// Raw cell content
        value: String,
    },

    /// Boolean flag cell could not be interpreted
    #[error("row {row}: invalid {column} flag '{value}'")]
    InvalidFlag {
        /// 1-based row index
        row: usize,
        /// Semantic column key (`logical_delete`, `invariant`)
        column: &'static str,
        /// Raw cell content
        value: String,
    },

    /// Field row appeared before any class-start row at its level
    #[error("row {row}: field '{field}' at layer {layer} has no enclosing class")]
    OrphanField {
        /// 1-based row index
        row: usize,
        /// Field variable name
        field: String,
        /// Layer of the row
        layer: u32,
    },

    /// Nested table row with no preceding field to attach it to
    #[error("row {row}: nested table at layer {layer} has no owning field")]
    OrphanTable {
        /// 1-based row index
        row: usize,
        /// Layer of the row
        layer: u32,
    },

    /// A required value is blank at render time
    #[error(
        "class '{class}': missing {what}{}",
        field.as_ref().map(|f| format!(" on field '{f}'")).unwrap_or_default()
    )]
    MissingValue {
        /// Class being rendered (may be blank if the name itself is missing)
        class: String,
        /// Field name, when the missing value belongs to a field
        field: Option<String>,
        /// Which value is missing
        what: &'static str,
    },

    /// Class definition has no fields
    #[error("class '{class}' declares no fields")]
    EmptyClass {
        /// Class name
        class: String,
    },

    /// Two classes in the forest render to the same output name
    #[error("class name '{name}' is defined more than once")]
    DuplicateClass {
        /// Colliding class name
        name: String,
    },

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Template source could not be parsed
    #[error("Template syntax error: {0}")]
    TemplateSyntax(#[from] Box<handlebars::TemplateError>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// I/O error while reading template overrides
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl DtoForgeError {
    /// Whether the error describes a malformed input row
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidLayer { .. }
                | Self::InvalidFlag { .. }
                | Self::OrphanField { .. }
                | Self::OrphanTable { .. }
        )
    }

    /// Whether the error describes a tree that violates render preconditions
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingValue { .. } | Self::EmptyClass { .. } | Self::DuplicateClass { .. }
        )
    }

    /// Source row index, when the error points at one
    #[must_use]
    pub const fn row(&self) -> Option<usize> {
        match self {
            Self::InvalidLayer { row, .. }
            | Self::InvalidFlag { row, .. }
            | Self::OrphanField { row, .. }
            | Self::OrphanTable { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl From<handlebars::TemplateError> for DtoForgeError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateSyntax(Box::new(err))
    }
}

impl From<figment::Error> for DtoForgeError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        let structural = DtoForgeError::InvalidLayer {
            row: 3,
            value: "x".to_string(),
        };
        assert!(structural.is_structural());
        assert!(!structural.is_precondition());
        assert_eq!(structural.row(), Some(3));

        let precondition = DtoForgeError::EmptyClass {
            class: "Person".to_string(),
        };
        assert!(precondition.is_precondition());
        assert_eq!(precondition.row(), None);
    }

    #[test]
    fn test_missing_value_message() {
        let err = DtoForgeError::MissingValue {
            class: "Person".to_string(),
            field: Some("age".to_string()),
            what: "data type",
        };
        assert_eq!(err.to_string(), "class 'Person': missing data type on field 'age'");

        let err = DtoForgeError::MissingValue {
            class: "Person".to_string(),
            field: None,
            what: "description",
        };
        assert_eq!(err.to_string(), "class 'Person': missing description");
    }
}
