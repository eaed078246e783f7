//! CSV definition tables
//!
//! Reads a definition table with a header row and maps the configured header
//! names onto the semantic column keys of [`RowRecord`].

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use dtoforge::config::ColumnSettings;
use dtoforge::row::keys;
use dtoforge::RowRecord;
use thiserror::Error;
use tracing::{debug, warn};

/// Columns a table cannot do without
pub const REQUIRED_KEYS: [&str; 2] = [keys::LAYER, keys::VARIABLE_NAME];

/// Errors that can occur while reading a definition table
#[derive(Debug, Error)]
pub enum SourceError {
    /// Table file could not be opened
    #[error("failed to open definition table {path}: {source}")]
    Open {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Table content is not valid CSV
    #[error("failed to parse definition table: {0}")]
    Csv(#[from] csv::Error),

    /// Required column is absent from the header row
    #[error("required column '{header}' ({key}) not found in header row")]
    MissingColumn {
        /// Semantic column key
        key: &'static str,
        /// Configured header name
        header: String,
    },
}

/// Reads [`RowRecord`]s from CSV
#[derive(Debug, Clone, Default)]
pub struct CsvRowSource {
    columns: ColumnSettings,
    delimiter: Option<u8>,
}

impl CsvRowSource {
    /// Source using the given header names
    #[must_use]
    pub fn new(columns: ColumnSettings) -> Self {
        Self {
            columns,
            delimiter: None,
        }
    }

    /// Use a delimiter other than `,`
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Read a table file
    ///
    /// Files ending in `.tsv` are read tab-separated unless a delimiter was
    /// set explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed, or a required
    /// column is missing.
    pub fn read_path(&self, path: &Path) -> Result<Vec<RowRecord>, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let is_tsv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
        if is_tsv && self.delimiter.is_none() {
            return self.clone().with_delimiter(b'\t').read(file);
        }

        self.read(file)
    }

    /// Read a table from any reader
    ///
    /// Fully blank lines are skipped. Row indexes are the 1-based line
    /// numbers of the table, header included.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed or a required column
    /// is missing.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<RowRecord>, SourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter.unwrap_or(b','))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let positions = self.column_positions(csv_reader.headers()?)?;

        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let index = record
                .position()
                .and_then(|p| usize::try_from(p.line()).ok())
                .unwrap_or(i + 2);

            let values: HashMap<String, String> = positions
                .iter()
                .filter_map(|(key, pos)| {
                    record.get(*pos).map(|v| ((*key).to_string(), v.to_string()))
                })
                .collect();

            let row = RowRecord::new(index, values);
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        debug!(rows = rows.len(), "Read definition table");
        Ok(rows)
    }

    fn column_positions(
        &self,
        headers: &csv::StringRecord,
    ) -> Result<Vec<(&'static str, usize)>, SourceError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let mut positions = Vec::new();
        for (key, header) in self.columns.mapping() {
            let wanted = header.trim().to_lowercase();
            match normalized.iter().position(|h| *h == wanted) {
                Some(pos) => positions.push((key, pos)),
                None if REQUIRED_KEYS.contains(&key) => {
                    return Err(SourceError::MissingColumn {
                        key,
                        header: header.to_string(),
                    });
                }
                None => warn!(column = header, key, "Optional column not found, treating as empty"),
            }
        }

        Ok(positions)
    }
}
