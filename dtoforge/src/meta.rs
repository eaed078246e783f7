//! Project metadata stamped into every generated file

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Project metadata for headers and doc blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMeta {
    /// Package (namespace) of the generated classes
    pub package: String,
    /// Project name
    pub project: String,
    /// Output file extension, without the dot
    pub extension: String,
    /// Author shown in headers
    pub creator: String,
    /// Creation date
    pub created: NaiveDate,
    /// Project version
    pub version: String,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        Self {
            package: "com.example.dto".to_string(),
            project: "dto".to_string(),
            extension: "java".to_string(),
            creator: "dtoforge".to_string(),
            created: Local::now().date_naive(),
            version: "1.0.0".to_string(),
        }
    }
}

impl ProjectMeta {
    /// Metadata for the given package, other values defaulted
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Year used in the copyright line
    #[must_use]
    pub fn copyright_year(&self) -> i32 {
        self.created.year()
    }

    /// Output file name for a class
    #[must_use]
    pub fn file_name(&self, class_name: &str) -> String {
        if self.extension.is_empty() {
            class_name.to_string()
        } else {
            format!("{class_name}.{}", self.extension.trim_start_matches('.'))
        }
    }
}
