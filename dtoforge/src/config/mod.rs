//! Configuration management for dtoforge
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `DTOFORGE_` prefix, `__`
//!    separates nested keys: `DTOFORGE_PROJECT__PACKAGE=com.acme`)
//! 2. The configuration file (`./dtoforge.toml` unless another path is given)
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # dtoforge.toml
//! [project]
//! package = "com.acme.dto"
//! project = "acme-api"
//! extension = "java"
//! creator = "ACME Platform Team"
//! created = "2024-05-17"
//! version = "2.1.0"
//!
//! [columns]
//! layer = "Layer"
//! logical_delete = "Deleted"
//! variable_name = "Name"
//! data_type = "Type"
//! initial_value = "Initial"
//! invariant = "Required"
//! description = "Description"
//!
//! [output]
//! dir = "./generated"
//! collision = "reject"
//!
//! [templates]
//! template_dir = "./templates"
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::meta::ProjectMeta;
use crate::render::CollisionPolicy;
use crate::row::keys;

/// Default configuration file name
pub const CONFIG_FILE: &str = "dtoforge.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DTOFORGE_";

/// Header names of the definition table, per semantic column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSettings {
    /// Nesting depth column
    pub layer: String,
    /// Logical delete flag column
    pub logical_delete: String,
    /// Variable name column
    pub variable_name: String,
    /// Declared type column
    pub data_type: String,
    /// Initial value column
    pub initial_value: String,
    /// Required-argument flag column
    pub invariant: String,
    /// Description column
    pub description: String,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            layer: "layer".to_string(),
            logical_delete: "deleted".to_string(),
            variable_name: "name".to_string(),
            data_type: "type".to_string(),
            initial_value: "initial".to_string(),
            invariant: "required".to_string(),
            description: "description".to_string(),
        }
    }
}

impl ColumnSettings {
    /// `(semantic key, header name)` pairs
    #[must_use]
    pub fn mapping(&self) -> [(&'static str, &str); 7] {
        [
            (keys::LAYER, self.layer.as_str()),
            (keys::LOGICAL_DELETE, self.logical_delete.as_str()),
            (keys::VARIABLE_NAME, self.variable_name.as_str()),
            (keys::DATA_TYPE, self.data_type.as_str()),
            (keys::INITIAL_VALUE, self.initial_value.as_str()),
            (keys::INVARIANT, self.invariant.as_str()),
            (keys::DESCRIPTION, self.description.as_str()),
        ]
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory generated files are written to
    pub dir: PathBuf,

    /// Policy for classes sharing a name
    pub collision: CollisionPolicy,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            collision: CollisionPolicy::Reject,
        }
    }
}

/// Template settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory with `<name>.hbs` files overriding built-in templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

/// Complete dtoforge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtoForgeConfig {
    /// Project metadata
    #[serde(default)]
    pub project: ProjectMeta,

    /// Table column names
    #[serde(default)]
    pub columns: ColumnSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Template settings
    #[serde(default)]
    pub templates: TemplateSettings,
}

impl DtoForgeConfig {
    /// Load configuration from defaults, a TOML file and the environment
    ///
    /// When `path` is `None`, `./dtoforge.toml` is used if present. A missing
    /// file is not an error; the defaults apply.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use dtoforge::config::DtoForgeConfig;
    ///
    /// # fn example() -> dtoforge::Result<()> {
    /// let config = DtoForgeConfig::load(None)?;
    /// println!("{}", config.project.package);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if a source holds a value of the wrong shape.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
        Self::figment(&path).extract().map_err(Into::into)
    }

    /// The layered figment behind [`DtoForgeConfig::load`]
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
