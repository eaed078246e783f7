//! Class source rendering
//!
//! [`ResourceRenderer`] walks a class forest and renders one source text per
//! class, nested classes included, into a flat name→text map. Each text is
//! composed of a copyright header, a class doc block, one block per field and
//! the class constructors, whose bodies come from [`ConstructorStrategy`].
//!
//! The whole forest is checked before anything is rendered, so a run either
//! produces every file or none.

pub mod helpers;
pub mod templates;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{DtoForgeError, Result};
use crate::meta::ProjectMeta;
use crate::model::{ClassDefinition, FieldItem};
use crate::strategy::{ConstructorKind, ConstructorStrategy, COPY_ARGUMENT};
use helpers::TemplateHelpers;
pub use templates::TemplateRegistry;

/// Rendered sources keyed by class name
pub type RenderedSources = BTreeMap<String, String>;

/// What to do when two classes in the forest share a name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail the run before rendering anything
    #[default]
    Reject,
    /// Keep the class rendered last
    Overwrite,
}

/// Renders class forests into source texts
#[derive(Debug)]
pub struct ResourceRenderer {
    meta: ProjectMeta,
    templates: TemplateRegistry,
    collision: CollisionPolicy,
}

impl ResourceRenderer {
    /// Renderer with the built-in templates
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new(meta: ProjectMeta) -> Result<Self> {
        Ok(Self {
            meta,
            templates: TemplateRegistry::new()?,
            collision: CollisionPolicy::default(),
        })
    }

    /// Use a custom template registry
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Set the name collision policy
    #[must_use]
    pub fn with_collision_policy(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    /// Project metadata used for headers
    #[must_use]
    pub const fn meta(&self) -> &ProjectMeta {
        &self.meta
    }

    /// Render every class of the forest, nested classes included
    ///
    /// # Errors
    ///
    /// Returns a precondition error if any class or field is missing a
    /// required value, a class has no fields, or (under
    /// [`CollisionPolicy::Reject`]) two classes share a name. Template
    /// failures are returned as-is. No partial output is returned.
    pub fn render(&self, forest: &[ClassDefinition]) -> Result<RenderedSources> {
        self.check_forest(forest)?;

        let mut sources = RenderedSources::new();
        for class in forest.iter().flat_map(ClassDefinition::walk) {
            let text = self.render_class(class)?;
            if sources.insert(class.name.clone(), text).is_some() {
                warn!(
                    class = %class.name,
                    "Class rendered more than once, keeping the last definition"
                );
            }
        }

        info!(classes = sources.len(), "Rendered class sources");
        Ok(sources)
    }

    /// Render a single class, ignoring its nested classes
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the class is incomplete, or a template
    /// error if rendering fails.
    pub fn render_class(&self, class: &ClassDefinition) -> Result<String> {
        check_class(class)?;
        debug!(class = %class.name, fields = class.items.len(), "Rendering class");

        let context = self.class_context(class);
        self.templates.render("class", &context)
    }

    fn check_forest(&self, forest: &[ClassDefinition]) -> Result<()> {
        let mut seen = HashSet::new();

        for class in forest.iter().flat_map(ClassDefinition::walk) {
            check_class(class)?;
            lint_names(class);

            if !seen.insert(class.name.as_str()) && self.collision == CollisionPolicy::Reject {
                return Err(DtoForgeError::DuplicateClass {
                    name: class.name.clone(),
                });
            }
        }

        Ok(())
    }

    fn class_context(&self, class: &ClassDefinition) -> Value {
        let fields: Vec<Value> = class.items.iter().map(field_context).collect();
        let uses_non_null = class
            .items
            .iter()
            .any(|item| TemplateHelpers::is_non_null_type(&item.data_type));

        let constructors: Vec<Value> = ConstructorKind::ALL
            .iter()
            .map(|kind| ConstructorStrategy::for_kind(*kind, class))
            .filter(|strategy| !strategy.is_redundant())
            .map(|strategy| constructor_context(&class.name, &strategy))
            .collect();

        json!({
            "meta": self.meta,
            "year": self.meta.copyright_year(),
            "class": {
                "name": class.name,
                "description": class.description,
            },
            "description_lines": class.description.lines().map(str::trim_end).collect::<Vec<_>>(),
            "uses_non_null": uses_non_null,
            "fields": fields,
            "constructors": constructors,
        })
    }
}

fn field_context(item: &FieldItem) -> Value {
    json!({
        "name": item.variable_name,
        "data_type": item.data_type,
        "initial_value": item.initial_value,
        "description": item.description,
        "invariant": item.invariant,
        "non_null": TemplateHelpers::is_non_null_type(&item.data_type),
    })
}

fn constructor_context(class_name: &str, strategy: &ConstructorStrategy) -> Value {
    let doc = match strategy.kind() {
        ConstructorKind::Default => vec!["Default constructor.".to_string()],
        ConstructorKind::Required => vec!["Constructor with the required fields.".to_string()],
        ConstructorKind::Copying => vec![
            "Copy constructor.".to_string(),
            String::new(),
            format!("@param {COPY_ARGUMENT} {class_name} to copy"),
        ],
    };

    json!({
        "kind": strategy.kind(),
        "doc": doc,
        "class_name": class_name,
        "parameters": strategy.parameters(),
        "assignments": strategy.assignments(),
    })
}

fn check_class(class: &ClassDefinition) -> Result<()> {
    let missing = |field: Option<&str>, what: &'static str| DtoForgeError::MissingValue {
        class: class.name.clone(),
        field: field.map(str::to_string),
        what,
    };

    if class.name.trim().is_empty() {
        return Err(missing(None, "class name"));
    }
    if class.description.trim().is_empty() {
        return Err(missing(None, "description"));
    }
    if class.items.is_empty() {
        return Err(DtoForgeError::EmptyClass {
            class: class.name.clone(),
        });
    }

    for item in &class.items {
        if item.variable_name.trim().is_empty() {
            return Err(missing(None, "field variable name"));
        }
        if item.data_type.trim().is_empty() {
            return Err(missing(Some(item.variable_name.as_str()), "data type"));
        }
    }

    Ok(())
}

fn lint_names(class: &ClassDefinition) {
    if !TemplateHelpers::is_conventional_class_name(&class.name) {
        warn!(class = %class.name, "Class name is not PascalCase");
    }
    for item in &class.items {
        if !TemplateHelpers::is_conventional_member_name(&item.variable_name) {
            warn!(class = %class.name, field = %item.variable_name, "Field name is not camelCase");
        }
    }
}
