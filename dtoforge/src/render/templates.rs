//! Handlebars templates for generated class sources
//!
//! Every text block is a named template. Templates reference each other as
//! partials (`{{> field}}`), so overriding one block leaves the rest intact.

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::helpers::TemplateHelpers;
use crate::error::{DtoForgeError, Result};

/// Copyright header
pub const COPYRIGHT_TEMPLATE: &str = r"/*
 * Copyright (c) {{year}} {{meta.creator}}. All rights reserved.
 *
 * Project: {{meta.project}} {{meta.version}}
 * Generated by dtoforge. Do not edit by hand.
 */
";

/// Class doc comment
pub const CLASS_DOC_TEMPLATE: &str = r"/**
{{#each description_lines}}
 *{{#if this}} {{this}}{{/if}}
{{/each}}
 *
 * @author {{meta.creator}}
 * @version {{meta.version}}
 * @since {{meta.created}}
 */
";

/// One field: description line plus declaration
pub const FIELD_TEMPLATE: &str = r"{{#if description}}
/** {{description}} */
{{/if}}
{{#if non_null}}
@NonNull
{{/if}}
private {{data_type}} {{name}}{{#if initial_value}} = {{initial_value}}{{/if}};
";

/// One constructor; body comes from the constructor strategy
pub const CONSTRUCTOR_TEMPLATE: &str = r"/**
{{#each doc}}
 *{{#if this}} {{this}}{{/if}}
{{/each}}
 */
public {{class_name}}({{#each parameters}}{{data_type}} {{name}}{{#unless @last}}, {{/unless}}{{/each}}) {
{{#each assignments}}
    this.{{member}} = {{value}};
{{/each}}
}
";

/// Getter for one field, the accessor the copying constructor calls
pub const ACCESSOR_TEMPLATE: &str = r"/**
 * @return the {{name}}
 */
public {{data_type}} {{getter name}}() {
    return {{name}};
}
";

/// Whole class file
pub const CLASS_TEMPLATE: &str = r"{{> copyright}}
package {{meta.package}};

import lombok.Data;
{{#if uses_non_null}}
import lombok.NonNull;
{{/if}}

{{> class_doc}}
@Data
public class {{class.name}} {
{{#each fields}}

    {{> field}}
{{/each}}
{{#each constructors}}

    {{> constructor}}
{{/each}}
{{#each fields}}

    {{> accessor}}
{{/each}}
}
";

/// Template names with their built-in sources
pub const BUILTIN_TEMPLATES: [(&str, &str); 6] = [
    ("copyright", COPYRIGHT_TEMPLATE),
    ("class_doc", CLASS_DOC_TEMPLATE),
    ("field", FIELD_TEMPLATE),
    ("constructor", CONSTRUCTOR_TEMPLATE),
    ("accessor", ACCESSOR_TEMPLATE),
    ("class", CLASS_TEMPLATE),
];

/// File extension of template override files
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Registry of named templates
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlebars.get_templates().keys().collect();
        names.sort();
        f.debug_struct("TemplateRegistry").field("templates", &names).finish()
    }
}

impl TemplateRegistry {
    /// Registry with the built-in templates
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        TemplateHelpers::register(&mut handlebars);

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars.register_template_string(name, source)?;
        }

        Ok(Self { handlebars })
    }

    /// Registry with built-ins, replaced by `<name>.hbs` files found in `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if an override file cannot be read or parsed.
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        let mut registry = Self::new()?;

        for (name, _) in BUILTIN_TEMPLATES {
            let path = dir.join(format!("{name}.{TEMPLATE_EXTENSION}"));
            if !path.is_file() {
                continue;
            }

            let source = fs::read_to_string(&path).map_err(|source| DtoForgeError::Io {
                path: path.clone(),
                source,
            })?;
            registry.register(name, &source)?;
            debug!(template = name, path = %path.display(), "Template override");
        }

        Ok(registry)
    }

    /// Register or replace a template
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to parse.
    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        self.handlebars.register_template_string(name, source)?;
        Ok(())
    }

    /// Whether a template is registered
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a named template
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(name, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_builtins_registered() {
        let registry = TemplateRegistry::new().unwrap();
        for (name, _) in BUILTIN_TEMPLATES {
            assert!(registry.has(name), "missing template {name}");
        }
    }

    #[test]
    fn test_field_template() {
        let registry = TemplateRegistry::new().unwrap();
        let out = registry
            .render(
                "field",
                &json!({
                    "name": "age",
                    "data_type": "int",
                    "initial_value": "0",
                    "description": "Age in years",
                    "non_null": true,
                }),
            )
            .unwrap();

        assert!(out.contains("/** Age in years */"));
        assert!(out.contains("@NonNull"));
        assert!(out.contains("private int age = 0;"));
    }

    #[test]
    fn test_field_template_without_extras() {
        let registry = TemplateRegistry::new().unwrap();
        let out = registry
            .render(
                "field",
                &json!({
                    "name": "address",
                    "data_type": "Address",
                    "initial_value": "",
                    "description": "",
                    "non_null": false,
                }),
            )
            .unwrap();

        assert!(!out.contains("/**"));
        assert!(!out.contains("@NonNull"));
        assert!(out.contains("private Address address;"));
    }

    #[test]
    fn test_constructor_template() {
        let registry = TemplateRegistry::new().unwrap();
        let out = registry
            .render(
                "constructor",
                &json!({
                    "doc": ["Required-argument constructor."],
                    "class_name": "Person",
                    "parameters": [
                        { "data_type": "String", "name": "name" },
                        { "data_type": "int", "name": "age" },
                    ],
                    "assignments": [
                        { "member": "name", "value": "name" },
                        { "member": "age", "value": "age" },
                    ],
                }),
            )
            .unwrap();

        assert!(out.contains("public Person(String name, int age) {"));
        assert!(out.contains("this.name = name;"));
        assert!(out.contains("this.age = age;"));
    }

    #[test]
    fn test_constructor_doc_blank_line() {
        let registry = TemplateRegistry::new().unwrap();
        let out = registry
            .render(
                "constructor",
                &json!({
                    "doc": ["Copy constructor.", "", "@param other Person to copy"],
                    "class_name": "Person",
                    "parameters": [],
                    "assignments": [],
                }),
            )
            .unwrap();

        assert!(out.contains(" * Copy constructor.\n *\n * @param other"));
        assert!(out.lines().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn test_accessor_template() {
        let registry = TemplateRegistry::new().unwrap();
        let out = registry
            .render("accessor", &json!({ "name": "active", "data_type": "boolean" }))
            .unwrap();

        assert!(out.contains("public boolean getActive() {"));
        assert!(out.contains("return active;"));
    }

    #[test]
    fn test_strict_mode_rejects_missing_values() {
        let registry = TemplateRegistry::new().unwrap();
        let result = registry.render("copyright", &json!({ "year": 2024 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("copyright.hbs"), "// (c) {{meta.creator}}\n").unwrap();

        let registry = TemplateRegistry::with_overrides(dir.path()).unwrap();
        let out = registry
            .render("copyright", &json!({ "year": 2024, "meta": { "creator": "ACME" } }))
            .unwrap();
        assert_eq!(out, "// (c) ACME\n");
        assert!(registry.has("class"));
    }

    #[test]
    fn test_override_syntax_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("field.hbs"), "{{#if non_null}}unclosed").unwrap();

        let err = TemplateRegistry::with_overrides(dir.path()).unwrap_err();
        assert!(matches!(err, DtoForgeError::TemplateSyntax(_)));
    }
}
