//! Naming helpers for code generation
//!
//! Identifier conventions used by the constructor strategies and exposed to
//! templates as the `getter` and `upper_first` handlebars helpers.

use handlebars::{handlebars_helper, Handlebars};
use inflector::Inflector;

/// Type names whose fields are marked non-null
pub const NON_NULL_TYPES: [&str; 17] = [
    "int", "long", "short", "byte", "float", "double", "boolean", "char", "Integer", "Long",
    "Short", "Byte", "Float", "Double", "Boolean", "Character", "String",
];

/// Naming helpers for generated sources
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Upper-case the first character, leave the rest untouched
    ///
    /// # Examples
    ///
    /// ```
    /// # use dtoforge::render::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::upper_first("userName"), "UserName");
    /// assert_eq!(TemplateHelpers::upper_first("url_path"), "Url_path");
    /// assert_eq!(TemplateHelpers::upper_first(""), "");
    /// ```
    #[must_use]
    pub fn upper_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Getter identifier for a member
    ///
    /// # Examples
    ///
    /// ```
    /// # use dtoforge::render::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::getter_name("age"), "getAge");
    /// assert_eq!(TemplateHelpers::getter_name("firstName"), "getFirstName");
    /// ```
    #[must_use]
    pub fn getter_name(member: &str) -> String {
        format!("get{}", Self::upper_first(member))
    }

    /// Whether a declared type gets the non-null marker
    #[must_use]
    pub fn is_non_null_type(data_type: &str) -> bool {
        NON_NULL_TYPES.contains(&data_type.trim())
    }

    /// Whether a class name follows `PascalCase`
    #[must_use]
    pub fn is_conventional_class_name(name: &str) -> bool {
        name.is_pascal_case()
    }

    /// Whether a member name follows camelCase
    #[must_use]
    pub fn is_conventional_member_name(name: &str) -> bool {
        name.is_camel_case()
    }

    /// Register the helpers on a handlebars instance
    pub fn register(handlebars: &mut Handlebars<'_>) {
        handlebars_helper!(upper_first: |s: str| TemplateHelpers::upper_first(s));
        handlebars_helper!(getter: |s: str| TemplateHelpers::getter_name(s));

        handlebars.register_helper("upper_first", Box::new(upper_first));
        handlebars.register_helper("getter", Box::new(getter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_first() {
        assert_eq!(TemplateHelpers::upper_first("name"), "Name");
        assert_eq!(TemplateHelpers::upper_first("Name"), "Name");
        assert_eq!(TemplateHelpers::upper_first("x"), "X");
        assert_eq!(TemplateHelpers::upper_first("éclair"), "Éclair");
        assert_eq!(TemplateHelpers::upper_first(""), "");
    }

    #[test]
    fn test_getter_name() {
        assert_eq!(TemplateHelpers::getter_name("name"), "getName");
        assert_eq!(TemplateHelpers::getter_name("isActive"), "getIsActive");
    }

    #[test]
    fn test_non_null_types() {
        assert!(TemplateHelpers::is_non_null_type("int"));
        assert!(TemplateHelpers::is_non_null_type(" String "));
        assert!(TemplateHelpers::is_non_null_type("Boolean"));
        assert!(!TemplateHelpers::is_non_null_type("List<String>"));
        assert!(!TemplateHelpers::is_non_null_type("Address"));
    }

    #[test]
    fn test_conventions() {
        assert!(TemplateHelpers::is_conventional_class_name("UserProfile"));
        assert!(!TemplateHelpers::is_conventional_class_name("user_profile"));
        assert!(TemplateHelpers::is_conventional_member_name("firstName"));
        assert!(!TemplateHelpers::is_conventional_member_name("FirstName"));
    }

    #[test]
    fn test_registered_helpers() {
        let mut handlebars = Handlebars::new();
        TemplateHelpers::register(&mut handlebars);

        let out = handlebars
            .render_template(
                "{{getter name}} {{upper_first name}}",
                &serde_json::json!({ "name": "age" }),
            )
            .unwrap();
        assert_eq!(out, "getAge Age");
    }
}
