//! Definition tree data model
//!
//! A forest of [`ClassDefinition`] nodes. Nested classes hang off the
//! [`FieldItem`] that declares them, so ownership is strictly tree-shaped.

use serde::{Deserialize, Serialize};

/// One generated class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Class name
    pub name: String,
    /// Class description (doc comment text)
    pub description: String,
    /// Fields, in table order
    pub items: Vec<FieldItem>,
}

/// One field of a class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldItem {
    /// Member variable name
    pub variable_name: String,
    /// Declared type
    pub data_type: String,
    /// Initial value expression, empty when none
    pub initial_value: String,
    /// Field description
    pub description: String,
    /// Whether the field is a required constructor argument
    pub invariant: bool,
    /// Nested classes declared by this field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ClassDefinition>,
}

/// Entry produced by [`ClassDefinition::flatten`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    /// A class-start
    Class(&'a ClassDefinition),
    /// A field
    Field(&'a FieldItem),
}

impl ClassDefinition {
    /// Create a class with no fields
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            items: Vec::new(),
        }
    }

    /// Append a field
    #[must_use]
    pub fn with_item(mut self, item: FieldItem) -> Self {
        self.items.push(item);
        self
    }

    /// Fields that appear in the required-argument constructor, in order
    pub fn invariant_items(&self) -> impl Iterator<Item = &FieldItem> {
        self.items.iter().filter(|item| item.invariant)
    }

    /// Number of class nodes in this subtree, including `self`
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .items
            .iter()
            .flat_map(|item| &item.children)
            .map(Self::node_count)
            .sum::<usize>()
    }

    /// Every class in this subtree, depth-first, `self` first
    #[must_use]
    pub fn walk(&self) -> Vec<&Self> {
        let mut out = vec![self];
        for child in self.items.iter().flat_map(|item| &item.children) {
            out.extend(child.walk());
        }
        out
    }

    /// Depth-first class/field sequence in table order
    #[must_use]
    pub fn flatten(&self) -> Vec<Node<'_>> {
        let mut out = vec![Node::Class(self)];
        for item in &self.items {
            out.push(Node::Field(item));
            for child in &item.children {
                out.extend(child.flatten());
            }
        }
        out
    }
}

impl FieldItem {
    /// Create a field with the given name and type
    pub fn new(variable_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    /// Mark the field as a required constructor argument
    #[must_use]
    pub fn invariant(mut self) -> Self {
        self.invariant = true;
        self
    }

    /// Set the description
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the initial value expression
    #[must_use]
    pub fn initialized(mut self, initial_value: impl Into<String>) -> Self {
        self.initial_value = initial_value.into();
        self
    }

    /// Attach a nested class
    #[must_use]
    pub fn with_child(mut self, child: ClassDefinition) -> Self {
        self.children.push(child);
        self
    }
}

/// Total class count across a forest
#[must_use]
pub fn forest_node_count(forest: &[ClassDefinition]) -> usize {
    forest.iter().map(ClassDefinition::node_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassDefinition {
        let address = ClassDefinition::new("Address", "Postal address")
            .with_item(FieldItem::new("street", "String"))
            .with_item(FieldItem::new("geo", "Geo").with_child(
                ClassDefinition::new("Geo", "Coordinates").with_item(FieldItem::new("lat", "double")),
            ));

        ClassDefinition::new("Person", "A person")
            .with_item(FieldItem::new("name", "String").invariant())
            .with_item(FieldItem::new("address", "Address").with_child(address))
            .with_item(FieldItem::new("age", "int"))
    }

    #[test]
    fn test_node_count() {
        let person = sample();
        assert_eq!(person.node_count(), 3);
        assert_eq!(forest_node_count(&[person.clone(), person]), 6);
    }

    #[test]
    fn test_walk_order() {
        let person = sample();
        let names: Vec<_> = person.walk().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Person", "Address", "Geo"]);
    }

    #[test]
    fn test_flatten_order() {
        let person = sample();
        let labels: Vec<_> = person
            .flatten()
            .into_iter()
            .map(|node| match node {
                Node::Class(c) => c.name.clone(),
                Node::Field(f) => f.variable_name.clone(),
            })
            .collect();
        assert_eq!(
            labels,
            vec!["Person", "name", "address", "Address", "street", "geo", "Geo", "lat", "age"]
        );
    }

    #[test]
    fn test_invariant_items() {
        let person = sample();
        let names: Vec<_> = person.invariant_items().map(|f| f.variable_name.as_str()).collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn test_serialize_skips_empty_children() {
        let json = serde_json::to_value(FieldItem::new("age", "int")).unwrap();
        assert!(json.get("children").is_none());
    }
}
