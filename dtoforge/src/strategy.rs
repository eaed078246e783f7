//! Constructor body strategies
//!
//! Each generated class gets three constructors. Which parameters and
//! assignments a constructor has is decided once, when its
//! [`ConstructorStrategy`] is created from the class, and never changes.

use serde::Serialize;

use crate::model::ClassDefinition;
use crate::render::helpers::TemplateHelpers;

/// Name of the copying constructor's argument
pub const COPY_ARGUMENT: &str = "other";

/// Constructor variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructorKind {
    /// No parameters, empty body
    Default,
    /// One parameter per invariant field
    Required,
    /// One parameter of the class's own type
    Copying,
}

impl ConstructorKind {
    /// All kinds, in emission order
    pub const ALL: [Self; 3] = [Self::Default, Self::Required, Self::Copying];
}

/// Constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Declared type
    pub data_type: String,
    /// Parameter name
    pub name: String,
}

/// `member = value` statement in a constructor body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Member being assigned
    pub member: String,
    /// Right-hand side expression
    pub value: String,
}

/// Field data a strategy needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name
    pub name: String,
    /// Declared type
    pub data_type: String,
}

/// Constructor strategy, carrying only the data its variant needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorStrategy {
    /// Empty parameter list and body
    Default,
    /// Assign each invariant field from the same-named parameter
    Required {
        /// Invariant fields, in item order
        fields: Vec<Member>,
    },
    /// Assign every field from the argument's getter
    Copying {
        /// Class the argument is an instance of
        class_name: String,
        /// Argument name
        argument: String,
        /// Every field, in item order
        fields: Vec<Member>,
    },
}

impl ConstructorStrategy {
    /// Build the strategy of the given kind for a class
    #[must_use]
    pub fn for_kind(kind: ConstructorKind, class: &ClassDefinition) -> Self {
        match kind {
            ConstructorKind::Default => Self::Default,
            ConstructorKind::Required => Self::Required {
                fields: class.invariant_items().map(member).collect(),
            },
            ConstructorKind::Copying => Self::Copying {
                class_name: class.name.clone(),
                argument: COPY_ARGUMENT.to_string(),
                fields: class.items.iter().map(member).collect(),
            },
        }
    }

    /// Variant of this strategy
    #[must_use]
    pub const fn kind(&self) -> ConstructorKind {
        match self {
            Self::Default => ConstructorKind::Default,
            Self::Required { .. } => ConstructorKind::Required,
            Self::Copying { .. } => ConstructorKind::Copying,
        }
    }

    /// Parameter list
    #[must_use]
    pub fn parameters(&self) -> Vec<Parameter> {
        match self {
            Self::Default => Vec::new(),
            Self::Required { fields } => fields
                .iter()
                .map(|f| Parameter {
                    data_type: f.data_type.clone(),
                    name: f.name.clone(),
                })
                .collect(),
            Self::Copying {
                class_name,
                argument,
                ..
            } => vec![Parameter {
                data_type: class_name.clone(),
                name: argument.clone(),
            }],
        }
    }

    /// Body statements, in field order
    #[must_use]
    pub fn assignments(&self) -> Vec<Assignment> {
        match self {
            Self::Default => Vec::new(),
            Self::Required { fields } => fields
                .iter()
                .map(|f| Assignment {
                    member: f.name.clone(),
                    value: f.name.clone(),
                })
                .collect(),
            Self::Copying {
                argument, fields, ..
            } => fields
                .iter()
                .map(|f| Assignment {
                    member: f.name.clone(),
                    value: format!("{argument}.{}()", TemplateHelpers::getter_name(&f.name)),
                })
                .collect(),
        }
    }

    /// Whether emitting this constructor would duplicate the default one
    #[must_use]
    pub fn is_redundant(&self) -> bool {
        matches!(self, Self::Required { fields } if fields.is_empty())
    }
}

fn member(item: &crate::model::FieldItem) -> Member {
    Member {
        name: item.variable_name.clone(),
        data_type: item.data_type.clone(),
    }
}
