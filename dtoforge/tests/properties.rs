//! Property tests for tree reconstruction and rendering

use dtoforge::model::{forest_node_count, Node};
use dtoforge::row::keys;
use dtoforge::{
    ClassDefinition, FieldItem, LayeredTreeBuilder, ProjectMeta, ResourceRenderer, RowRecord,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn arb_field(depth: u32) -> BoxedStrategy<FieldItem> {
    let children = if depth == 0 {
        Just(Vec::new()).boxed()
    } else {
        prop::collection::vec(arb_class(depth - 1), 0..=2).boxed()
    };

    (
        "[a-z][a-zA-Z]{0,6}",
        prop_oneof![Just("String"), Just("int"), Just("long"), Just("Address")],
        any::<bool>(),
        children,
    )
        .prop_map(|(name, data_type, invariant, children)| FieldItem {
            variable_name: name,
            data_type: data_type.to_string(),
            invariant,
            children,
            ..FieldItem::default()
        })
        .boxed()
}

fn arb_class(depth: u32) -> BoxedStrategy<ClassDefinition> {
    (
        "[A-Z][a-z]{1,6}",
        "[a-z]{1,8}( [a-z]{1,8})?",
        prop::collection::vec(arb_field(depth), 1..4),
    )
        .prop_map(|(name, description, items)| ClassDefinition {
            name,
            description,
            items,
        })
        .boxed()
}

fn arb_forest() -> impl Strategy<Value = Vec<ClassDefinition>> {
    prop::collection::vec(arb_class(2), 0..4)
}

/// Lay a forest out as table rows, classes at `class_layer`
fn to_rows(forest: &[ClassDefinition], class_layer: u32, rows: &mut Vec<RowRecord>) {
    for class in forest {
        let index = rows.len() + 1;
        rows.push(RowRecord::class_start(index, class_layer, &class.name, &class.description));
        for item in &class.items {
            rows.push(RowRecord::field(
                rows.len() + 1,
                class_layer + 1,
                &item.variable_name,
                &item.data_type,
                item.invariant,
            ));
            to_rows(&item.children, class_layer + 2, rows);
        }
    }
}

fn rows_of(forest: &[ClassDefinition]) -> Vec<RowRecord> {
    let mut rows = Vec::new();
    to_rows(forest, 0, &mut rows);
    rows
}

fn uniquify(forest: &mut [ClassDefinition], next: &mut usize) {
    for class in forest {
        class.name = format!("{}{}", class.name, next);
        *next += 1;
        for item in &mut class.items {
            uniquify(&mut item.children, next);
        }
    }
}

fn labels(forest: &[ClassDefinition]) -> Vec<String> {
    forest
        .iter()
        .flat_map(ClassDefinition::flatten)
        .map(|node| match node {
            Node::Class(c) => format!("class:{}", c.name),
            Node::Field(f) => format!("field:{}", f.variable_name),
        })
        .collect()
}

proptest! {
    #[test]
    fn build_reproduces_layered_forest(forest in arb_forest()) {
        let rebuilt = LayeredTreeBuilder::new().build(&rows_of(&forest)).unwrap();
        prop_assert_eq!(rebuilt, forest);
    }

    #[test]
    fn flatten_matches_row_order_modulo_deleted_rows(
        forest in arb_forest(),
        deleted in prop::collection::vec((any::<Index>(), 0u32..9), 0..6),
    ) {
        let mut rows = rows_of(&forest);
        let expected: Vec<String> = rows
            .iter()
            .map(|row| {
                let kind = if row.layer().unwrap() % 2 == 0 { "class" } else { "field" };
                format!("{kind}:{}", row.variable_name())
            })
            .collect();

        for (position, layer) in deleted {
            let at = position.index(rows.len() + 1);
            rows.insert(at, RowRecord::field(0, layer, "ghost", "String", false).deleted());
        }
        let rows: Vec<RowRecord> = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.with_index(i + 1))
            .collect();

        let rebuilt = LayeredTreeBuilder::new().build(&rows).unwrap();
        prop_assert_eq!(labels(&rebuilt), expected);
    }

    #[test]
    fn render_emits_one_source_per_class(mut forest in arb_forest()) {
        let mut next = 0;
        uniquify(&mut forest, &mut next);

        let renderer = ResourceRenderer::new(ProjectMeta::default()).unwrap();
        let sources = renderer.render(&forest).unwrap();
        prop_assert_eq!(sources.len(), forest_node_count(&forest));
        prop_assert_eq!(&sources, &renderer.render(&forest).unwrap());
    }

    #[test]
    fn constructor_shapes_follow_fields(class in arb_class(0)) {
        let renderer = ResourceRenderer::new(ProjectMeta::default()).unwrap();
        let text = renderer.render_class(&class).unwrap();

        let copies = text.matches(" = other.get").count();
        prop_assert_eq!(copies, class.items.len());

        let required = text
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("this.") && !line.contains("other."))
            .count();
        prop_assert_eq!(required, class.invariant_items().count());
    }

    #[test]
    fn garbage_layer_is_structural_error(forest in arb_forest(), at in any::<Index>()) {
        let mut rows = rows_of(&forest);
        prop_assume!(!rows.is_empty());

        let at = at.index(rows.len());
        rows[at] = rows[at].clone().with(keys::LAYER, "n/a");

        let err = LayeredTreeBuilder::new().build(&rows).unwrap_err();
        prop_assert!(err.is_structural());
        prop_assert_eq!(err.row(), Some(at + 1));
    }
}
