//! Property-based tests for the rendering core
//!
//! These tests verify the determinism and purity contracts across a
//! wide range of generated element trees: rendering the same element
//! twice yields structurally equal output, acyclic input never fails,
//! and resolution never mutates its inputs.

use proptest::prelude::*;
use refracto_core::{render_example, render_schema, resolve, Element, SymbolTable};
use serde_json::{json, Value};

/// Strategy for scalar literal content
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z0-9 ]{0,12}".prop_map(|s| json!(s)),
    ]
}

/// Strategy for primitive elements with optional literal content
fn primitive_strategy() -> impl Strategy<Value = Element> {
    let kind = prop_oneof![
        Just(Element::boolean()),
        Just(Element::string()),
        Just(Element::number()),
    ];
    (kind, proptest::option::of(scalar_strategy())).prop_map(|(element, literal)| {
        match literal {
            Some(value) => element.with_value(value),
            None => element,
        }
    })
}

/// Strategy for element trees with controlled depth
fn element_strategy() -> impl Strategy<Value = Element> {
    primitive_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Element::array),
            proptest::collection::vec(inner.clone(), 1..4).prop_map(Element::enumeration),
            proptest::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|members| {
                Element::object(
                    members
                        .into_iter()
                        .map(|(key, value)| Element::member(&key, value))
                        .collect(),
                )
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_schema_rendering_is_deterministic(element in element_strategy()) {
        let symbols = SymbolTable::new();
        let first = render_schema(&element, &symbols).unwrap();
        let second = render_schema(&element, &symbols).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_example_rendering_is_deterministic(element in element_strategy()) {
        let symbols = SymbolTable::new();
        let first = render_example(&element, &symbols).unwrap();
        let second = render_example(&element, &symbols).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_acyclic_trees_always_render(element in element_strategy()) {
        let symbols = SymbolTable::new();
        prop_assert!(render_schema(&element, &symbols).is_ok());
        prop_assert!(render_example(&element, &symbols).is_ok());
    }

    #[test]
    fn prop_primitive_examples_are_total(element in primitive_strategy()) {
        // every primitive has some representative value: its literal
        // or the per-kind placeholder
        let rendered = render_example(&element, &SymbolTable::new()).unwrap();
        match element.scalar() {
            Some(literal) => prop_assert_eq!(&rendered, literal),
            None => prop_assert!(
                rendered == json!(true)
                    || rendered == json!(1)
                    || rendered == json!("Hello, world!")
            ),
        }
    }

    #[test]
    fn prop_resolution_never_mutates_inputs(
        base in element_strategy(),
        derived in element_strategy(),
    ) {
        let snapshot = (base.clone(), derived.clone());
        let first = resolve(&base, &derived);
        let second = resolve(&base, &derived);
        prop_assert_eq!(first, second);
        prop_assert_eq!((base, derived), snapshot);
    }
}
