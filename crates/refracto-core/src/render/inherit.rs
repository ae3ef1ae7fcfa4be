//! Inheritance resolution for named-type references
//!
//! Resolution combines a named base element with a derived element that
//! references it: derived meta and attributes overwrite the base's
//! field-by-field, and collection content is concatenated base-first,
//! with later member definitions winning over earlier ones of the same
//! key. The result is always a fresh element; neither input is aliased
//! or mutated.
//!
//! Copyright (c) 2025 Refracto Team
//! Licensed under the Apache-2.0 license

use crate::element::{Attributes, Content, Element, Kind, Meta};
use indexmap::IndexMap;
use log::trace;

/// Resolve a derived element against its named base
///
/// The merged element keeps the base's kind and starts from a deep copy
/// of the base, so repeated resolutions against the same base never
/// observe each other.
pub fn resolve(base: &Element, derived: &Element) -> Element {
    let mut resolved = base.clone();
    merge_meta(&mut resolved.meta, &derived.meta);
    merge_attributes(&mut resolved.attributes, &derived.attributes);
    let base_content = std::mem::take(&mut resolved.content);
    resolved.content = merge_content(base_content, &derived.content);
    resolved
}

fn merge_meta(base: &mut Meta, derived: &Meta) {
    if derived.id.is_some() {
        base.id = derived.id.clone();
    }
    if derived.title.is_some() {
        base.title = derived.title.clone();
    }
    if derived.description.is_some() {
        base.description = derived.description.clone();
    }
    if derived.classes.is_some() {
        base.classes = derived.classes.clone();
    }
}

fn merge_attributes(base: &mut Attributes, derived: &Attributes) {
    if derived.type_attributes.is_some() {
        base.type_attributes = derived.type_attributes.clone();
    }
    if derived.default.is_some() {
        base.default = derived.default.clone();
    }
}

fn merge_content(base: Content, derived: &Content) -> Content {
    match (base, derived) {
        // a declared-but-empty derived type keeps the parent's content
        (base, Content::Empty) => base,
        (Content::Elements(mut combined), Content::Elements(children)) => {
            combined.extend(children.iter().cloned());
            if matches!(combined.first().map(|e| &e.kind), Some(Kind::Member)) {
                combined = dedupe_members(combined);
            }
            Content::Elements(combined)
        }
        // scalar overwrite, or a shape mismatch degrading to overwrite
        (base, derived) => {
            if !base.is_empty() {
                trace!("derived content overwrites incompatible base content");
            }
            derived.clone()
        }
    }
}

/// Last-write-wins member deduplication
///
/// Members pass through an ordered map keyed by member name: a
/// re-occurring key replaces the stored member while keeping the key's
/// first position, so derived definitions win without disturbing the
/// relative order of inherited members. Non-member elements in the
/// sequence stay where they are.
fn dedupe_members(items: Vec<Element>) -> Vec<Element> {
    let mut result: Vec<Element> = Vec::with_capacity(items.len());
    let mut slots: IndexMap<String, usize> = IndexMap::new();

    for item in items {
        match item.member_key().map(str::to_owned) {
            Some(key) => match slots.get(&key) {
                Some(&slot) => result[slot] = item,
                None => {
                    slots.insert(key, result.len());
                    result.push(item);
                }
            },
            None => result.push(item),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TypeAttribute;
    use serde_json::json;

    #[test]
    fn test_disjoint_members_concatenate_in_order() {
        let base = Element::object(vec![
            Element::member("id", Element::number()),
            Element::member("name", Element::string()),
        ]);
        let derived = Element::named("Base")
            .with_children(vec![Element::member("email", Element::string())]);

        let resolved = resolve(&base, &derived);
        let keys: Vec<_> = resolved
            .children()
            .unwrap()
            .iter()
            .filter_map(Element::member_key)
            .collect();
        assert_eq!(keys, vec!["id", "name", "email"]);
    }

    #[test]
    fn test_override_keeps_first_position_with_derived_definition() {
        let base = Element::object(vec![
            Element::member("id", Element::number()),
            Element::member("name", Element::string()),
        ]);
        let derived = Element::named("Base").with_children(vec![
            Element::member("id", Element::string()),
            Element::member("age", Element::number()),
        ]);

        let resolved = resolve(&base, &derived);
        let members = resolved.children().unwrap();
        let keys: Vec<_> = members.iter().filter_map(Element::member_key).collect();
        assert_eq!(keys, vec!["id", "name", "age"]);
        assert_eq!(members[0].member_value().unwrap().kind, Kind::String);
    }

    #[test]
    fn test_derived_meta_and_attributes_win() {
        let base = Element::string()
            .with_description("base description")
            .with_default(json!("base"));
        let mut derived = Element::named("Base").with_description("derived description");
        derived.attributes.type_attributes =
            Some([TypeAttribute::Nullable].into_iter().collect());

        let resolved = resolve(&base, &derived);
        assert_eq!(
            resolved.meta.description.as_deref(),
            Some("derived description")
        );
        assert!(resolved.has_type_attribute(TypeAttribute::Nullable));
        // untouched keys survive from the base
        assert_eq!(resolved.attributes.default, Some(json!("base")));
    }

    #[test]
    fn test_empty_derived_content_keeps_base() {
        let base = Element::string().with_value("literal");
        let derived = Element::named("Base");

        let resolved = resolve(&base, &derived);
        assert_eq!(resolved.scalar(), Some(&json!("literal")));
    }

    #[test]
    fn test_scalar_content_overwrites() {
        let base = Element::string().with_value("old");
        let derived = Element::named("Base").with_value("new");

        let resolved = resolve(&base, &derived);
        assert_eq!(resolved.scalar(), Some(&json!("new")));
    }

    #[test]
    fn test_empty_base_takes_derived_content() {
        let base = Element::new(Kind::Object);
        let derived = Element::named("Base")
            .with_children(vec![Element::member("id", Element::number())]);

        let resolved = resolve(&base, &derived);
        assert_eq!(resolved.children().unwrap().len(), 1);
        assert_eq!(resolved.kind, Kind::Object);
    }

    #[test]
    fn test_resolution_never_aliases_inputs() {
        let base = Element::object(vec![Element::member("id", Element::number())]);
        let derived =
            Element::named("Base").with_children(vec![Element::member("id", Element::string())]);

        let before = (base.clone(), derived.clone());
        let _ = resolve(&base, &derived);
        assert_eq!((base, derived), before);
    }

    #[test]
    fn test_non_member_sequences_skip_deduplication() {
        let base = Element::array(vec![Element::string().with_value("a")]);
        let derived =
            Element::named("Base").with_children(vec![Element::string().with_value("a")]);

        let resolved = resolve(&base, &derived);
        assert_eq!(resolved.children().unwrap().len(), 2);
    }
}
