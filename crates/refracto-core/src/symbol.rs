//! Symbol table of named type declarations
//!
//! Both renderers resolve named-type references against a table built
//! once per documentation build and treated as immutable for its
//! lifetime. The table can be populated by hand or scanned out of a
//! decoded parse result, where top-level declarations live in category
//! elements classed `dataStructures`.
//!
//! Copyright (c) 2025 Refracto Team
//! Licensed under the Apache-2.0 license

use crate::element::{Element, Kind};
use log::warn;
use std::collections::HashMap;

/// Mapping from type name to its defining element
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    types: HashMap<String, Element>,
}

impl SymbolTable {
    /// Create an empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named type, replacing any previous definition
    pub fn insert(&mut self, name: impl Into<String>, element: Element) {
        self.types.insert(name.into(), element);
    }

    /// Look up a named type
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over the registered type names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Build a table by scanning a decoded parse result
    ///
    /// Every category element classed `dataStructures` contributes its
    /// child declarations, registered under their `meta.id`. Nested
    /// categories are scanned recursively, and `dataStructure` wrapper
    /// elements are unwrapped to the declaration they carry.
    pub fn from_parse_result(root: &Element) -> Self {
        let mut table = SymbolTable::new();
        collect(root, &mut table);
        table
    }
}

impl FromIterator<(String, Element)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (String, Element)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

fn collect(element: &Element, table: &mut SymbolTable) {
    let declares_types = is_named(element, "category") && element.meta.has_class("dataStructures");

    for child in element.children().unwrap_or(&[]) {
        if declares_types {
            register(child, table);
        }
        collect(child, table);
    }
}

fn register(declaration: &Element, table: &mut SymbolTable) {
    let declaration = if is_named(declaration, "dataStructure") {
        match declaration.children().and_then(<[Element]>::first) {
            Some(inner) => inner,
            None => return,
        }
    } else {
        declaration
    };

    match &declaration.meta.id {
        Some(id) => table.insert(id.clone(), declaration.clone()),
        None => warn!(
            "skipping data-structure declaration without an id ({} element)",
            declaration.kind.name()
        ),
    }
}

fn is_named(element: &Element, name: &str) -> bool {
    matches!(&element.kind, Kind::Named(n) if n == name)
}
