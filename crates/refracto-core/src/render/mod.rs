//! Rendering engine for converting refracted element trees to artifacts
//!
//! This module implements the two renderers sharing one interpretation
//! of the element tree: [`render_schema`] produces a JSON Schema value
//! and [`render_example`] produces a representative sample value. Both
//! consult the same symbol table and the same inheritance resolver, and
//! both are read-only over their inputs.
//!
//! Copyright (c) 2025 Refracto Team
//! Licensed under the Apache-2.0 license

pub mod example;
pub mod inherit;
pub mod schema;

use crate::element::Element;
use crate::error::Result;
use crate::symbol::SymbolTable;
use serde_json::{json, Value};

pub use example::ExampleRenderer;
pub use inherit::resolve;
pub use schema::SchemaRenderer;

/// `$schema` URI attached by [`schema_document`]
pub const SCHEMA_DRAFT_URI: &str = "http://json-schema.org/draft-04/schema#";

/// Tunable limits for a render
///
/// The core performs no cycle detection; the depth limit is the guard
/// that turns a cyclic or degenerately deep symbol table into a
/// per-payload error instead of exhausted stack space.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum nesting depth of named-type resolution and container
    /// recursion, and the bound on mixin expansions per object walk
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

impl RenderOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Render an element tree to a JSON Schema value
///
/// This is the primary schema entry point. It walks the element tree,
/// resolving named-type references against `symbols` through the
/// inheritance resolver, and produces a JSON-Schema-draft-04-compatible
/// structure. Malformed or unresolved input degrades to partial or
/// empty output rather than failing.
///
/// # Arguments
///
/// * `element` - The payload element to render
/// * `symbols` - Named types the tree may reference, treated read-only
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`](crate::Error::DepthExceeded) when
/// resolution nests beyond [`RenderOptions::max_depth`], which is how a
/// cyclic symbol table surfaces.
///
/// # Example
///
/// ```
/// use refracto_core::{render_schema, Element, SymbolTable};
/// use serde_json::json;
///
/// # fn example() -> refracto_core::Result<()> {
/// let mut symbols = SymbolTable::new();
/// symbols.insert("Id", Element::number());
///
/// let payload = Element::object(vec![Element::member("id", Element::named("Id"))]);
/// let schema = render_schema(&payload, &symbols)?;
/// assert_eq!(schema["properties"]["id"], json!({ "type": "number" }));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn render_schema(element: &Element, symbols: &SymbolTable) -> Result<Value> {
    render_schema_with(element, symbols, &RenderOptions::default())
}

/// Render an element tree to a JSON Schema value with explicit options
pub fn render_schema_with(
    element: &Element,
    symbols: &SymbolTable,
    options: &RenderOptions,
) -> Result<Value> {
    SchemaRenderer::new(symbols, options).render(element)
}

/// Render an element tree to a representative sample value
///
/// Same contract as [`render_schema`]; an element with no representable
/// contribution (an unresolved named type at the root) renders as
/// `null`.
pub fn render_example(element: &Element, symbols: &SymbolTable) -> Result<Value> {
    render_example_with(element, symbols, &RenderOptions::default())
}

/// Render an element tree to a sample value with explicit options
pub fn render_example_with(
    element: &Element,
    symbols: &SymbolTable,
    options: &RenderOptions,
) -> Result<Value> {
    let sample = ExampleRenderer::new(symbols, options).render(element)?;
    Ok(sample.unwrap_or(Value::Null))
}

/// Render a schema and serialize it as a pretty-printed document
///
/// Attaches the draft-04 `$schema` URI the surrounding documentation
/// pipeline expects on emitted schema code blocks.
pub fn schema_document(element: &Element, symbols: &SymbolTable) -> Result<String> {
    let mut schema = render_schema(element, symbols)?;
    if let Some(map) = schema.as_object_mut() {
        map.insert("$schema".to_string(), json!(SCHEMA_DRAFT_URI));
    }
    serde_json::to_string_pretty(&schema).map_err(Into::into)
}

/// Render an example and serialize it as a pretty-printed document
pub fn example_document(element: &Element, symbols: &SymbolTable) -> Result<String> {
    let example = render_example(element, symbols)?;
    serde_json::to_string_pretty(&example).map_err(Into::into)
}
