//! Refracto Core - MSON rendering engine for API documentation
//!
//! This crate converts refracted abstract syntax trees describing data
//! shapes ("MSON" elements, as produced by an API-description parser)
//! into the two artifacts documentation generators need per payload: a
//! JSON Schema document and a representative example value.
//!
//! # Main Components
//!
//! - **Element Model**: a closed tagged union of every MSON kind, plus
//!   decoding from the generic refract JSON form
//! - **Symbol Table**: named type declarations, scanned out of a parse
//!   result or registered by hand
//! - **Inheritance Resolver**: override-merging of derived elements onto
//!   their named bases
//! - **Renderers**: [`render_schema`] and [`render_example`], two walks
//!   sharing one interpretation of the tree
//!
//! # Example
//!
//! ```
//! use refracto_core::{render_example, render_schema, Element, SymbolTable, TypeAttribute};
//! use serde_json::json;
//!
//! # fn example() -> refracto_core::Result<()> {
//! let mut symbols = SymbolTable::new();
//! symbols.insert(
//!     "User",
//!     Element::object(vec![Element::member("name", Element::string())]),
//! );
//!
//! let payload = Element::named("User").with_children(vec![Element::member(
//!     "name",
//!     Element::string().with_value("Ada"),
//! )
//! .with_type_attributes([TypeAttribute::Required])]);
//!
//! let schema = render_schema(&payload, &symbols)?;
//! assert_eq!(schema["required"], json!(["name"]));
//!
//! let example = render_example(&payload, &symbols)?;
//! assert_eq!(example, json!({ "name": "Ada" }));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod element;
pub mod error;
pub mod refract;
pub mod render;
pub mod symbol;

// Re-export main types for convenience
pub use element::{Attributes, Content, Element, Kind, MemberPair, Meta, TypeAttribute};
pub use error::{Error, Result};
pub use render::{
    example_document, render_example, render_example_with, render_schema, render_schema_with,
    resolve, ExampleRenderer, RenderOptions, SchemaRenderer, SCHEMA_DRAFT_URI,
};
pub use symbol::SymbolTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
