//! Schema rendering of refracted element trees
//!
//! Walks an element tree and produces a JSON-Schema-draft-04-compatible
//! `serde_json::Value`, consulting the inheritance resolver and the
//! symbol table for named-type references. The walk is a pure function
//! of its inputs: unresolved references and ill-typed content degrade to
//! empty or partial output, and the only failure is the recursion-depth
//! guard.
//!
//! Copyright (c) 2025 Refracto Team
//! Licensed under the Apache-2.0 license

use crate::element::{Content, Element, Kind, TypeAttribute};
use crate::error::{Error, Result};
use crate::render::inherit::resolve;
use crate::render::RenderOptions;
use crate::symbol::SymbolTable;
use log::debug;
use serde_json::{json, Map, Value};
use std::collections::VecDeque;

/// Renderer producing JSON Schema values from element trees
pub struct SchemaRenderer<'a> {
    symbols: &'a SymbolTable,
    options: &'a RenderOptions,
}

/// Collapsed `items` schema of an array
///
/// Array children collapse by structural equality over their rendered
/// schemas; `Mixed` is the explicit fallback branch for heterogeneous
/// arrays.
enum ItemsSchema {
    Absent,
    Uniform(Value),
    Mixed(Vec<Value>),
}

impl<'a> SchemaRenderer<'a> {
    pub fn new(symbols: &'a SymbolTable, options: &'a RenderOptions) -> Self {
        Self { symbols, options }
    }

    /// Render an element tree to a schema value
    pub fn render(&self, element: &Element) -> Result<Value> {
        self.render_at(element, 0)
    }

    fn render_at(&self, element: &Element, depth: usize) -> Result<Value> {
        if depth >= self.options.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.options.max_depth,
                element: element.kind.name().to_owned(),
            });
        }

        let mut schema = match &element.kind {
            Kind::Boolean => primitive_schema("boolean", element),
            Kind::String => primitive_schema("string", element),
            Kind::Number => primitive_schema("number", element),
            Kind::Enum => {
                // choice values are taken verbatim, not deep-rendered
                let choices: Vec<Value> = element
                    .children()
                    .unwrap_or(&[])
                    .iter()
                    .map(|choice| choice.scalar().cloned().unwrap_or(Value::Null))
                    .collect();
                json!({ "enum": choices })
            }
            Kind::Array => {
                let mut rendered = Vec::new();
                for item in element.children().unwrap_or(&[]) {
                    rendered.push(self.render_at(item, depth + 1)?);
                }
                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("array"));
                match collapse_items(rendered) {
                    ItemsSchema::Absent => {}
                    ItemsSchema::Uniform(items) => {
                        schema.insert("items".to_string(), items);
                    }
                    ItemsSchema::Mixed(schemas) => {
                        schema.insert("items".to_string(), json!({ "anyOf": schemas }));
                    }
                }
                Value::Object(schema)
            }
            Kind::Object | Kind::Select => self.render_object(element, depth)?,
            Kind::Named(name) => match self.symbols.get(name) {
                // the trailing description/nullable steps run on the
                // merged element inside the recursive call
                Some(base) => return self.render_at(&resolve(base, element), depth + 1),
                None => {
                    debug!("unresolved named type '{}' renders empty", name);
                    Value::Object(Map::new())
                }
            },
            Kind::Ref | Kind::Member | Kind::SelectOption => {
                debug!(
                    "{} element is not renderable standalone, producing an empty schema",
                    element.kind.name()
                );
                Value::Object(Map::new())
            }
        };

        if let Some(description) = &element.meta.description {
            if let Some(map) = schema.as_object_mut() {
                map.insert("description".to_string(), json!(description));
            }
        }
        if element.has_type_attribute(TypeAttribute::Nullable) {
            widen_nullable(&mut schema);
        }

        Ok(schema)
    }

    /// Render an object body (or a standalone option-set) to an object schema
    fn render_object<'e>(&'e self, element: &'e Element, depth: usize) -> Result<Value> {
        let mut properties = Map::new();
        let mut required: Vec<String> = Vec::new();
        let mut all_of: Vec<Value> = Vec::new();
        let mut expansions = 0;

        let mut worklist: VecDeque<&Element> = VecDeque::new();
        if element.kind == Kind::Select {
            worklist.push_back(element);
        } else {
            worklist.extend(element.children().unwrap_or(&[]));
        }

        while let Some(item) = worklist.pop_front() {
            match &item.kind {
                Kind::Ref => {
                    // cyclic mixins re-expand forever without a bound
                    if expansions >= self.options.max_depth {
                        return Err(Error::DepthExceeded {
                            limit: self.options.max_depth,
                            element: item.kind.name().to_owned(),
                        });
                    }
                    if self.expand_reference(item, &mut worklist) {
                        expansions += 1;
                    }
                }
                Kind::Select => {
                    // every option renders into the shared property map;
                    // one not/required clause covers the whole option-set
                    let mut exclusive: Vec<String> = Vec::new();
                    for option in item.children().unwrap_or(&[]) {
                        for member in option.children().unwrap_or(&[]) {
                            let (Some(key), Some(value)) =
                                (member.member_key(), member.member_value())
                            else {
                                continue;
                            };
                            if !exclusive.iter().any(|k| k == key) {
                                exclusive.push(key.to_owned());
                            }
                            properties.insert(key.to_owned(), self.render_at(value, depth + 1)?);
                        }
                    }
                    all_of.push(json!({ "not": { "required": exclusive } }));
                }
                Kind::Member => {
                    let Some(key) = item.member_key() else {
                        debug!("skipping member without a textual key");
                        continue;
                    };
                    let Some(value) = item.member_value() else {
                        continue;
                    };
                    let mut property = self.render_at(value, depth + 1)?;
                    if let Some(description) = &item.meta.description {
                        if let Some(map) = property.as_object_mut() {
                            map.insert("description".to_string(), json!(description));
                        }
                    }
                    if item.has_type_attribute(TypeAttribute::Required)
                        && !required.iter().any(|k| k == key)
                    {
                        required.push(key.to_owned());
                    }
                    if item.has_type_attribute(TypeAttribute::Nullable) {
                        widen_nullable(&mut property);
                    }
                    properties.insert(key.to_owned(), property);
                }
                other => debug!("skipping {} element in object body", other.name()),
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !all_of.is_empty() {
            schema.insert("allOf".to_string(), Value::Array(all_of));
        }
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        Ok(Value::Object(schema))
    }

    /// Inline a mixin reference's members at the current walk position
    ///
    /// Returns whether the reference expanded, so the caller can bound
    /// how many expansions one object walk performs.
    fn expand_reference<'e>(
        &'e self,
        reference: &'e Element,
        worklist: &mut VecDeque<&'e Element>,
    ) -> bool {
        let Content::Target(name) = &reference.content else {
            debug!("skipping ref element without a target");
            return false;
        };
        match self.symbols.get(name).and_then(Element::children) {
            Some(children) => {
                for child in children.iter().rev() {
                    worklist.push_front(child);
                }
                true
            }
            None => {
                debug!("unresolved mixin reference '{}' skipped", name);
                false
            }
        }
    }
}

fn primitive_schema(type_name: &str, element: &Element) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!(type_name));
    if let Some(default) = &element.attributes.default {
        schema.insert("default".to_string(), default.clone());
    }
    Value::Object(schema)
}

fn collapse_items(mut rendered: Vec<Value>) -> ItemsSchema {
    if rendered.is_empty() {
        return ItemsSchema::Absent;
    }
    if rendered.iter().all(|schema| *schema == rendered[0]) {
        return ItemsSchema::Uniform(rendered.swap_remove(0));
    }
    ItemsSchema::Mixed(rendered)
}

/// Widen a schema's type to admit null
///
/// A scalar `type` becomes the two-element `[type, "null"]` pair. A
/// compound schema without a scalar `type` field is wrapped in an
/// `anyOf` with an explicit null schema instead of producing a pair
/// with an absent first element.
fn widen_nullable(schema: &mut Value) {
    let scalar = schema.get("type").and_then(Value::as_str).map(str::to_owned);
    match scalar {
        Some(type_name) => {
            if let Some(map) = schema.as_object_mut() {
                map.insert("type".to_string(), json!([type_name, "null"]));
            }
        }
        None => {
            let original = schema.take();
            *schema = json!({ "anyOf": [original, { "type": "null" }] });
        }
    }
}
