//! Decoding of the generic refract JSON form into typed elements
//!
//! The upstream API-description parser emits elements as plain JSON
//! objects (`{"element": ..., "meta": ..., "attributes": ..., "content":
//! ...}`), with meta values appearing either as bare strings or in the
//! refract-1.0 wrapped form `{"element": "string", "content": "..."}`.
//! This module converts that shape into [`Element`] trees. Malformed
//! children inside collections are skipped with a warning, consistent
//! with the rendering core's degradation policy; only a structurally
//! unusable root is an error.
//!
//! Copyright (c) 2025 Refracto Team
//! Licensed under the Apache-2.0 license

use crate::element::{Attributes, Content, Element, Kind, MemberPair, Meta, TypeAttribute};
use crate::error::{Error, Result};
use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeSet;

impl Element {
    /// Decode an element from its refract JSON form
    ///
    /// Unknown element names decode as [`Kind::Named`] references,
    /// since that is what a bare identifier in element position means.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Refract`] when the value is not an element
    /// object, lacks its `element` name, or (for members and refs) is
    /// missing the payload that makes the kind meaningful.
    pub fn from_refract(value: &Value) -> Result<Element> {
        decode_element(value)
    }
}

pub(crate) fn decode_element(value: &Value) -> Result<Element> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::refract(format!("expected an element object, found {}", json_kind(value))))?;

    let name = object
        .get("element")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::refract("element object is missing its \"element\" name"))?;

    let kind = kind_for(name);
    let meta = object.get("meta").map(decode_meta).unwrap_or_default();
    let attributes = object
        .get("attributes")
        .map(decode_attributes)
        .unwrap_or_default();
    let content = decode_content(&kind, object.get("content"))?;

    Ok(Element {
        kind,
        content,
        meta,
        attributes,
    })
}

fn kind_for(name: &str) -> Kind {
    match name {
        "boolean" => Kind::Boolean,
        "string" => Kind::String,
        "number" => Kind::Number,
        "enum" => Kind::Enum,
        "array" => Kind::Array,
        "object" => Kind::Object,
        "select" => Kind::Select,
        "option" => Kind::SelectOption,
        "member" => Kind::Member,
        "ref" => Kind::Ref,
        other => Kind::Named(other.to_owned()),
    }
}

fn decode_meta(value: &Value) -> Meta {
    let Some(object) = value.as_object() else {
        return Meta::default();
    };
    Meta {
        id: object.get("id").and_then(unwrap_text),
        title: object.get("title").and_then(unwrap_text),
        description: object.get("description").and_then(unwrap_text),
        classes: object.get("classes").and_then(unwrap_text_list),
    }
}

fn decode_attributes(value: &Value) -> Attributes {
    let Some(object) = value.as_object() else {
        return Attributes::default();
    };

    let type_attributes = object.get("typeAttributes").map(|value| {
        let mut set = BTreeSet::new();
        for name in unwrap_text_list(value).unwrap_or_default() {
            match TypeAttribute::from_name(&name) {
                Some(attribute) => {
                    set.insert(attribute);
                }
                None => debug!("skipping unknown type attribute '{}'", name),
            }
        }
        set
    });

    Attributes {
        type_attributes,
        default: object.get("default").map(unwrap_value),
    }
}

fn decode_content(kind: &Kind, content: Option<&Value>) -> Result<Content> {
    match kind {
        Kind::Boolean | Kind::String | Kind::Number => {
            Ok(content.cloned().map(Content::Value).unwrap_or_default())
        }
        Kind::Enum | Kind::Array | Kind::Object | Kind::Select | Kind::SelectOption => {
            match content {
                None | Some(Value::Null) => Ok(Content::Empty),
                Some(Value::Array(items)) => Ok(Content::Elements(decode_children(items))),
                Some(other) => {
                    warn!(
                        "discarding non-sequence content of a {} element ({})",
                        kind.name(),
                        json_kind(other)
                    );
                    Ok(Content::Empty)
                }
            }
        }
        Kind::Member => {
            let object = content
                .and_then(Value::as_object)
                .ok_or_else(|| Error::refract("member element without a key/value pair"))?;
            let key = object
                .get("key")
                .ok_or_else(|| Error::refract("member element without a key"))
                .and_then(decode_element)?;
            let value = match object.get("value") {
                Some(value) => decode_element(value)?,
                None => Element::string(),
            };
            Ok(Content::Pair(Box::new(MemberPair { key, value })))
        }
        Kind::Ref => match content {
            Some(Value::String(target)) => Ok(Content::Target(target.clone())),
            Some(Value::Object(object)) => object
                .get("href")
                .and_then(Value::as_str)
                .map(|target| Content::Target(target.to_owned()))
                .ok_or_else(|| Error::refract("ref element without an href target")),
            _ => Err(Error::refract("ref element without a target")),
        },
        Kind::Named(_) => match content {
            None | Some(Value::Null) => Ok(Content::Empty),
            Some(Value::Array(items)) => Ok(Content::Elements(decode_children(items))),
            // single wrapped element, e.g. a dataStructure body
            Some(value @ Value::Object(object)) if object.contains_key("element") => {
                Ok(Content::Elements(vec![decode_element(value)?]))
            }
            Some(other) => Ok(Content::Value(other.clone())),
        },
    }
}

fn decode_children(items: &[Value]) -> Vec<Element> {
    let mut children = Vec::with_capacity(items.len());
    for item in items {
        match decode_element(item) {
            Ok(child) => children.push(child),
            Err(err) => warn!("skipping malformed child element: {}", err),
        }
    }
    children
}

/// Accept a meta value as a bare string or the wrapped string-element form
fn unwrap_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(object) => object.get("content").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

/// Accept a list of texts as a bare array or a wrapped array element
fn unwrap_text_list(value: &Value) -> Option<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(object) => object.get("content").and_then(Value::as_array)?,
        _ => return None,
    };
    Some(items.iter().filter_map(unwrap_text).collect())
}

/// Unwrap a possibly element-wrapped literal, keeping anything else verbatim
fn unwrap_value(value: &Value) -> Value {
    if let Value::Object(object) = value {
        if object.contains_key("element") {
            if let Some(content) = object.get("content") {
                return content.clone();
            }
        }
    }
    value.clone()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
