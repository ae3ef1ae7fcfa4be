//! Core element model for refracted MSON trees
//!
//! This module defines the typed AST consumed by the renderers: an
//! [`Element`] carries a kind discriminator, a polymorphic content
//! payload, descriptive meta fields, and out-of-band attributes. The
//! model is a closed tagged union, so both renderers can match
//! exhaustively over every kind the upstream parser can produce.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A single node of the refracted AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Kind discriminator
    pub kind: Kind,

    /// Polymorphic payload whose shape depends on `kind`
    #[serde(default)]
    pub content: Content,

    /// Descriptive fields
    #[serde(default)]
    pub meta: Meta,

    /// Out-of-band flags
    #[serde(default)]
    pub attributes: Attributes,
}

/// Element kind discriminator
///
/// `Named` covers every element name that is not one of the built-in
/// MSON kinds: a bare identifier referencing a symbol-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    String,
    Number,
    Enum,
    Array,
    Object,
    /// An option-set: a group of mutually exclusive property groups
    Select,
    /// One candidate property group inside an option-set
    #[serde(rename = "option")]
    SelectOption,
    Member,
    /// A mixin reference standing in for another named type's members
    Ref,
    /// A reference to a named type, by identifier
    Named(String),
}

impl Kind {
    /// Display name used in logs and error messages
    pub fn name(&self) -> &str {
        match self {
            Kind::Boolean => "boolean",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Enum => "enum",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Select => "select",
            Kind::SelectOption => "option",
            Kind::Member => "member",
            Kind::Ref => "ref",
            Kind::Named(name) => name,
        }
    }
}

/// Polymorphic element payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Content {
    /// No content (declared-but-empty elements)
    #[default]
    Empty,
    /// Scalar payload of primitive kinds
    Value(Value),
    /// Ordered child sequence of collection kinds
    Elements(Vec<Element>),
    /// Key/value pair of a member
    Pair(Box<MemberPair>),
    /// Target identifier of a mixin reference
    Target(String),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }
}

/// Key/value pair carried by a member element
///
/// The key is itself an element whose scalar content holds the
/// property name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPair {
    pub key: Element,
    pub value: Element,
}

/// Optional descriptive fields of an element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Declared name of a top-level type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Human-readable description, copied into rendered schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Classification labels (e.g. `dataStructures` on categories)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.classes.is_none()
    }

    /// Check whether a classification label is present
    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .as_ref()
            .map_or(false, |classes| classes.iter().any(|c| c == class))
    }
}

/// Optional out-of-band flags of an element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Behavioral markers drawn from the MSON attribute set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_attributes: Option<BTreeSet<TypeAttribute>>,

    /// Literal default value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.type_attributes.is_none() && self.default.is_none()
    }
}

/// Behavioral markers attachable to elements and members
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeAttribute {
    Required,
    Optional,
    Nullable,
    Fixed,
}

impl TypeAttribute {
    /// Parse an attribute from its MSON name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "required" => Some(TypeAttribute::Required),
            "optional" => Some(TypeAttribute::Optional),
            "nullable" => Some(TypeAttribute::Nullable),
            "fixed" => Some(TypeAttribute::Fixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeAttribute::Required => "required",
            TypeAttribute::Optional => "optional",
            TypeAttribute::Nullable => "nullable",
            TypeAttribute::Fixed => "fixed",
        }
    }
}

impl Element {
    /// Create an element of the given kind with no content
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            content: Content::Empty,
            meta: Meta::default(),
            attributes: Attributes::default(),
        }
    }

    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    pub fn number() -> Self {
        Self::new(Kind::Number)
    }

    /// Create an enum element from its declared choices
    pub fn enumeration(choices: Vec<Element>) -> Self {
        Self::new(Kind::Enum).with_children(choices)
    }

    pub fn array(items: Vec<Element>) -> Self {
        Self::new(Kind::Array).with_children(items)
    }

    pub fn object(members: Vec<Element>) -> Self {
        Self::new(Kind::Object).with_children(members)
    }

    /// Create an option-set from its candidate property groups
    pub fn select(options: Vec<Element>) -> Self {
        Self::new(Kind::Select).with_children(options)
    }

    pub fn select_option(members: Vec<Element>) -> Self {
        Self::new(Kind::SelectOption).with_children(members)
    }

    /// Create a member element with a string key
    pub fn member(key: &str, value: Element) -> Self {
        let mut element = Self::new(Kind::Member);
        element.content = Content::Pair(Box::new(MemberPair {
            key: Element::string().with_value(key),
            value,
        }));
        element
    }

    /// Create a mixin reference to a named type
    pub fn reference(target: &str) -> Self {
        let mut element = Self::new(Kind::Ref);
        element.content = Content::Target(target.to_owned());
        element
    }

    /// Create a reference to a named type, by identifier
    pub fn named(name: &str) -> Self {
        Self::new(Kind::Named(name.to_owned()))
    }

    /// Set scalar content
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.content = Content::Value(value.into());
        self
    }

    /// Set child-sequence content
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.content = Content::Elements(children);
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.meta.id = Some(id.to_owned());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.meta.description = Some(description.to_owned());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.attributes.default = Some(default.into());
        self
    }

    /// Set the type-attribute set, replacing any existing one
    pub fn with_type_attributes(
        mut self,
        attributes: impl IntoIterator<Item = TypeAttribute>,
    ) -> Self {
        self.attributes.type_attributes = Some(attributes.into_iter().collect());
        self
    }

    /// Scalar content, when this element carries one
    pub fn scalar(&self) -> Option<&Value> {
        match &self.content {
            Content::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Child sequence, when this element carries one
    pub fn children(&self) -> Option<&[Element]> {
        match &self.content {
            Content::Elements(children) => Some(children),
            _ => None,
        }
    }

    /// Textual key of a member element
    pub fn member_key(&self) -> Option<&str> {
        match &self.content {
            Content::Pair(pair) => pair.key.scalar().and_then(Value::as_str),
            _ => None,
        }
    }

    /// Value element of a member element
    pub fn member_value(&self) -> Option<&Element> {
        match &self.content {
            Content::Pair(pair) => Some(&pair.value),
            _ => None,
        }
    }

    /// Check whether a type attribute is set on this element
    pub fn has_type_attribute(&self, attribute: TypeAttribute) -> bool {
        self.attributes
            .type_attributes
            .as_ref()
            .map_or(false, |set| set.contains(&attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_key_extraction() {
        let member = Element::member("id", Element::number());
        assert_eq!(member.member_key(), Some("id"));
        assert_eq!(member.member_value().unwrap().kind, Kind::Number);
    }

    #[test]
    fn test_member_key_absent_on_other_kinds() {
        assert_eq!(Element::string().member_key(), None);
        assert_eq!(Element::object(vec![]).member_key(), None);
    }

    #[test]
    fn test_type_attribute_roundtrip() {
        for name in ["required", "optional", "nullable", "fixed"] {
            let attr = TypeAttribute::from_name(name).unwrap();
            assert_eq!(attr.as_str(), name);
        }
        assert_eq!(TypeAttribute::from_name("sample"), None);
    }

    #[test]
    fn test_has_type_attribute() {
        let element = Element::string()
            .with_type_attributes([TypeAttribute::Required, TypeAttribute::Nullable]);
        assert!(element.has_type_attribute(TypeAttribute::Required));
        assert!(element.has_type_attribute(TypeAttribute::Nullable));
        assert!(!element.has_type_attribute(TypeAttribute::Fixed));
    }

    #[test]
    fn test_scalar_content() {
        let element = Element::number().with_value(json!(42));
        assert_eq!(element.scalar(), Some(&json!(42)));
        assert_eq!(element.children(), None);
    }

    #[test]
    fn test_meta_classes() {
        let mut meta = Meta::default();
        assert!(!meta.has_class("dataStructures"));
        meta.classes = Some(vec!["dataStructures".to_string()]);
        assert!(meta.has_class("dataStructures"));
        assert!(!meta.is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Kind::Select.name(), "select");
        assert_eq!(Kind::SelectOption.name(), "option");
        assert_eq!(Kind::Named("User".to_string()).name(), "User");
    }
}
