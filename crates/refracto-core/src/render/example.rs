//! Example rendering of refracted element trees
//!
//! Walks the same tree shape as the schema renderer and produces a
//! representative sample value. Primitives fall back to fixed
//! placeholder values so every payload always has some sample, enums
//! are represented by their first choice, and option-sets contribute
//! only their first option. Absent contributions (unresolved names)
//! omit their key from the containing object.
//!
//! Copyright (c) 2025 Refracto Team
//! Licensed under the Apache-2.0 license

use crate::element::{Content, Element, Kind};
use crate::error::{Error, Result};
use crate::render::inherit::resolve;
use crate::render::RenderOptions;
use crate::symbol::SymbolTable;
use log::debug;
use serde_json::{json, Map, Value};
use std::collections::VecDeque;

/// Renderer producing representative sample values from element trees
pub struct ExampleRenderer<'a> {
    symbols: &'a SymbolTable,
    options: &'a RenderOptions,
}

impl<'a> ExampleRenderer<'a> {
    pub fn new(symbols: &'a SymbolTable, options: &'a RenderOptions) -> Self {
        Self { symbols, options }
    }

    /// Render an element tree to a sample value
    ///
    /// Returns `None` for elements with no representable contribution
    /// (unresolved named types, standalone refs/members); containers
    /// skip such children, and the public entry point renders a
    /// root-level absence as `null`.
    pub fn render(&self, element: &Element) -> Result<Option<Value>> {
        self.render_at(element, 0)
    }

    fn render_at(&self, element: &Element, depth: usize) -> Result<Option<Value>> {
        if depth >= self.options.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.options.max_depth,
                element: element.kind.name().to_owned(),
            });
        }

        let sample = match &element.kind {
            Kind::Boolean => Some(element.scalar().cloned().unwrap_or(json!(true))),
            Kind::Number => Some(element.scalar().cloned().unwrap_or(json!(1))),
            Kind::String => Some(
                element
                    .scalar()
                    .cloned()
                    .unwrap_or_else(|| json!("Hello, world!")),
            ),
            // one sample choice represents the whole enumeration
            Kind::Enum => match element.children().unwrap_or(&[]).first() {
                Some(first) => self.render_at(first, depth + 1)?,
                None => Some(Value::Null),
            },
            Kind::Array => {
                let mut items = Vec::new();
                for item in element.children().unwrap_or(&[]) {
                    if let Some(rendered) = self.render_at(item, depth + 1)? {
                        items.push(rendered);
                    }
                }
                Some(Value::Array(items))
            }
            Kind::Object | Kind::Select => Some(self.render_object(element, depth)?),
            Kind::Named(name) => match self.symbols.get(name) {
                Some(base) => return self.render_at(&resolve(base, element), depth + 1),
                None => {
                    debug!("unresolved named type '{}' contributes no example", name);
                    None
                }
            },
            Kind::Ref | Kind::Member | Kind::SelectOption => {
                debug!(
                    "{} element is not renderable standalone, contributing nothing",
                    element.kind.name()
                );
                None
            }
        };

        Ok(sample)
    }

    /// Render an object body (or a standalone option-set) to a sample map
    fn render_object<'e>(&'e self, element: &'e Element, depth: usize) -> Result<Value> {
        let mut sample = Map::new();
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
                    // examples never illustrate alternate branches:
                    // only the first option's members contribute
                    match item.children().unwrap_or(&[]).first() {
                        Some(option) => {
                            for member in option.children().unwrap_or(&[]).iter().rev() {
                                worklist.push_front(member);
                            }
                        }
                        None => debug!("skipping option-set with no options"),
                    }
                }
                Kind::Member => {
                    let Some(key) = item.member_key() else {
                        debug!("skipping member without a textual key");
                        continue;
                    };
                    let Some(value) = item.member_value() else {
                        continue;
                    };
                    // an absent contribution omits the key entirely
                    if let Some(rendered) = self.render_at(value, depth + 1)? {
                        sample.insert(key.to_owned(), rendered);
                    }
                }
                other => debug!("skipping {} element in object body", other.name()),
            }
        }

        Ok(Value::Object(sample))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn render(element: &Element, symbols: &SymbolTable) -> Option<Value> {
        ExampleRenderer::new(symbols, &RenderOptions::default())
            .render(element)
            .unwrap()
    }

    #[test]
    fn test_primitive_placeholders() {
        let symbols = SymbolTable::new();
        assert_eq!(render(&Element::boolean(), &symbols), Some(json!(true)));
        assert_eq!(render(&Element::number(), &symbols), Some(json!(1)));
        assert_eq!(
            render(&Element::string(), &symbols),
            Some(json!("Hello, world!"))
        );
    }

    #[test]
    fn test_primitive_literals_win_over_placeholders() {
        let symbols = SymbolTable::new();
        let element = Element::number().with_value(json!(42));
        assert_eq!(render(&element, &symbols), Some(json!(42)));
    }

    #[test]
    fn test_enum_renders_first_choice() {
        let element = Element::enumeration(vec![
            Element::string().with_value("north"),
            Element::string().with_value("south"),
        ]);
        assert_eq!(render(&element, &SymbolTable::new()), Some(json!("north")));
    }

    #[test]
    fn test_empty_enum_renders_null() {
        let element = Element::enumeration(vec![]);
        assert_eq!(render(&element, &SymbolTable::new()), Some(Value::Null));
    }

    #[test]
    fn test_unresolved_named_member_omits_key() {
        let element = Element::object(vec![
            Element::member("known", Element::string().with_value("yes")),
            Element::member("unknown", Element::named("Missing")),
        ]);
        assert_eq!(
            render(&element, &SymbolTable::new()),
            Some(json!({ "known": "yes" }))
        );
    }

    #[test]
    fn test_heterogeneous_array_keeps_every_rendering() {
        let element = Element::array(vec![
            Element::string().with_value("a"),
            Element::number().with_value(json!(2)),
        ]);
        assert_eq!(render(&element, &SymbolTable::new()), Some(json!(["a", 2])));
    }

    #[test]
    fn test_cyclic_named_type_trips_depth_guard() {
        let mut symbols = SymbolTable::new();
        symbols.insert("Loop", Element::named("Loop"));

        let result = ExampleRenderer::new(&symbols, &RenderOptions::default())
            .render(&Element::named("Loop"));
        assert!(matches!(result, Err(Error::DepthExceeded { .. })));
    }
}
