//! Flat `<properties>` blocks and typed lookups over them.

use crate::error::{MapError, PropertyType};
use roxmltree::Node;
use serde::Serialize;
use std::collections::BTreeMap;

/// Values a raw property string can be coerced into.
pub trait FromProperty: Sized {
    /// Type reported in [`MapError::InvalidPropertyValue`].
    const TYPE: PropertyType;

    /// `None` when `raw` is not a valid value of this type.
    fn from_property(raw: &str) -> Option<Self>;
}

impl FromProperty for String {
    const TYPE: PropertyType = PropertyType::String;

    fn from_property(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

impl FromProperty for i32 {
    const TYPE: PropertyType = PropertyType::Int;

    fn from_property(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromProperty for bool {
    const TYPE: PropertyType = PropertyType::Bool;

    fn from_property(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

/// Property name to raw string value.
///
/// Keys are unique; when a block repeats a name the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the first `<properties>` child of `node`. Elements without one
    /// yield an empty map.
    pub fn from_node(node: Node) -> Self {
        let mut out = Properties::new();
        let Some(block) = node.children().find(|c| c.has_tag_name("properties")) else {
            return out;
        };
        for prop in block.children().filter(|c| c.has_tag_name("property")) {
            let Some(name) = prop.attribute("name") else {
                continue;
            };
            out.insert(name, property_value(prop));
        }
        out
    }

    /// Inserts unless `name` is already present.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.0
            .entry(name.to_owned())
            .or_insert_with(|| value.to_owned());
    }

    /// Raw value of `name`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Looks up `name` and coerces it to `T`.
    ///
    /// `Ok(None)` means the property is absent. A present but malformed value is an
    /// error attributed to `element`, so callers only default on absence.
    pub fn resolve<T: FromProperty>(&self, element: &str, name: &str) -> Result<Option<T>, MapError> {
        let Some(raw) = self.get_str(name) else {
            return Ok(None);
        };
        T::from_property(raw)
            .map(Some)
            .ok_or_else(|| MapError::InvalidPropertyValue {
                element: element.to_owned(),
                property: name.to_owned(),
                expected: T::TYPE,
                value: raw.to_owned(),
            })
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no property was declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// Multi-line string properties keep their value in the element text.
fn property_value<'a>(prop: Node<'a, '_>) -> &'a str {
    prop.attribute("value")
        .or_else(|| prop.text())
        .unwrap_or("")
}
