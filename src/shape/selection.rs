//! Caller-specified field selections
//!
//! A selection names the subset of fields to include in a response,
//! recursively for nested object and list fields. On the wire a selection
//! set is a JSON array mixing field names and single-entry objects:
//!
//! ```json
//! ["id", {"itemTypes": ["itemTypeId", {"value": ["value"]}]}]
//! ```

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One selected field, with optional nested selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub field: String,
    pub nested: SelectionSet,
}

impl Selection {
    /// Select a field with no nested selections.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: name.into(),
            nested: SelectionSet::default(),
        }
    }

    /// Select a field with nested selections.
    pub fn with_nested(name: impl Into<String>, nested: impl Into<SelectionSet>) -> Self {
        Self {
            field: name.into(),
            nested: nested.into(),
        }
    }
}

/// An ordered list of selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(pub Vec<Selection>);

impl SelectionSet {
    pub fn new(selections: Vec<Selection>) -> Self {
        Self(selections)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.0.iter()
    }
}

impl From<Vec<Selection>> for SelectionSet {
    fn from(selections: Vec<Selection>) -> Self {
        Self(selections)
    }
}

impl<const N: usize> From<[Selection; N]> for SelectionSet {
    fn from(selections: [Selection; N]) -> Self {
        Self(selections.into())
    }
}

impl Serialize for SelectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for selection in &self.0 {
            if selection.nested.is_empty() {
                seq.serialize_element(&selection.field)?;
            } else {
                seq.serialize_element(&NestedEntry(selection))?;
            }
        }
        seq.end()
    }
}

struct NestedEntry<'a>(&'a Selection);

impl Serialize for NestedEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.field, &self.0.nested)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for SelectionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SelectionSetVisitor)
    }
}

struct SelectionSetVisitor;

impl<'de> Visitor<'de> for SelectionSetVisitor {
    type Value = SelectionSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of field names and {field: [nested]} entries")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut selections = Vec::new();
        while let Some(item) = seq.next_element::<SelectionItem>()? {
            selections.extend(item.0);
        }
        Ok(SelectionSet(selections))
    }
}

/// A single wire item: either a bare field name or a map of nested entries.
struct SelectionItem(Vec<Selection>);

impl<'de> Deserialize<'de> for SelectionItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SelectionItemVisitor)
    }
}

struct SelectionItemVisitor;

impl<'de> Visitor<'de> for SelectionItemVisitor {
    type Value = SelectionItem;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a field name or a {field: [nested]} entry")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(SelectionItem(vec![Selection::field(value)]))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut selections = Vec::new();
        while let Some((field, nested)) = map.next_entry::<String, SelectionSet>()? {
            selections.push(Selection { field, nested });
        }
        Ok(SelectionItem(selections))
    }
}
