//! Typed locale/configuration trees.
//!
//! A [`Tree`] is a string-keyed mapping whose values are either nested
//! trees or terminal JSON values. Locale files deserialize straight into
//! this shape: JSON objects become [`TreeValue::Node`], everything else
//! (strings, numbers, booleans, arrays, null) becomes
//! [`TreeValue::Terminal`]. Arrays are opaque terminals and are never
//! merged element-wise.
//!
//! Trees are strict: no cycles and no structure shared between
//! independently loaded trees, guaranteed by ownership.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single value in a [`Tree`]: either a nested tree or a terminal.
///
/// Deserialization tries `Node` first, so a `Terminal` never holds a JSON
/// object when the value came from a locale file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeValue {
    /// A nested subtree.
    Node(Tree),
    /// An opaque leaf value.
    Terminal(JsonValue),
}

impl TreeValue {
    /// Returns true when this value is a nested subtree.
    pub fn is_node(&self) -> bool {
        matches!(self, TreeValue::Node(_))
    }

    /// Borrows the nested subtree, if any.
    pub fn as_node(&self) -> Option<&Tree> {
        match self {
            TreeValue::Node(tree) => Some(tree),
            TreeValue::Terminal(_) => None,
        }
    }

    /// Borrows the terminal string value, if this is a string terminal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::Terminal(JsonValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// A string-keyed tree of locale or configuration data.
///
/// Keys iterate in sorted order. Nested values are addressed with
/// dot-separated paths (`"index.app.name"`); a key containing a literal
/// `.` is therefore not addressable through [`Tree::get`], which matches
/// the flat-JSON locale files this crate loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree(pub(crate) BTreeMap<String, TreeValue>);

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the tree has no children.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts a direct child, returning the previous value at that key.
    pub fn insert(&mut self, key: impl Into<String>, value: TreeValue) -> Option<TreeValue> {
        self.0.insert(key.into(), value)
    }

    /// Iterates over direct children in sorted key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, TreeValue> {
        self.0.iter()
    }

    /// Resolves a dot-separated path to the value stored there.
    ///
    /// `get("index.app.name")` descends through nested nodes; it returns
    /// `None` when any segment is missing or an intermediate value is a
    /// terminal.
    pub fn get(&self, path: &str) -> Option<&TreeValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            match current {
                TreeValue::Node(tree) => current = tree.0.get(segment)?,
                TreeValue::Terminal(_) => return None,
            }
        }
        Some(current)
    }

    /// True when a dot-separated path resolves to any value.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Template-friendly string access for a dot-separated path.
    ///
    /// A string terminal is returned as-is, any other terminal is
    /// JSON-rendered (`2`, `true`, `[1,2]`), and a node or missing path
    /// yields an empty string.
    pub fn text(&self, path: &str) -> String {
        match self.get(path) {
            Some(TreeValue::Terminal(JsonValue::String(s))) => s.clone(),
            Some(TreeValue::Terminal(other)) => other.to_string(),
            _ => String::new(),
        }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a String, &'a TreeValue);
    type IntoIter = btree_map::Iter<'a, String, TreeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
