//! The parse result: an arena-owning [`Document`] and borrowed
//! [`Value`] handles into it.

use std::fmt;

use crate::arena::{Arena, Node, NodeData, NodeKind, Pair};

/// A successfully parsed JSONC document.
///
/// The document owns every string, array, and object produced by the
/// parse; dropping it releases the whole tree in one step. [`Value`]
/// handles borrow from the document and cannot outlive it — callers
/// that need the data afterwards deep-copy through [`Value::to_json`].
#[derive(Debug)]
pub struct Document {
    pub(crate) arena: Arena,
    pub(crate) root: usize,
}

impl Document {
    /// The top-level value of the document.
    pub fn root(&self) -> Value<'_> {
        Value {
            arena: &self.arena,
            node: self.root,
        }
    }

    /// Deep-copies the whole tree into a [`serde_json::Value`].
    pub fn to_json(&self) -> serde_json::Value {
        self.root().to_json()
    }
}

/// A borrowed handle to one value in a [`Document`].
///
/// Handles are `Copy` and cheap: the tree itself stays in the document's
/// arena. Accessors return `None` when the value is not of the requested
/// kind.
#[derive(Clone, Copy)]
pub struct Value<'doc> {
    arena: &'doc Arena,
    node: usize,
}

impl<'doc> Value<'doc> {
    fn node(&self) -> &'doc Node {
        self.arena.node(self.node)
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    pub fn is_null(&self) -> bool {
        self.kind() == NodeKind::Null
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.node().data {
            NodeData::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.node().data {
            NodeData::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// The numeric value as a float; integers convert losslessly enough
    /// for diagnostic use (`i64::MAX` rounds).
    pub fn as_f64(&self) -> Option<f64> {
        match self.node().data {
            NodeData::Integer(value) => Some(value as f64),
            NodeData::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'doc str> {
        match self.node().data {
            NodeData::String(index) => Some(self.arena.get_str(index)),
            _ => None,
        }
    }

    /// Number of elements (array) or entries (object); 0 for scalars.
    pub fn len(&self) -> usize {
        match self.kind() {
            NodeKind::Array | NodeKind::Object => self.node().child_len,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Array element by position.
    pub fn get_index(&self, index: usize) -> Option<Value<'doc>> {
        let node = self.node();
        if node.kind != NodeKind::Array {
            return None;
        }
        let id = *self.arena.children(node).get(index)?;
        Some(Value {
            arena: self.arena,
            node: id,
        })
    }

    /// Object member by key. With duplicate keys in the input the last
    /// written value is the one stored, so lookup is unambiguous.
    pub fn get(&self, key: &str) -> Option<Value<'doc>> {
        let node = self.node();
        if node.kind != NodeKind::Object {
            return None;
        }
        self.arena
            .pairs(node)
            .iter()
            .find(|pair| self.arena.get_key(pair.key) == key)
            .map(|pair| Value {
                arena: self.arena,
                node: pair.value,
            })
    }

    /// Iterates array elements; empty for non-arrays.
    pub fn items(&self) -> Items<'doc> {
        let node = self.node();
        let slice = match node.kind {
            NodeKind::Array => self.arena.children(node),
            _ => &[],
        };
        Items {
            arena: self.arena,
            ids: slice.iter(),
        }
    }

    /// Iterates object entries in insertion order; empty for non-objects.
    pub fn entries(&self) -> Entries<'doc> {
        let node = self.node();
        let slice = match node.kind {
            NodeKind::Object => self.arena.pairs(node),
            _ => &[],
        };
        Entries {
            arena: self.arena,
            pairs: slice.iter(),
        }
    }

    /// Deep-copies this value (and everything below it) out of the
    /// arena. Non-finite floats map to `null`, as `serde_json` has no
    /// representation for them.
    pub fn to_json(&self) -> serde_json::Value {
        match self.node().data {
            NodeData::Bool(value) => serde_json::Value::Bool(value),
            NodeData::Integer(value) => serde_json::Value::Number(value.into()),
            NodeData::Float(value) => serde_json::Number::from_f64(value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            NodeData::String(index) => {
                serde_json::Value::String(self.arena.get_str(index).to_owned())
            }
            NodeData::None => match self.kind() {
                NodeKind::Array => {
                    serde_json::Value::Array(self.items().map(|item| item.to_json()).collect())
                }
                NodeKind::Object => {
                    let map = self
                        .entries()
                        .map(|(key, value)| (key.to_owned(), value.to_json()))
                        .collect();
                    serde_json::Value::Object(map)
                }
                _ => serde_json::Value::Null,
            },
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node().data {
            NodeData::Bool(value) => write!(f, "Bool({value})"),
            NodeData::Integer(value) => write!(f, "Integer({value})"),
            NodeData::Float(value) => write!(f, "Float({value})"),
            NodeData::String(index) => write!(f, "String({:?})", self.arena.get_str(index)),
            NodeData::None => match self.kind() {
                NodeKind::Array => f.debug_list().entries(self.items()).finish(),
                NodeKind::Object => f.debug_map().entries(self.entries()).finish(),
                _ => f.write_str("Null"),
            },
        }
    }
}

/// Iterator over array elements.
pub struct Items<'doc> {
    arena: &'doc Arena,
    ids: std::slice::Iter<'doc, usize>,
}

impl<'doc> Iterator for Items<'doc> {
    type Item = Value<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        Some(Value {
            arena: self.arena,
            node: id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Items<'_> {}

/// Iterator over object entries in insertion order.
pub struct Entries<'doc> {
    arena: &'doc Arena,
    pairs: std::slice::Iter<'doc, Pair>,
}

impl<'doc> Iterator for Entries<'doc> {
    type Item = (&'doc str, Value<'doc>);

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.pairs.next()?;
        Some((
            self.arena.get_key(pair.key),
            Value {
                arena: self.arena,
                node: pair.value,
            },
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}
