//! Index-based storage for one parsed value tree.
//!
//! All heap content produced by a parse lives in a single [`Arena`]:
//! nodes reference their payloads and children through indices into the
//! parallel vectors, so dropping the arena releases the whole tree at
//! once and an aborted parse cannot leave dangling partial structures.

use smol_str::SmolStr;

/// The kind of a parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NodeData {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(usize),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub data: NodeData,
    pub first_child: usize,
    pub child_len: usize,
}

/// One object entry: indices into `Arena::keys` and `Arena::nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pair {
    pub key: usize,
    pub value: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Arena {
    pub nodes: Vec<Node>,
    pub strings: Vec<String>,
    pub keys: Vec<SmolStr>,
    pub children: Vec<usize>,
    pub pairs: Vec<Pair>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_node(&mut self, kind: NodeKind, data: NodeData, first_child: usize, child_len: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            data,
            first_child,
            child_len,
        });
        id
    }

    pub fn push_null(&mut self) -> usize {
        self.push_node(NodeKind::Null, NodeData::None, 0, 0)
    }

    pub fn push_bool(&mut self, value: bool) -> usize {
        self.push_node(NodeKind::Bool, NodeData::Bool(value), 0, 0)
    }

    pub fn push_integer(&mut self, value: i64) -> usize {
        self.push_node(NodeKind::Integer, NodeData::Integer(value), 0, 0)
    }

    pub fn push_float(&mut self, value: f64) -> usize {
        self.push_node(NodeKind::Float, NodeData::Float(value), 0, 0)
    }

    pub fn push_string(&mut self, value: String) -> usize {
        let index = self.strings.len();
        self.strings.push(value);
        self.push_node(NodeKind::String, NodeData::String(index), 0, 0)
    }

    pub fn push_array(&mut self, items: &[usize]) -> usize {
        let first = self.children.len();
        self.children.extend_from_slice(items);
        self.push_node(NodeKind::Array, NodeData::None, first, items.len())
    }

    pub fn push_object(&mut self, entries: &[Pair]) -> usize {
        let first = self.pairs.len();
        self.pairs.extend_from_slice(entries);
        self.push_node(NodeKind::Object, NodeData::None, first, entries.len())
    }

    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    pub fn get_str(&self, index: usize) -> &str {
        self.strings[index].as_str()
    }

    pub fn get_key(&self, index: usize) -> &str {
        self.keys[index].as_str()
    }

    pub fn children(&self, node: &Node) -> &[usize] {
        let start = node.first_child;
        let end = start.saturating_add(node.child_len);
        self.children.get(start..end).unwrap_or(&[])
    }

    pub fn pairs(&self, node: &Node) -> &[Pair] {
        let start = node.first_child;
        let end = start.saturating_add(node.child_len);
        self.pairs.get(start..end).unwrap_or(&[])
    }
}
