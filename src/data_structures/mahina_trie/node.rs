//! Node implementation for the Mahina Trie.
//!
//! Each node represents one character of a key path and exclusively owns its
//! children. A node is either an inner path segment or a terminal node that
//! carries the value of the key ending there. Terminal nodes may still have
//! children when the stored key is a prefix of a longer stored key.

use std::collections::hash_map::Entry;

use fnv::FnvHashMap;

use super::error::MahinaTrieError;
use super::value::TrieValue;
use super::MahinaTrieResult;

/// Whether a node ends a stored key.
#[derive(Debug)]
pub enum NodeKind {
    /// A path segment that does not end a stored key.
    Inner,
    /// The end of a stored key, with its value.
    Terminal(TrieValue),
}

/// A node in the Mahina Trie.
#[derive(Debug)]
pub struct TrieNode {
    /// Character this node is keyed by in its parent
    key_char: char,

    /// Map of characters to exclusively owned child nodes
    children: FnvHashMap<char, TrieNode>,

    /// Inner or terminal
    kind: NodeKind,
}

impl TrieNode {
    /// Creates a new inner node with no children.
    pub fn new(key_char: char) -> Self {
        Self {
            key_char,
            children: FnvHashMap::default(),
            kind: NodeKind::Inner,
        }
    }

    /// Creates a new terminal node with no children.
    pub fn with_value(key_char: char, value: TrieValue) -> Self {
        Self {
            key_char,
            children: FnvHashMap::default(),
            kind: NodeKind::Terminal(value),
        }
    }

    /// The character this node is keyed by.
    pub fn key_char(&self) -> char {
        self.key_char
    }

    /// Whether this node ends a stored key.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal(_))
    }

    /// The stored value, if this node is terminal.
    pub fn value(&self) -> Option<&TrieValue> {
        match &self.kind {
            NodeKind::Terminal(value) => Some(value),
            NodeKind::Inner => None,
        }
    }

    /// Returns `true` if a child keyed by `key_char` exists.
    pub fn has_child(&self, key_char: char) -> bool {
        self.children.contains_key(&key_char)
    }

    /// Returns `true` if this node has at least one child.
    pub fn has_any_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Shared handle to the child keyed by `key_char`.
    pub fn child(&self, key_char: char) -> Option<&TrieNode> {
        self.children.get(&key_char)
    }

    /// Mutable handle to the child keyed by `key_char`.
    pub fn get_child(&mut self, key_char: char) -> Option<&mut TrieNode> {
        self.children.get_mut(&key_char)
    }

    /// Attaches `child` under `key_char` and returns a handle to it.
    ///
    /// # Errors
    ///
    /// * `KeyCharMismatch` - `child` is keyed by a different character.
    /// * `ChildExists` - a child is already attached under `key_char`.
    pub fn insert_child(
        &mut self,
        key_char: char,
        child: TrieNode,
    ) -> MahinaTrieResult<&mut TrieNode> {
        if child.key_char != key_char {
            return Err(MahinaTrieError::KeyCharMismatch {
                expected: key_char,
                actual: child.key_char,
            });
        }

        match self.children.entry(key_char) {
            Entry::Occupied(_) => Err(MahinaTrieError::ChildExists(key_char)),
            Entry::Vacant(slot) => Ok(slot.insert(child)),
        }
    }

    /// Returns the child keyed by `key_char`, attaching a new inner node first
    /// if there is none.
    pub fn child_or_insert(&mut self, key_char: char) -> &mut TrieNode {
        self.children
            .entry(key_char)
            .or_insert_with(|| TrieNode::new(key_char))
    }

    /// Detaches and drops the child keyed by `key_char`.
    ///
    /// Returns `false` if there was no such child.
    pub fn remove_child(&mut self, key_char: char) -> bool {
        self.children.remove(&key_char).is_some()
    }

    /// Consumes an inner node and rebuilds it as a terminal node carrying
    /// `value`. The children map is moved, never copied.
    pub fn into_value_node(self, value: TrieValue) -> MahinaTrieResult<TrieNode> {
        if self.is_terminal() {
            return Err(MahinaTrieError::AlreadyTerminal(self.key_char));
        }

        Ok(Self {
            key_char: self.key_char,
            children: self.children,
            kind: NodeKind::Terminal(value),
        })
    }

    /// Turns this inner node into a terminal node carrying `value`, keeping
    /// its key character and children.
    pub fn convert_to_value_node(&mut self, value: TrieValue) -> MahinaTrieResult<()> {
        if self.is_terminal() {
            return Err(MahinaTrieError::AlreadyTerminal(self.key_char));
        }

        let key_char = self.key_char;
        let inner = std::mem::replace(self, TrieNode::new(key_char));
        *self = inner.into_value_node(value)?;
        Ok(())
    }

    /// Reverts a terminal node to an inner node, dropping its value.
    ///
    /// Returns the value that was held, if any.
    pub fn clear_value(&mut self) -> Option<TrieValue> {
        match std::mem::replace(&mut self.kind, NodeKind::Inner) {
            NodeKind::Terminal(value) => Some(value),
            NodeKind::Inner => None,
        }
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}
