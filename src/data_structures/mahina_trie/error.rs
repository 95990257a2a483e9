// Copyright (c) 2025 Mahina KV Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Mahina Trie.
//!
//! This module defines the reasons a trie or node operation can fail.

/// Errors that can occur in Mahina Trie operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MahinaTrieError {
    /// Error when an empty key is provided.
    #[error("Empty key not allowed")]
    EmptyKey,

    /// Error when a key is longer than the configured maximum.
    #[error("Key '{key}' exceeds maximum key length of {max_length}")]
    KeyTooLong {
        /// The key that was too long.
        key: String,
        /// The maximum allowed length in characters.
        max_length: usize,
    },

    /// Error when inserting a key that is already stored.
    #[error("Key already present: {0}")]
    DuplicateKey(String),

    /// Error when a key is not stored in the trie.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Error when the stored value has a different type than requested.
    #[error("Value for key '{key}' has type {actual}, expected {expected}")]
    TypeMismatch {
        /// The key that was looked up.
        key: String,
        /// The type requested by the caller.
        expected: &'static str,
        /// The type actually stored.
        actual: &'static str,
    },

    /// Error when attaching a child under a character that is already taken.
    #[error("Child node already exists for character {0:?}")]
    ChildExists(char),

    /// Error when a child's own key character differs from its map key.
    #[error("Child key character {actual:?} does not match slot {expected:?}")]
    KeyCharMismatch {
        /// The character the child was to be attached under.
        expected: char,
        /// The child's own key character.
        actual: char,
    },

    /// Error when converting a node that already carries a value.
    #[error("Node {0:?} already holds a value")]
    AlreadyTerminal(char),
}
