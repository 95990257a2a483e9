// Copyright (c) 2025 Mahina KV Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the Mahina Trie.

use serde::{Deserialize, Serialize};

/// Default maximum key length, in characters.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 1024;

/// Configuration for the Mahina Trie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MahinaTrieConfig {
    /// Maximum key length in characters.
    /// Also bounds the recursion depth of removal.
    pub max_key_length: usize,
}

impl MahinaTrieConfig {
    /// Creates a new configuration with default values.
    ///
    /// Default values:
    /// - max_key_length: 1024
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum key length in characters.
    pub fn with_max_key_length(mut self, max_key_length: usize) -> Self {
        self.max_key_length = max_key_length;
        self
    }
}

impl Default for MahinaTrieConfig {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
        }
    }
}
