//! Data structures for Mahina KV.
//!
//! This module contains the concurrent data structures the store is built on.
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Pure ownership trees, no shared or weak references between nodes
//! - Explicit locking discipline documented per structure

pub mod mahina_trie;

// Re-export common data structures
pub use mahina_trie::{MahinaTrie, MahinaTrieConfig, MahinaTrieError, MahinaTrieResult, TrieValue};
