//! Mahina KV Library
//!
//! A concurrent, in-memory key-value store where keys are strings and values
//! may be of heterogeneous types, built on a character-indexed prefix tree.
//!
//! # Architecture
//!
//! Mahina KV is designed with the following principles in mind:
//! - Strict component boundaries
//! - A pure ownership tree: every node owns its children exclusively
//! - One coarse reader-writer lock per trie: parallel reads, exclusive writes
//! - Type-checked value retrieval without unsafe casts
//!
//! # Example
//!
//! ```
//! use mahina_kv::MahinaTrie;
//!
//! let trie = MahinaTrie::new();
//! assert!(trie.insert("answer", 42i32));
//! assert_eq!(trie.get::<i32>("answer"), Some(42));
//! assert_eq!(trie.get::<String>("answer"), None);
//! assert!(trie.remove("answer"));
//! ```

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

use std::path::Path;

pub use data_structures::{MahinaTrie, MahinaTrieConfig, MahinaTrieError, TrieValue};
pub use error::{MahinaError, MahinaResult};

/// Version information for Mahina KV.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Loads configuration (defaults, then `config_path` if given, then
/// `MAHINA__*` environment variables), installs the logging subscriber it
/// describes, and returns the configuration.
pub fn init(config_path: Option<&Path>) -> MahinaResult<config::MahinaConfig> {
    let loader = config::ConfigLoader::new(config_path, config::ENV_PREFIX);
    let config = loader.load()?;

    logging::init_logging(&config.log)?;
    tracing::info!(version = VERSION, "Mahina KV initialized");

    Ok(config)
}
