//! Error module for Mahina KV.
//!
//! Trie operations report failures through their return values (see
//! [`MahinaTrieError`]). This module covers the layers around the trie:
//! configuration loading and logging setup.

use thiserror::Error;

use crate::data_structures::MahinaTrieError;

pub mod config;

/// Result type alias used throughout Mahina KV.
pub type MahinaResult<T> = Result<T, MahinaError>;

/// Core error enum for Mahina KV.
#[derive(Error, Debug)]
pub enum MahinaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A trie operation failed where the caller asked for the reason.
    #[error("Trie error: {0}")]
    Trie(#[from] MahinaTrieError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
