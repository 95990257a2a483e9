//! Test modules for Mahina KV.
//!
//! This module contains the crate-internal testing infrastructure:
//! - Configuration loading and validation tests
//! - Error type tests
//! - Property-based tests for the trie using proptest
//! - Shared fixtures and strategies
//!
//! Module-level unit tests live next to the code they cover; cross-thread
//! behavior of the public API is covered by the integration tests in `tests/`.


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{key_strategy, keys_strategy, TestFixture};
