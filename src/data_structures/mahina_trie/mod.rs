//! Mahina Trie Implementation
//!
//! This module provides a concurrent, in-memory key-value store built on a
//! character-indexed prefix tree. Keys are strings; values may be of any
//! `Send + Sync` type and are checked against the requested type on lookup.
//!
//! # Concurrency Safety
//!
//! The whole tree sits behind a single reader-writer lock:
//!
//! * **Lookups** take the shared lock, so any number of them run in parallel.
//! * **Inserts and removals** take the exclusive lock for their full duration
//!   (traversal and mutation), so no reader ever observes a partially built
//!   or partially pruned subtree.
//!
//! The lock guard is released on every exit path, including unwinding.
//!
//! # Ownership
//!
//! Every node exclusively owns its children. Dropping the root releases the
//! whole tree, and removing a key drops every node that no longer leads to a
//! stored key.

mod config;
mod error;
mod node;
mod value;

use std::any::Any;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::{ConfigResult, Validate};

pub use config::{MahinaTrieConfig, DEFAULT_MAX_KEY_LENGTH};
pub use error::MahinaTrieError;
pub use node::{NodeKind, TrieNode};
pub use value::TrieValue;

/// Result type for Mahina Trie operations
pub type MahinaTrieResult<T> = Result<T, MahinaTrieError>;

/// Key character held by the root node. Never part of a key path.
const ROOT_KEY_CHAR: char = ' ';

/// Everything guarded by the trie lock.
#[derive(Debug)]
struct TrieState {
    /// The root node of the trie, always inner
    root: TrieNode,

    /// Number of stored keys
    len: usize,
}

impl TrieState {
    fn new() -> Self {
        Self {
            root: TrieNode::new(ROOT_KEY_CHAR),
            len: 0,
        }
    }
}

/// Mahina Trie is a concurrent key-value store keyed by strings.
///
/// Key features:
/// * Heterogeneous values with type-checked lookup
/// * Shared prefixes stored once
/// * Coarse reader-writer locking: parallel reads, exclusive writes
/// * Existing values are never overwritten
#[derive(Debug)]
pub struct MahinaTrie {
    /// Root node and key count behind the trie-wide lock
    state: RwLock<TrieState>,

    /// Configuration options
    config: MahinaTrieConfig,
}

impl MahinaTrie {
    /// Creates a new empty `MahinaTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(MahinaTrieConfig::default())
    }

    /// Creates a new empty `MahinaTrie` with the specified configuration.
    ///
    /// `config` is taken as is and must already have passed [`Validate`]. A
    /// `max_key_length` of 0 yields a trie that rejects every key; use
    /// [`MahinaTrie::try_with_config`] for configs built by hand.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the trie.
    pub fn with_config(config: MahinaTrieConfig) -> Self {
        debug!(max_key_length = config.max_key_length, "Creating Mahina trie");
        Self {
            state: RwLock::new(TrieState::new()),
            config,
        }
    }

    /// Validates `config`, then creates a new empty `MahinaTrie` with it.
    ///
    /// # Errors
    ///
    /// * `ValueOutOfRange` - `max_key_length` is 0.
    pub fn try_with_config(config: MahinaTrieConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Returns the configuration this trie was built with.
    pub fn config(&self) -> &MahinaTrieConfig {
        &self.config
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns `false` if the key is empty, too long, or already present.
    /// An existing value is never overwritten.
    pub fn insert<V>(&self, key: impl AsRef<str>, value: V) -> bool
    where
        V: Any + Send + Sync,
    {
        outcome("insert", self.try_insert(key, value)).is_some()
    }

    /// Removes `key` and its value, pruning nodes that no longer lead to a
    /// stored key.
    ///
    /// Returns `false` if the key is empty, too long, or not stored.
    pub fn remove(&self, key: impl AsRef<str>) -> bool {
        outcome("remove", self.try_remove(key)).is_some()
    }

    /// Looks up `key` and returns a clone of its value if it is stored with
    /// exactly type `T`.
    ///
    /// A stored value of another type is reported as not found.
    pub fn get<T>(&self, key: impl AsRef<str>) -> Option<T>
    where
        T: Any + Clone,
    {
        outcome("lookup", self.try_get(key))
    }

    /// Runs `f` against the value stored under `key` while holding the read
    /// lock, for values that are expensive or impossible to clone.
    ///
    /// `f` must not call back into this trie: a write deadlocks against the
    /// held read lock, and a nested read can deadlock behind a queued writer
    /// since the lock is not reentrant.
    pub fn with_value<T, R>(&self, key: impl AsRef<str>, f: impl FnOnce(&T) -> R) -> Option<R>
    where
        T: Any,
    {
        outcome("lookup", self.try_with_value(key, f))
    }

    /// Inserts `value` under `key`, reporting why the insert was rejected.
    ///
    /// # Errors
    ///
    /// * `EmptyKey` / `KeyTooLong` - the key is not acceptable.
    /// * `DuplicateKey` - the key is already stored; its value is kept.
    pub fn try_insert<V>(&self, key: impl AsRef<str>, value: V) -> MahinaTrieResult<()>
    where
        V: Any + Send + Sync,
    {
        let key = key.as_ref();
        let chars = self.key_chars(key)?;
        let (&last, prefix) = chars.split_last().ok_or(MahinaTrieError::EmptyKey)?;

        let mut state = self.state.write();
        let mut node = &mut state.root;

        // Inner nodes along the prefix are shared with other keys.
        for &c in prefix {
            node = node.child_or_insert(c);
        }

        match node.get_child(last) {
            Some(existing) if existing.is_terminal() => {
                return Err(MahinaTrieError::DuplicateKey(key.to_string()));
            }
            Some(existing) => {
                existing.convert_to_value_node(TrieValue::new(value))?;
            }
            None => {
                node.insert_child(last, TrieNode::with_value(last, TrieValue::new(value)))?;
            }
        }

        state.len += 1;
        trace!(key, len = state.len, "Inserted key");
        Ok(())
    }

    /// Removes `key`, reporting why the removal failed.
    ///
    /// # Errors
    ///
    /// * `EmptyKey` / `KeyTooLong` - the key is not acceptable.
    /// * `KeyNotFound` - the key is not stored.
    pub fn try_remove(&self, key: impl AsRef<str>) -> MahinaTrieResult<()> {
        let key = key.as_ref();
        let chars = self.key_chars(key)?;

        let mut state = self.state.write();
        if !remove_path(&mut state.root, &chars) {
            return Err(MahinaTrieError::KeyNotFound(key.to_string()));
        }

        state.len -= 1;
        trace!(key, len = state.len, "Removed key");
        Ok(())
    }

    /// Looks up `key`, reporting why the lookup failed.
    ///
    /// # Errors
    ///
    /// * `EmptyKey` / `KeyTooLong` - the key is not acceptable.
    /// * `KeyNotFound` - the key is not stored.
    /// * `TypeMismatch` - the stored value is not a `T`.
    pub fn try_get<T>(&self, key: impl AsRef<str>) -> MahinaTrieResult<T>
    where
        T: Any + Clone,
    {
        self.try_with_value(key, |value: &T| value.clone())
    }

    /// Runs `f` against the value stored under `key` while holding the read
    /// lock, reporting why the lookup failed.
    ///
    /// The same reentrancy rule as [`MahinaTrie::with_value`] applies to `f`.
    pub fn try_with_value<T, R>(
        &self,
        key: impl AsRef<str>,
        f: impl FnOnce(&T) -> R,
    ) -> MahinaTrieResult<R>
    where
        T: Any,
    {
        let key = key.as_ref();
        let chars = self.key_chars(key)?;

        let state = self.state.read();
        let value = find(&state.root, &chars)
            .and_then(TrieNode::value)
            .ok_or_else(|| MahinaTrieError::KeyNotFound(key.to_string()))?;

        let typed = value
            .downcast_ref::<T>()
            .ok_or_else(|| MahinaTrieError::TypeMismatch {
                key: key.to_string(),
                expected: std::any::type_name::<T>(),
                actual: value.type_name(),
            })?;

        Ok(f(typed))
    }

    /// Checks if `key` is stored, whatever the type of its value.
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        let Ok(chars) = self.key_chars(key.as_ref()) else {
            return false;
        };

        let state = self.state.read();
        find(&state.root, &chars).is_some_and(TrieNode::is_terminal)
    }

    /// Returns the type name of the value stored under `key`.
    pub fn value_type_name(&self, key: impl AsRef<str>) -> Option<&'static str> {
        let chars = self.key_chars(key.as_ref()).ok()?;

        let state = self.state.read();
        find(&state.root, &chars)
            .and_then(TrieNode::value)
            .map(TrieValue::type_name)
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.state.read().len
    }

    /// Checks if the trie holds no nodes besides the root.
    pub fn is_empty(&self) -> bool {
        !self.state.read().root.has_any_children()
    }

    /// Returns the number of nodes below the root.
    ///
    /// This walks the whole tree under the read lock, so it is O(n).
    pub fn node_count(&self) -> usize {
        self.state.read().root.descendant_count()
    }

    /// Drops every stored key and value.
    pub fn clear(&self) {
        let mut state = self.state.write();
        let dropped = state.len;
        *state = TrieState::new();
        debug!(dropped, "Cleared Mahina trie");
    }

    /// Splits `key` into characters, rejecting empty and overlong keys.
    fn key_chars(&self, key: &str) -> MahinaTrieResult<Vec<char>> {
        if key.is_empty() {
            return Err(MahinaTrieError::EmptyKey);
        }

        let chars: Vec<char> = key.chars().collect();
        if chars.len() > self.config.max_key_length {
            return Err(MahinaTrieError::KeyTooLong {
                key: key.to_string(),
                max_length: self.config.max_key_length,
            });
        }

        Ok(chars)
    }
}

impl Default for MahinaTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Follows `chars` down from `node`.
fn find<'a>(node: &'a TrieNode, chars: &[char]) -> Option<&'a TrieNode> {
    chars.iter().try_fold(node, |node, &c| node.child(c))
}

/// Post-order removal of the key spelled by `chars` below `node`.
///
/// Returns `false`, leaving the tree untouched, if the key is not stored.
/// On the way back up, every child that neither ends a key nor has children
/// is detached from its parent.
fn remove_path(node: &mut TrieNode, chars: &[char]) -> bool {
    let Some((&c, rest)) = chars.split_first() else {
        return true;
    };
    let Some(child) = node.get_child(c) else {
        return false;
    };

    if rest.is_empty() {
        if child.clear_value().is_none() {
            return false;
        }
    } else if !remove_path(child, rest) {
        return false;
    }

    if !child.is_terminal() && !child.has_any_children() {
        node.remove_child(c);
    }
    true
}

/// Converts a `try_*` result into the boolean/`Option` surface, tracing the
/// reason for a failure.
fn outcome<T>(operation: &'static str, result: MahinaTrieResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            trace!(operation, %error, "Trie operation rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::config::ConfigError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{mpsc, Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_trie_basic_operations() {
        let trie = MahinaTrie::new();

        // Test initial state
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);

        // Test insertion
        assert!(trie.insert("hello", "world".to_string()));
        assert_eq!(trie.len(), 1);
        assert!(!trie.is_empty());

        // Test retrieval
        assert_eq!(trie.get::<String>("hello"), Some("world".to_string()));
        assert!(trie.contains("hello"));
        assert_eq!(trie.get::<String>("nonexistent"), None);
        assert!(!trie.contains("nonexistent"));

        // Test that the first value wins
        assert!(!trie.insert("hello", "planet".to_string()));
        assert_eq!(trie.get::<String>("hello"), Some("world".to_string()));

        // Test removal
        assert!(trie.remove("hello"));
        assert!(trie.is_empty());
        assert!(!trie.remove("hello"));
        assert_eq!(trie.len(), 0);
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let trie = MahinaTrie::new();

        assert!(!trie.insert("", 1u32));
        assert_eq!(trie.get::<u32>(""), None);
        assert!(!trie.remove(""));
        assert_eq!(trie.try_insert("", 1u32), Err(MahinaTrieError::EmptyKey));
        assert_eq!(trie.try_remove(""), Err(MahinaTrieError::EmptyKey));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_heterogeneous_values() {
        let trie = MahinaTrie::new();

        assert!(trie.insert("int", 42i32));
        assert!(trie.insert("float", 1.5f64));
        assert!(trie.insert("text", String::from("mahina")));
        assert!(trie.insert("list", vec![1u8, 2, 3]));

        assert_eq!(trie.get::<i32>("int"), Some(42));
        assert_eq!(trie.get::<f64>("float"), Some(1.5));
        assert_eq!(trie.get::<String>("text"), Some("mahina".to_string()));
        assert_eq!(trie.get::<Vec<u8>>("list"), Some(vec![1, 2, 3]));
        assert_eq!(trie.value_type_name("int"), Some("i32"));
    }

    #[test]
    fn test_type_mismatch_is_not_found() {
        let trie = MahinaTrie::new();
        assert!(trie.insert("x", 42i32));

        assert_eq!(trie.get::<String>("x"), None);
        assert_eq!(trie.get::<i64>("x"), None);
        assert!(trie.contains("x"));

        assert_eq!(
            trie.try_get::<String>("x"),
            Err(MahinaTrieError::TypeMismatch {
                key: "x".to_string(),
                expected: std::any::type_name::<String>(),
                actual: "i32",
            })
        );
    }

    #[test]
    fn test_prefix_keys_coexist() {
        let trie = MahinaTrie::new();

        assert!(trie.insert("app", 1u32));
        assert!(trie.insert("apple", 2u32));
        assert!(trie.insert("applepie", 3u32));

        assert!(trie.remove("apple"));

        assert_eq!(trie.get::<u32>("app"), Some(1));
        assert_eq!(trie.get::<u32>("applepie"), Some(3));
        assert_eq!(trie.get::<u32>("apple"), None);
        assert!(!trie.contains("apple"));
        assert_eq!(trie.len(), 2);

        // "apple" path stays for "applepie"
        assert_eq!(trie.node_count(), "applepie".len());
    }

    #[test]
    fn test_insert_prefix_of_existing_key() {
        let trie = MahinaTrie::new();

        assert!(trie.insert("applepie", 'p'));
        assert!(!trie.contains("apple"));
        assert_eq!(trie.node_count(), 8);

        // Converts the inner node in place
        assert!(trie.insert("apple", 'a'));
        assert_eq!(trie.node_count(), 8);
        assert_eq!(trie.get::<char>("apple"), Some('a'));
        assert_eq!(trie.get::<char>("applepie"), Some('p'));
    }

    #[test]
    fn test_remove_prunes_dangling_nodes() {
        let trie = MahinaTrie::new();

        assert!(trie.insert("cat", 1u8));
        assert_eq!(trie.node_count(), 3);
        assert!(trie.remove("cat"));
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
    }

    #[test]
    fn test_remove_keeps_terminal_ancestor() {
        let trie = MahinaTrie::new();

        assert!(trie.insert("a", 1u8));
        assert!(trie.insert("abc", 2u8));
        assert!(trie.remove("abc"));

        assert_eq!(trie.get::<u8>("a"), Some(1));
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_remove_inner_prefix_fails() {
        let trie = MahinaTrie::new();

        assert!(trie.insert("abc", 1u8));
        assert_eq!(
            trie.try_remove("ab"),
            Err(MahinaTrieError::KeyNotFound("ab".to_string()))
        );
        assert_eq!(
            trie.try_remove("abcd"),
            Err(MahinaTrieError::KeyNotFound("abcd".to_string()))
        );
        assert_eq!(trie.get::<u8>("abc"), Some(1));
        assert_eq!(trie.node_count(), 3);
    }

    #[test]
    fn test_key_too_long() {
        let trie = MahinaTrie::with_config(MahinaTrieConfig::new().with_max_key_length(4));

        assert!(trie.insert("four", 4u8));
        assert_eq!(
            trie.try_insert("fives", 5u8),
            Err(MahinaTrieError::KeyTooLong {
                key: "fives".to_string(),
                max_length: 4,
            })
        );
        assert!(!trie.contains("fives"));
        assert_eq!(trie.config().max_key_length, 4);
    }

    #[test]
    fn test_unicode_keys() {
        let trie = MahinaTrie::new();

        assert!(trie.insert("mahina", 1u8));
        assert!(trie.insert("māhina", 2u8));
        assert!(trie.insert("月", 3u8));

        assert_eq!(trie.get::<u8>("mahina"), Some(1));
        assert_eq!(trie.get::<u8>("māhina"), Some(2));
        assert_eq!(trie.get::<u8>("月"), Some(3));
        assert_eq!(trie.node_count(), 6 + 5 + 1);
    }

    #[test]
    fn test_with_value_borrows() {
        let trie = MahinaTrie::new();
        assert!(trie.insert("blob", vec![0u8; 64]));

        assert_eq!(trie.with_value("blob", |v: &Vec<u8>| v.len()), Some(64));
        assert_eq!(trie.with_value("blob", |v: &String| v.len()), None);
    }

    #[test]
    fn test_clear() {
        let trie = MahinaTrie::new();
        for key in ["a", "ab", "b"] {
            assert!(trie.insert(key, ()));
        }

        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert!(trie.insert("a", ()));
    }

    #[test]
    fn test_try_with_config_validates() {
        let error = MahinaTrie::try_with_config(MahinaTrieConfig::new().with_max_key_length(0))
            .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::ValueOutOfRange { ref key, .. } if key == "trie.max_key_length"
        ));

        let trie = MahinaTrie::try_with_config(MahinaTrieConfig::new().with_max_key_length(3))
            .unwrap();
        assert!(trie.insert("abc", 1u8));
        assert!(!trie.insert("abcd", 2u8));
    }

    /// Readers inside the lock at the same time must not block each other.
    #[test]
    fn test_readers_run_in_parallel() {
        let trie = Arc::new(MahinaTrie::new());
        assert!(trie.insert("left", 1u32));
        assert!(trie.insert("right", 2u32));

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = ["left", "right"]
            .into_iter()
            .map(|key| {
                let trie = Arc::clone(&trie);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    // Both closures run under the read lock; the barrier only
                    // opens if both are inside at once.
                    trie.with_value(key, |value: &u32| {
                        barrier.wait();
                        *value
                    })
                })
            })
            .collect();

        let values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(values, vec![Some(1), Some(2)]);
    }

    /// A writer waits for the in-flight reader to finish.
    #[test]
    fn test_writer_waits_for_reader() {
        let trie = Arc::new(MahinaTrie::new());
        assert!(trie.insert("held", 0u32));

        let reader_done = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let reader = {
            let trie = Arc::clone(&trie);
            let reader_done = Arc::clone(&reader_done);
            thread::spawn(move || {
                trie.with_value("held", |_: &u32| {
                    tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(100));
                    reader_done.store(true, Ordering::SeqCst);
                })
            })
        };

        rx.recv().unwrap();
        assert!(trie.insert("other", 1u32));
        assert!(reader_done.load(Ordering::SeqCst));

        assert_eq!(reader.join().unwrap(), Some(()));
    }

    /// A lookup waits for the in-flight writer to release the lock.
    #[test]
    fn test_reader_waits_for_writer() {
        let trie = Arc::new(MahinaTrie::new());
        assert!(trie.insert("held", 7u8));

        let guard = trie.state.write();
        let reader_done = Arc::new(AtomicBool::new(false));

        let reader = {
            let trie = Arc::clone(&trie);
            let reader_done = Arc::clone(&reader_done);
            thread::spawn(move || {
                let value = trie.get::<u8>("held");
                reader_done.store(true, Ordering::SeqCst);
                value
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!reader_done.load(Ordering::SeqCst));

        drop(guard);
        assert_eq!(reader.join().unwrap(), Some(7));
        assert!(reader_done.load(Ordering::SeqCst));
    }
}
