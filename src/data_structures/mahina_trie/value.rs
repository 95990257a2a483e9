// Copyright (c) 2025 Mahina KV Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Type-tagged value storage for terminal trie nodes.
//!
//! A [`TrieValue`] owns a value of any `Send + Sync` type together with the
//! name of that type. Recovering the concrete value is a checked downcast, so
//! asking a node for the wrong type yields `None` instead of undefined behavior.

use std::any::{Any, TypeId};
use std::fmt;

/// A type-erased value carried by a terminal node.
pub struct TrieValue {
    type_name: &'static str,
    inner: Box<dyn Any + Send + Sync>,
}

impl TrieValue {
    /// Wraps `value`, recording its type.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Box::new(value),
        }
    }

    /// Returns `true` if the stored value is exactly of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().type_id() == TypeId::of::<T>()
    }

    /// Borrows the stored value as `T` if the types match.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Consumes the container, returning the value as `T`, or the container
    /// itself when the types differ.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|inner| Self { type_name, inner })
    }

    /// Name of the stored type, as reported by [`std::any::type_name`].
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for TrieValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
