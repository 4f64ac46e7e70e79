// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unmodifiable realized sequence.
//!
//! Reads go through `Deref<Target = [T]>`. Every `try_*` mutator exists only
//! to reject the request with `UnsupportedOperation`, so code ported from
//! mutable-list APIs fails loudly instead of silently editing a copy.

use rivulet_types::{Result, RivuletError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

const TARGET: &str = "FrozenList";

/// Read-only ordered sequence produced by realizing a view.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FrozenList<T> {
    items: Arc<[T]>,
}

impl<T> FrozenList<T> {
    /// Empty sequence.
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Modifiable copy.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }

    /// Always fails.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation`.
    pub fn try_push(&mut self, _item: T) -> Result<()> {
        Err(self.reject("push"))
    }

    /// Always fails.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation`.
    pub fn try_insert(&mut self, _index: usize, _item: T) -> Result<()> {
        Err(self.reject("insert"))
    }

    /// Always fails.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation`.
    pub fn try_remove(&mut self, _index: usize) -> Result<T> {
        Err(self.reject("remove"))
    }

    /// Always fails, even when `value` is absent.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation`.
    pub fn try_remove_value<Q: ?Sized>(&mut self, _value: &Q) -> Result<bool> {
        Err(self.reject("remove"))
    }

    /// Always fails, even when already empty.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation`.
    pub fn try_clear(&mut self) -> Result<()> {
        Err(self.reject("clear"))
    }

    /// Always fails.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation`.
    pub fn try_set(&mut self, _index: usize, _item: T) -> Result<T> {
        Err(self.reject("set"))
    }

    fn reject(&self, operation: &'static str) -> RivuletError {
        tracing::warn!(operation, len = self.items.len(), "mutation rejected by frozen list");
        RivuletError::unsupported(operation, TARGET)
    }
}

impl<T> Default for FrozenList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Deref for FrozenList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> AsRef<[T]> for FrozenList<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for FrozenList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> FromIterator<T> for FrozenList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a FrozenList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for FrozenList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for FrozenList<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.items[..] == other[..]
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for FrozenList<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.items[..] == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for FrozenList<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.items[..] == other[..]
    }
}

impl<T: Serialize> Serialize for FrozenList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FrozenList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}
