// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared, mutable, ordered list.
//!
//! A `LiveList` is a cheap handle: cloning it clones the `Rc`, never the
//! elements. Every handle and every view created from any handle observe the
//! same storage.
//!
//! Element code (`PartialEq`, `Clone`, `Drop`) only runs under a shared
//! borrow or after the mutable borrow is released: reads from inside it
//! succeed, writes report `SourceBusy`.

use rivulet_core::ViewConfig;
use rivulet_types::{Result, RivuletError};
use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::view::LazyView;

/// Ordered list shared between handles and the views built on it.
pub struct LiveList<T> {
    inner: Rc<RefCell<Vec<T>>>,
}

impl<T> LiveList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append to the end.
    ///
    /// # Errors
    ///
    /// `SourceBusy` if called while a view is realizing this list.
    pub fn push(&self, item: T) -> Result<()> {
        let mut items = self.borrow_mut("push")?;
        items.push(item);
        tracing::trace!(len = items.len(), "live list push");
        Ok(())
    }

    /// Insert at `index`, shifting later elements right. `index == len`
    /// appends.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` when `index > len`, `SourceBusy` during realization.
    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        let mut items = self.borrow_mut("insert")?;
        if index > items.len() {
            return Err(RivuletError::index_out_of_bounds(index, items.len()));
        }
        items.insert(index, item);
        tracing::trace!(index, len = items.len(), "live list insert");
        Ok(())
    }

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` when `index >= len`, `SourceBusy` during realization.
    pub fn remove_at(&self, index: usize) -> Result<T> {
        let mut items = self.borrow_mut("remove")?;
        if index >= items.len() {
            return Err(RivuletError::index_out_of_bounds(index, items.len()));
        }
        let removed = items.remove(index);
        tracing::trace!(index, len = items.len(), "live list remove_at");
        drop(items);
        Ok(removed)
    }

    /// Remove the first element equal to `value`. Returns whether one was
    /// found; later duplicates are left in place.
    ///
    /// # Errors
    ///
    /// `SourceBusy` during realization.
    pub fn remove_value<Q>(&self, value: &Q) -> Result<bool>
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        let position = self.inner.borrow().iter().position(|item| item == value);
        let Some(index) = position else {
            return Ok(false);
        };
        let mut items = self.borrow_mut("remove")?;
        let removed = items.remove(index);
        tracing::trace!(index, len = items.len(), "live list remove_value");
        drop(items);
        drop(removed);
        Ok(true)
    }

    /// Remove every element.
    ///
    /// # Errors
    ///
    /// `SourceBusy` during realization.
    pub fn clear(&self) -> Result<()> {
        let removed = std::mem::take(&mut *self.borrow_mut("clear")?);
        tracing::trace!(removed = removed.len(), "live list clear");
        drop(removed);
        Ok(())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// True when the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// True if any element equals `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        self.inner.borrow().iter().any(|item| item == value)
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.borrow().clone()
    }

    /// Number of live handles to the storage, views included.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Lazy view with the default configuration.
    pub fn view(&self) -> LazyView<T, T>
    where
        T: Clone + 'static,
    {
        self.view_with(ViewConfig::default())
    }

    /// Lazy view with an explicit configuration.
    pub fn view_with(&self, config: ViewConfig) -> LazyView<T, T>
    where
        T: Clone + 'static,
    {
        LazyView::new(self.clone(), config)
    }

    /// Run `f` over the current contents while holding a shared borrow.
    /// Mutations attempted from inside `f` fail with `SourceBusy`.
    pub(crate) fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.borrow())
    }

    fn borrow_mut(&self, operation: &'static str) -> Result<RefMut<'_, Vec<T>>> {
        self.inner.try_borrow_mut().map_err(|_| {
            tracing::warn!(operation, "live list mutated during realization");
            RivuletError::source_busy(operation)
        })
    }
}

impl<T> Clone for LiveList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for LiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for LiveList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(items)),
        }
    }
}

impl<T> FromIterator<T> for LiveList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for LiveList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(items) => f.debug_tuple("LiveList").field(&*items).finish(),
            Err(_) => f.write_str("LiveList(<busy>)"),
        }
    }
}
