// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lazy views.
//!
//! A view is a handle to a [`LiveList`] plus a composed pipeline of stages.
//! Nothing is read until a terminal operation runs; at that point the view
//! reads whatever the list holds *then*, not what it held when the view was
//! created.
//!
//! Terminal operations check a consumed flag. Under
//! [`ConsumptionPolicy::SingleUse`] the second terminal call fails with
//! `AlreadyConsumed`; under [`ConsumptionPolicy::Replayable`] every call
//! re-reads the live list.

use rivulet_core::{ConsumptionPolicy, ViewConfig};
use rivulet_types::{Result, RivuletError, ViewId};
use std::cell::Cell;
use std::fmt;

use crate::frozen::FrozenList;
use crate::live_list::LiveList;

type Stage<S, T> = Box<dyn Fn(&S) -> Option<T>>;

/// Deferred pipeline over a live list, producing `T` from source items `S`.
pub struct LazyView<S, T> {
    id: ViewId,
    source: LiveList<S>,
    stage: Stage<S, T>,
    stage_count: usize,
    config: ViewConfig,
    consumed: Cell<bool>,
}

impl<S: Clone + 'static> LazyView<S, S> {
    pub(crate) fn new(source: LiveList<S>, config: ViewConfig) -> Self {
        let id = ViewId::new();
        tracing::debug!(
            view_id = %id,
            label = config.label.as_deref().unwrap_or("-"),
            consumption = %config.consumption,
            "created lazy view"
        );
        Self {
            id,
            source,
            stage: Box::new(|item: &S| Some(item.clone())),
            stage_count: 0,
            config,
            consumed: Cell::new(false),
        }
    }
}

impl<S: 'static, T: 'static> LazyView<S, T> {
    /// Transform each element. Runs only at realization.
    pub fn map<U, F>(self, f: F) -> LazyView<S, U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let prev = self.stage;
        LazyView {
            id: self.id,
            source: self.source,
            stage: Box::new(move |item: &S| prev(item).map(&f)),
            stage_count: self.stage_count + 1,
            config: self.config,
            consumed: self.consumed,
        }
    }

    /// Keep elements matching `predicate`. Runs only at realization.
    pub fn filter<P>(self, predicate: P) -> LazyView<S, T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let prev = self.stage;
        LazyView {
            id: self.id,
            source: self.source,
            stage: Box::new(move |item: &S| prev(item).filter(|value| predicate(value))),
            stage_count: self.stage_count + 1,
            config: self.config,
            consumed: self.consumed,
        }
    }

    /// Realize into an unmodifiable [`FrozenList`].
    ///
    /// # Errors
    ///
    /// `AlreadyConsumed` on a second call under the single-use policy.
    pub fn collect_frozen(&self) -> Result<FrozenList<T>> {
        self.drive("collect_frozen", |iter| iter.collect())
    }

    /// Realize into an ordinary, modifiable `Vec`.
    ///
    /// # Errors
    ///
    /// `AlreadyConsumed` on a second call under the single-use policy.
    pub fn collect_vec(&self) -> Result<Vec<T>> {
        self.drive("collect_vec", |iter| iter.collect())
    }

    /// Count the elements the pipeline would produce.
    ///
    /// # Errors
    ///
    /// `AlreadyConsumed` on a second call under the single-use policy.
    pub fn count(&self) -> Result<usize> {
        self.drive("count", |iter| iter.count())
    }

    /// Whether a terminal operation has already run.
    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Identifier used in log events and errors.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Number of `map`/`filter` stages applied.
    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    /// Consumption policy fixed at creation.
    pub fn policy(&self) -> ConsumptionPolicy {
        self.config.consumption
    }

    /// Optional label from the config.
    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    fn drive<R>(
        &self,
        operation: &'static str,
        sink: impl FnOnce(&mut dyn Iterator<Item = T>) -> R,
    ) -> Result<R> {
        if self.consumed.replace(true) && self.config.consumption == ConsumptionPolicy::SingleUse {
            tracing::warn!(view_id = %self.id, operation, "view already consumed");
            return Err(RivuletError::already_consumed(self.id.to_string()));
        }
        let stage = &self.stage;
        let (source_len, out) = self.source.with_items(|items| {
            let mut iter = items.iter().filter_map(|item| stage(item));
            (items.len(), sink(&mut iter))
        });
        tracing::debug!(
            view_id = %self.id,
            label = self.label().unwrap_or("-"),
            operation,
            source_len,
            stages = self.stage_count,
            "realized lazy view"
        );
        Ok(out)
    }
}

impl<S, T> fmt::Debug for LazyView<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("id", &self.id)
            .field("stage_count", &self.stage_count)
            .field("config", &self.config)
            .field("consumed", &self.consumed.get())
            .finish_non_exhaustive()
    }
}
