// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rivulet Stream — Lazy views over live lists.
//!
//! A [`LazyView`] holds a handle to a [`LiveList`], not a copy of it.
//! Edits made to the list after the view is created but before it is
//! realized show up in the realized [`FrozenList`], in the list's final
//! order. The realized list rejects every mutation with
//! `UnsupportedOperation`.
//!
//! # Design
//! - Single-threaded: `LiveList` is an `Rc<RefCell<_>>` handle and is `!Send`.
//! - Stages (`map`, `filter`) run only inside a terminal operation.
//! - Mutating the list from inside a stage fails with `SourceBusy`.
//!
//! # Quick Start
//!
//! ```
//! use rivulet_stream::LiveList;
//!
//! let animals = LiveList::from(vec!["cat", "tiger", "dog"]);
//! let view = animals.view();
//!
//! animals.push("elephant").unwrap();
//! animals.remove_value(&"tiger").unwrap();
//!
//! let mut realized = view.collect_frozen().unwrap();
//! assert_eq!(realized, ["cat", "dog", "elephant"]);
//! assert!(realized.try_push("lion").unwrap_err().is_unsupported());
//! ```

mod frozen;
mod live_list;
mod view;

pub use frozen::FrozenList;
pub use live_list::LiveList;
pub use view::LazyView;

pub use rivulet_core::{ConsumptionPolicy, ViewConfig};
pub use rivulet_types::{Result, RivuletError};
