// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rivulet Types — Shared contracts.
//!
//! The error taxonomy, identifiers and validation trait used by every
//! Rivulet crate.
//!
//! # Design
//!
//! - One error enum, every variant carries an `ErrorContext`
//! - Type-safe IDs for log correlation
//! - Validation-ready schemas via the `Validate` trait
//!
//! # Quick Start
//!
//! ```
//! use rivulet_types::prelude::*;
//!
//! let err = RivuletError::unsupported("push", "FrozenList");
//! assert_eq!(err.error_code(), "UNS-001");
//! ```

mod error;
mod id;
mod validate;

/// Common imports for working with Rivulet types.
pub mod prelude;

pub use error::{BoxedError, ErrorContext, ErrorContextBuilder, Result, RivuletError, Severity};
pub use id::ViewId;
pub use validate::Validate;
