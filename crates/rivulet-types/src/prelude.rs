// SPDX-License-Identifier: MIT OR Apache-2.0
//! Common imports for working with Rivulet types.

// Error handling
pub use crate::error::{ErrorContext, Result, RivuletError, Severity};

// IDs
pub use crate::id::ViewId;

// Traits
pub use crate::validate::Validate;
