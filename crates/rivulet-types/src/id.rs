// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type-safe identifiers.
//!
//! `ViewId` tags each lazy view so that log lines and errors from one view
//! can be correlated.
//!
//! ```
//! use rivulet_types::ViewId;
//!
//! let id = ViewId::new();
//! let parsed: ViewId = id.to_string().parse().unwrap();
//! assert_eq!(id, parsed);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{ErrorContext, RivuletError, Severity};

/// Identifier of a lazy view.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(Uuid);

impl ViewId {
    /// Generate a new random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewId({})", self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ViewId {
    type Err = RivuletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| RivuletError::ValidationFailed {
                context: ErrorContext::builder()
                    .error_code("VAL-010")
                    .component("rivulet-types")
                    .severity(Severity::Error)
                    .remediation_hint("Provide a valid UUID for ViewId")
                    .build()
                    .unwrap_or_default(),
                field: Some("ViewId".into()),
                message: format!("Invalid UUID format: {e}"),
            })
    }
}
