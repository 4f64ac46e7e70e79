// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unified error taxonomy for Rivulet.
//!
//! Every error carries an [`ErrorContext`] so that log lines and test
//! assertions can key on a stable code. The grep-friendly format
//! `[RIVULET-{CATEGORY}-{CODE}]` enables log analysis.
//!
//! # Error Codes
//!
//! | Prefix | Category |
//! |--------|----------|
//! | UNS | Unsupported operation on an unmodifiable sequence |
//! | CON | View already consumed |
//! | BSY | Source list busy during realization |
//! | IDX | Index out of bounds |
//! | VAL | Validation failures |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Underlying cause kept on an error, shareable across threads.
pub type BoxedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// How serious a failure is.
///
/// Misuse that leaves every list and view intact (a repeated terminal
/// operation, a write during realization) is a `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The requested operation did not happen.
    #[default]
    Error,
    /// Rejected call, no state changed.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Code, origin and hint carried by every [`RivuletError`].
///
/// Compare errors by `error_code`; the `source` field rules out `PartialEq`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Stable code, e.g. `UNS-001`.
    pub error_code: String,
    /// Crate that raised the error.
    pub component: String,
    /// Id of the view involved, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// See [`Severity`].
    pub severity: Severity,
    /// What the caller should do instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_hint: Option<String>,
    /// Lower-level failure (I/O, JSON) this error wraps. Not serialized.
    #[serde(skip)]
    pub source: Option<BoxedError>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            error_code: "UNKNOWN".into(),
            component: "unknown".into(),
            correlation_id: None,
            severity: Severity::Error,
            remediation_hint: None,
            source: None,
        }
    }
}

impl ErrorContext {
    /// Start building a context field by field.
    pub fn builder() -> ErrorContextBuilder {
        ErrorContextBuilder::default()
    }

    /// Context with a code, the crate that raised it and a hint.
    pub fn new(
        error_code: impl Into<String>,
        component: impl Into<String>,
        remediation_hint: impl Into<String>,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            component: component.into(),
            remediation_hint: Some(remediation_hint.into()),
            ..Self::default()
        }
    }

    /// Tag with a view id.
    pub fn with_correlation(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Field-by-field construction of an [`ErrorContext`]; code and component are
/// mandatory.
#[derive(Debug, Default)]
pub struct ErrorContextBuilder {
    error_code: Option<String>,
    component: Option<String>,
    correlation_id: Option<String>,
    severity: Severity,
    remediation_hint: Option<String>,
    source: Option<BoxedError>,
}

impl ErrorContextBuilder {
    /// Error code such as `VAL-010`.
    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Crate raising the error.
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// View id the error relates to.
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Severity, `Error` unless set.
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Hint shown to the caller.
    pub fn remediation_hint(mut self, hint: impl Into<String>) -> Self {
        self.remediation_hint = Some(hint.into());
        self
    }

    /// Wrap a lower-level error, reachable through `Error::source`.
    pub fn source(mut self, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(err));
        self
    }

    /// `None` when the code or the component is missing.
    pub fn build(self) -> Option<ErrorContext> {
        Some(ErrorContext {
            error_code: self.error_code?,
            component: self.component?,
            correlation_id: self.correlation_id,
            severity: self.severity,
            remediation_hint: self.remediation_hint,
            source: self.source,
        })
    }
}

/// Unified error type for all Rivulet operations.
///
/// Display format: `[RIVULET-{CODE}] {message}` for grep-friendly logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)] // Variant fields documented at variant level
pub enum RivuletError {
    /// Mutation attempted on an unmodifiable sequence.
    ///
    /// Fields: `context`, `operation`, `target`
    UnsupportedOperation {
        context: ErrorContext,
        operation: String,
        target: String,
    },

    /// A single-use view was realized a second time.
    ///
    /// Fields: `context`, `view_id`
    AlreadyConsumed { context: ErrorContext, view_id: String },

    /// The source list is borrowed by an in-progress realization.
    ///
    /// Fields: `context`, `operation`
    SourceBusy {
        context: ErrorContext,
        operation: String,
    },

    /// Positional access outside the list bounds.
    ///
    /// Fields: `context`, `index`, `len`
    IndexOutOfBounds {
        context: ErrorContext,
        index: usize,
        len: usize,
    },

    /// Input validation failed.
    ///
    /// Fields: `context`, `field`, `message`
    ValidationFailed {
        context: ErrorContext,
        field: Option<String>,
        message: String,
    },
}

impl RivuletError {
    /// Mutation rejected by an unmodifiable sequence.
    pub fn unsupported(operation: impl Into<String>, target: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            context: ErrorContext::new(
                "UNS-001",
                "rivulet-stream",
                "Realized sequences are read-only; copy with to_vec() before editing",
            ),
            operation: operation.into(),
            target: target.into(),
        }
    }

    /// Terminal operation invoked on an exhausted single-use view.
    pub fn already_consumed(view_id: impl Into<String>) -> Self {
        let view_id = view_id.into();
        Self::AlreadyConsumed {
            context: ErrorContext::new(
                "CON-001",
                "rivulet-stream",
                "Create a new view, or configure the replayable consumption policy",
            )
            .with_correlation(view_id.clone())
            .with_severity(Severity::Warning),
            view_id,
        }
    }

    /// Source list mutated while a realization is reading it.
    pub fn source_busy(operation: impl Into<String>) -> Self {
        Self::SourceBusy {
            context: ErrorContext::new(
                "BSY-001",
                "rivulet-stream",
                "Mutate the list before or after realizing a view, not from inside a stage",
            )
            .with_severity(Severity::Warning),
            operation: operation.into(),
        }
    }

    /// Index outside `0..=len` (insert) or `0..len` (remove).
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            context: ErrorContext::new("IDX-001", "rivulet-stream", "Check the list length first"),
            index,
            len,
        }
    }

    /// Validation failure on a named field.
    pub fn validation(
        code: impl Into<String>,
        component: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self::ValidationFailed {
            context: ErrorContext::new(code, component, message.clone()),
            field: Some(field.into()),
            message,
        }
    }

    /// Extract the error context from any variant.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::UnsupportedOperation { context, .. } => context,
            Self::AlreadyConsumed { context, .. } => context,
            Self::SourceBusy { context, .. } => context,
            Self::IndexOutOfBounds { context, .. } => context,
            Self::ValidationFailed { context, .. } => context,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &str {
        &self.context().error_code
    }

    /// Get the severity level for this error.
    pub fn severity(&self) -> Severity {
        self.context().severity
    }

    /// True for [`RivuletError::UnsupportedOperation`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    /// True for [`RivuletError::AlreadyConsumed`].
    pub fn is_already_consumed(&self) -> bool {
        matches!(self, Self::AlreadyConsumed { .. })
    }

    /// Create a ValidationFailed error from an I/O error.
    ///
    /// The original I/O error is preserved and accessible via `source()`.
    pub fn from_io(err: std::io::Error, component: impl Into<String>) -> Self {
        let message = err.to_string();
        Self::ValidationFailed {
            context: ErrorContext {
                error_code: "VAL-001".into(),
                component: component.into(),
                correlation_id: None,
                severity: Severity::Error,
                remediation_hint: Some("Check file permissions and path".into()),
                source: Some(Arc::new(err)),
            },
            field: None,
            message,
        }
    }

    /// Create a ValidationFailed error from a JSON error.
    ///
    /// The original JSON error is preserved and accessible via `source()`.
    pub fn from_json(err: serde_json::Error, component: impl Into<String>) -> Self {
        let message = err.to_string();
        Self::ValidationFailed {
            context: ErrorContext {
                error_code: "VAL-002".into(),
                component: component.into(),
                correlation_id: None,
                severity: Severity::Error,
                remediation_hint: Some("Verify JSON structure matches expected schema".into()),
                source: Some(Arc::new(err)),
            },
            field: None,
            message,
        }
    }
}

impl fmt::Display for RivuletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = &self.context().error_code;
        match self {
            Self::UnsupportedOperation {
                operation, target, ..
            } => {
                write!(
                    f,
                    "[RIVULET-{code}] unsupported operation '{operation}' on {target}"
                )
            }
            Self::AlreadyConsumed { view_id, .. } => {
                write!(
                    f,
                    "[RIVULET-{code}] view '{view_id}' has already been consumed"
                )
            }
            Self::SourceBusy { operation, .. } => {
                write!(
                    f,
                    "[RIVULET-{code}] cannot {operation}: source list is being realized"
                )
            }
            Self::IndexOutOfBounds { index, len, .. } => {
                write!(f, "[RIVULET-{code}] index {index} out of bounds for length {len}")
            }
            Self::ValidationFailed { field, message, .. } => {
                if let Some(field) = field {
                    write!(
                        f,
                        "[RIVULET-{code}] validation failed for '{field}': {message}"
                    )
                } else {
                    write!(f, "[RIVULET-{code}] validation failed: {message}")
                }
            }
        }
    }
}

impl std::error::Error for RivuletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.context()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenient Result type alias for Rivulet operations.
pub type Result<T> = std::result::Result<T, RivuletError>;
