//! Diagnostics: a collection-not-control-flow error model.
//!
//! Every reconciler operation returns a `(state-fragment, Diagnostics)` pair
//! rather than propagating a single `Result`. Individual SDK/waiter failures
//! are represented first as a typed [`SdkError`] and then folded into a
//! [`Diagnostic`] by the reconciler that observed them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A single attribute- or resource-scoped diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dot-separated attribute path this diagnostic is scoped to, e.g.
    /// `network_attachment[0].floating_ip_id`. Empty for resource-scoped
    /// diagnostics.
    pub attribute_path: String,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            attribute_path: String::new(),
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn error_on(
        attribute_path: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            attribute_path: attribute_path.into(),
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            attribute_path: String::new(),
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// An accumulating collection of diagnostics for one reconciler operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_sdk_error(err: &SdkError) -> Self {
        let mut d = Diagnostics::new();
        d.push(Diagnostic::error(err.summary(), err.to_string()));
        d
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diag) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{:?}] {}: {}", diag.severity, diag.summary, diag.detail)?;
        }
        Ok(())
    }
}

/// Typed error taxonomy at the SDK boundary, grounded in the
/// `Error`/`ErrorKind` convention used throughout `rust-openstack`'s compute
/// client. Unlike `rust-openstack`'s single catch-all `Error` struct, each
/// variant here carries only what its callers actually branch on, since
/// diagnostics --- not exceptions --- carry the rest.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict on {resource}: {detail}")]
    Conflict { resource: &'static str, detail: String },

    #[error("remote request failed: {0}")]
    Transient(String),

    #[error("timed out waiting for {0}")]
    WaiterTimedOut(String),

    #[error("{resource} {id} entered error state")]
    TerminalNegative { resource: &'static str, id: String },

    #[error("operation cancelled")]
    Cancelled,
}

impl SdkError {
    fn summary(&self) -> &'static str {
        match self {
            SdkError::NotFound { .. } => "resource not found",
            SdkError::Conflict { .. } => "conflict",
            SdkError::Transient(_) => "remote error",
            SdkError::WaiterTimedOut(_) => "timeout",
            SdkError::TerminalNegative { .. } => "entered error state",
            SdkError::Cancelled => "cancelled",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::NotFound { .. })
    }
}

/// Wraps sensitive attributes (`password`, `user_data`, `private_key`) so
/// that an accidental `{:?}`/`{}` inside a diagnostic message, log line, or
/// derived `Debug` impl cannot leak them.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sensitive<T>(pub T);

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sensitive(<redacted>)")
    }
}

impl<T> Sensitive<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn as_inner(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_debug_never_prints_value() {
        let secret = Sensitive("hunter2".to_string());
        assert_eq!(format!("{:?}", secret), "Sensitive(<redacted>)");
    }

    #[test]
    fn diagnostics_has_errors_ignores_warnings() {
        let mut d = Diagnostics::new();
        d.push(Diagnostic::warning("heads up", "non-fatal"));
        assert!(!d.has_errors());
        d.push(Diagnostic::error("boom", "fatal"));
        assert!(d.has_errors());
    }
}
