//! Validation report types
//!
//! A validation run produces a `ValidationResult`: a valid flag plus the
//! ordered list of every violation found. Each `ValidationError` carries a
//! root-relative field path (`"address.zip"`, `"tags[1]"`) and a params map
//! of check-specific diagnostics.

use serde::Serialize;
use serde_json::Value;

/// Check-specific diagnostic key/value pairs attached to an error.
pub type Params = serde_json::Map<String, Value>;

/// One constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Human-readable message (default wording or per-field override)
    pub message: String,
    /// Dotted/bracketed field path from the validation root
    pub path: String,
    /// Diagnostic details specific to the check kind
    pub params: Params,
}

impl ValidationError {
    /// Creates an error record for the given field.
    pub fn new(message: impl Into<String>, field: impl Into<String>, params: Params) -> Self {
        Self {
            message: message.into(),
            path: field.into(),
            params,
        }
    }

    /// Re-roots this error under a parent path segment.
    ///
    /// `"zip"` prefixed with `"address"` becomes `"address.zip"`; an empty
    /// child path takes the prefix alone.
    pub(crate) fn prefixed(mut self, prefix: &str) -> Self {
        self.path = if self.path.is_empty() {
            prefix.to_string()
        } else {
            format!("{}.{}", prefix, self.path)
        };
        self
    }
}

/// Outcome of one validation run.
///
/// Invariant: `valid` holds exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Whether the data satisfied every constraint
    pub valid: bool,
    /// Every violation found, in check order
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Builds a result from an error list, deriving the valid flag.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// A passing result.
    pub fn ok() -> Self {
        Self::from_errors(Vec::new())
    }
}
