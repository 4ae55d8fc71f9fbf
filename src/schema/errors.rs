//! Schema configuration errors
//!
//! These cover faults in the schema itself (malformed documents, uncompilable
//! patterns, registry misuse). Violations found in *data* are never reported
//! here - they travel in `ValidationResult` instead.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema configuration errors
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// Schema document could not be parsed or fails structural sanity checks
    #[error("Malformed schema '{source_name}': {reason}")]
    Malformed { source_name: String, reason: String },

    /// A `pattern` constraint is not a valid regular expression
    #[error("Invalid pattern '{pattern}' for field '{field}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    /// Attempt to re-register a schema name that already exists
    #[error("Schema '{0}' is already registered")]
    Immutable(String),

    /// Registry lookup for a name that was never registered
    #[error("Schema '{0}' not found")]
    NotFound(String),

    /// Registry file handling failed
    #[error("I/O error for '{path}': {reason}")]
    Io { path: String, reason: String },
}

impl SchemaError {
    /// Create a malformed-schema error.
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-pattern error.
    pub fn invalid_pattern(
        field: impl Into<String>,
        pattern: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPattern {
            field: field.into(),
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error for a registry path.
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_source() {
        let err = SchemaError::malformed("users.json", "unexpected token");
        let display = format!("{}", err);
        assert!(display.contains("users.json"));
        assert!(display.contains("unexpected token"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = SchemaError::invalid_pattern("email", "[unclosed", "unclosed character class");
        let display = format!("{}", err);
        assert!(display.contains("email"));
        assert!(display.contains("[unclosed"));
    }
}
