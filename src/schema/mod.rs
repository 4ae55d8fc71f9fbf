//! Schema subsystem
//!
//! Schemas are declarative descriptions of expected data shape: field kinds,
//! value constraints (pattern, enum), nesting (properties, items), and
//! per-field custom error messages.
//!
//! # Design Principles
//!
//! - Schemas are immutable once bound to a validator
//! - Unknown type-kind names are configuration errors, never silent passes
//! - Schema-configuration faults are distinct from data-validation outcomes
//! - Deterministic iteration: properties keep declaration order

mod errors;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{CheckKind, CustomRule, FieldKind, RuleOutcome, Schema};
