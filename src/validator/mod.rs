//! Validation engine
//!
//! The engine walks a schema and a data value in lock-step and reports every
//! violation it finds, never only the first.
//!
//! # Design Principles
//!
//! - Exhaustive diagnostics: no check suppresses another
//! - Deterministic error order: check order, then declaration order
//! - Read-only over both schema and data; no shared state between calls
//! - Malformed data never panics; schema faults are a distinct error channel

mod engine;
mod report;

pub use engine::{validate, Validator};
pub use report::{Params, ValidationError, ValidationResult};
