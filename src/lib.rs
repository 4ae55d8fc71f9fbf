//! strictform - A strict, deterministic structural validator for JSON-like data
//!
//! Record-like data parsed from configuration files, network payloads, or user
//! input is checked against a declarative [`schema::Schema`] before downstream
//! code trusts it. The [`validator::Validator`] walks schema and data in
//! lock-step, recursing into nested objects and array elements, and reports
//! every violation it finds as a structured error with a root-relative field
//! path - never just a boolean, and never only the first failure.

pub mod schema;
pub mod validator;
