//! Schema type definitions
//!
//! A schema describes one level of expected data shape. Every constraint is
//! optional, and `properties` nests schemas recursively:
//!
//! - `type`: one of string, number, boolean, object, array
//! - `properties`: per-field sub-schemas (declaration order preserved)
//! - `required`: field names that must be present
//! - `enum`: allowed literal values, exact equality
//! - `pattern`: regular expression over the field's string form
//! - `items`: element schema for array fields
//! - `additionalProperties`: `false` forbids undeclared keys
//! - `messages`: per-check-kind custom error message overrides
//! - custom rules: injected predicates over the whole data object

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};

/// Supported field kinds.
///
/// The set is closed: a schema document naming any other kind fails to
/// deserialize and is rejected as malformed rather than silently passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// Any JSON number
    Number,
    /// Boolean
    Boolean,
    /// Nested object
    Object,
    /// Sequence; matched as "array", never as generic object
    Array,
}

impl FieldKind {
    /// Returns the kind name used in schema documents and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }

    /// Returns whether the runtime kind of `value` matches this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The check kinds whose default messages can be overridden per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckKind {
    Required,
    Type,
    Pattern,
    Enum,
    AdditionalProperties,
}

/// Outcome of a custom validation rule.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// Whether the rule passed
    pub valid: bool,
    /// Message to report when the rule failed
    pub message: Option<String>,
}

impl RuleOutcome {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing outcome with the rule's own message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// A custom validation rule: an injected predicate over the whole data object.
///
/// The predicate sees the complete data value, not a single field, so rules
/// can express cross-field constraints. The `field` names where a failure is
/// reported (it becomes the error path).
#[derive(Clone)]
pub struct CustomRule {
    /// Field name reported as the error path on failure
    pub field: String,
    check: Arc<dyn Fn(&Value) -> RuleOutcome + Send + Sync>,
}

impl CustomRule {
    /// Creates a rule from a field name and a predicate.
    pub fn new(
        field: impl Into<String>,
        check: impl Fn(&Value) -> RuleOutcome + Send + Sync + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            check: Arc::new(check),
        }
    }

    /// Runs the predicate against the whole data value.
    pub fn check(&self, data: &Value) -> RuleOutcome {
        (self.check)(data)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Declarative validation rules for one level of data.
///
/// All fields are optional; an empty schema accepts anything. The same schema
/// value may serve as a nested sub-schema for many child validations - the
/// engine only ever borrows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Expected kind of the field this schema constrains
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,

    /// Nested per-field sub-schemas, in declaration order
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    /// Field names that must be present as keys on the data object
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Allowed literal values, compared by exact equality
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Regular expression constraining the field's string form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Element schema applied to every array element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// When `Some(false)`, data keys not declared in `properties` are errors
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,

    /// Per-check-kind custom error message overrides for this field
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<CheckKind, String>,

    /// Custom rules; injected programmatically, never serialized
    #[serde(skip)]
    pub custom_rules: Vec<CustomRule>,
}

impl Schema {
    /// Creates an empty schema that accepts anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema expecting the given kind.
    pub fn of_kind(kind: FieldKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Creates a string-kind schema.
    pub fn string() -> Self {
        Self::of_kind(FieldKind::String)
    }

    /// Creates a number-kind schema.
    pub fn number() -> Self {
        Self::of_kind(FieldKind::Number)
    }

    /// Creates a boolean-kind schema.
    pub fn boolean() -> Self {
        Self::of_kind(FieldKind::Boolean)
    }

    /// Creates an object-kind schema with no properties yet.
    pub fn object() -> Self {
        Self::of_kind(FieldKind::Object)
    }

    /// Creates an array-kind schema with the given element schema.
    pub fn array(items: Schema) -> Self {
        Self {
            kind: Some(FieldKind::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Adds a named property sub-schema.
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Marks a field name as required.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Sets the pattern constraint.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the enum constraint.
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Overrides the error message for one check kind on this field.
    pub fn with_message(mut self, check: CheckKind, message: impl Into<String>) -> Self {
        self.messages.insert(check, message.into());
        self
    }

    /// Adds a custom validation rule.
    pub fn with_rule(mut self, rule: CustomRule) -> Self {
        self.custom_rules.push(rule);
        self
    }

    /// Forbids data keys not declared in `properties`.
    pub fn deny_additional(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }

    /// Parses a schema from a raw JSON value.
    ///
    /// Unknown `type` names and structurally invalid documents are reported
    /// as `SchemaError::Malformed`.
    pub fn from_value(value: Value) -> SchemaResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| SchemaError::malformed("<value>", e.to_string()))
    }

    /// Checks the schema's own configuration, recursively.
    ///
    /// Every `pattern` in the tree must compile. Data validation never runs
    /// against a schema that fails this check when loaded through the
    /// registry; programmatically built schemas surface the same fault from
    /// `validate` itself.
    pub fn check_structure(&self) -> SchemaResult<()> {
        self.check_structure_at("<root>")
    }

    fn check_structure_at(&self, field: &str) -> SchemaResult<()> {
        if let Some(pattern) = &self.pattern {
            Regex::new(pattern).map_err(|e| {
                SchemaError::invalid_pattern(field, pattern.clone(), e.to_string())
            })?;
        }
        for (name, property) in &self.properties {
            property.check_structure_at(name)?;
        }
        if let Some(items) = &self.items {
            items.check_structure_at(field)?;
        }
        Ok(())
    }
}
