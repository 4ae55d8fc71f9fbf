//! Recursive validation engine
//!
//! Eight check passes run in fixed order over one level of data, all
//! appending to one shared error list:
//!
//! 1. required fields
//! 2. field types
//! 3. patterns
//! 4. enums
//! 5. nested objects (recursive)
//! 6. array items (recursive)
//! 7. additional properties
//! 8. custom rules
//!
//! Passes are independent: a missing required field still fails its type
//! check, since an absent value matches no declared kind. Callers see every
//! violation in one pass rather than the first one found.

use regex::Regex;
use serde_json::Value;

use crate::schema::{CheckKind, FieldKind, Schema, SchemaError, SchemaResult};

use super::report::{Params, ValidationError, ValidationResult};

/// Stateless checker binding one schema for the duration of a call.
///
/// The validator borrows its schema; child validations at nested scopes
/// borrow sub-schemas of the same tree. No state survives a `validate` call.
pub struct Validator<'a> {
    schema: &'a Schema,
}

impl<'a> Validator<'a> {
    /// Binds a schema. Constant-time; the schema itself is not validated.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a data value against the bound schema.
    ///
    /// Malformed *data* never produces an `Err` - every data problem is a
    /// `ValidationError` inside the returned result. The `Err` arm is
    /// reserved for schema-configuration faults discovered mid-walk, such as
    /// an uncompilable `pattern`.
    pub fn validate(&self, data: &Value) -> SchemaResult<ValidationResult> {
        validate(self.schema, data)
    }
}

/// Validates `data` against `schema` as a pure function.
///
/// Equivalent to `Validator::new(schema).validate(data)`.
pub fn validate(schema: &Schema, data: &Value) -> SchemaResult<ValidationResult> {
    let mut errors = Vec::new();
    run_checks(schema, data, &mut errors)?;
    Ok(ValidationResult::from_errors(errors))
}

/// Runs all eight passes at one schema scope, appending into `errors`.
///
/// Recursion sites (nested objects, array elements) call back into this
/// function with the sub-schema and re-root child error paths.
fn run_checks(schema: &Schema, data: &Value, errors: &mut Vec<ValidationError>) -> SchemaResult<()> {
    check_required(schema, data, errors);
    check_types(schema, data, errors);
    check_patterns(schema, data, errors)?;
    check_enums(schema, data, errors);
    check_nested(schema, data, errors)?;
    check_items(schema, data, errors)?;
    check_additional(schema, data, errors);
    check_custom(schema, data, errors);
    Ok(())
}

/// Pass 1: every name in `required` must be a key on the data object.
fn check_required(schema: &Schema, data: &Value, errors: &mut Vec<ValidationError>) {
    for name in &schema.required {
        let present = data.as_object().is_some_and(|obj| obj.contains_key(name));
        if !present {
            errors.push(ValidationError::new(
                message_for(schema, name, CheckKind::Required, || {
                    "Field is required".to_string()
                }),
                name,
                Params::new(),
            ));
        }
    }
}

/// Pass 2: each declared field's runtime kind must match its schema kind.
///
/// Absent values match no kind, so a missing field fails here as well as in
/// the required pass. Arrays match `array` specifically, never `object`.
fn check_types(schema: &Schema, data: &Value, errors: &mut Vec<ValidationError>) {
    for (field, property) in &schema.properties {
        let Some(kind) = property.kind else { continue };

        let value = data.get(field);
        if value.is_some_and(|v| kind.matches(v)) {
            continue;
        }

        let received = value.map_or("missing", value_kind);
        let mut params = Params::new();
        params.insert("expected".into(), Value::String(kind.name().into()));
        params.insert("received".into(), Value::String(received.into()));

        errors.push(ValidationError::new(
            message_for(schema, field, CheckKind::Type, || {
                format!("Expected type {} for {}", kind.name(), field)
            }),
            field,
            params,
        ));
    }
}

/// Pass 3: present field values must match their declared pattern.
///
/// Non-string values are matched against their JSON rendering, so a pattern
/// behaves consistently whatever kind the value turned out to be. Absent
/// fields are skipped. An uncompilable pattern aborts the walk as a
/// schema-configuration fault.
fn check_patterns(
    schema: &Schema,
    data: &Value,
    errors: &mut Vec<ValidationError>,
) -> SchemaResult<()> {
    for (field, property) in &schema.properties {
        let Some(pattern) = &property.pattern else { continue };
        let Some(value) = data.get(field) else { continue };

        let regex = Regex::new(pattern).map_err(|e| {
            SchemaError::invalid_pattern(field.clone(), pattern.clone(), e.to_string())
        })?;

        if !regex.is_match(&string_form(value)) {
            let mut params = Params::new();
            params.insert("pattern".into(), Value::String(pattern.clone()));

            errors.push(ValidationError::new(
                message_for(schema, field, CheckKind::Pattern, || {
                    format!("Field {} does not match the required pattern", field)
                }),
                field,
                params,
            ));
        }
    }
    Ok(())
}

/// Pass 4: each field with an enum must equal one of the listed literals.
///
/// Comparison is exact value equality; an absent field is never a member.
fn check_enums(schema: &Schema, data: &Value, errors: &mut Vec<ValidationError>) {
    for (field, property) in &schema.properties {
        let Some(allowed) = &property.enum_values else { continue };

        let member = data.get(field).is_some_and(|v| allowed.contains(v));
        if member {
            continue;
        }

        let joined = allowed
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", ");
        let mut params = Params::new();
        params.insert("allowed".into(), Value::Array(allowed.clone()));

        errors.push(ValidationError::new(
            message_for(schema, field, CheckKind::Enum, || {
                format!("Field {} must be one of the following: {}", field, joined)
            }),
            field,
            params,
        ));
    }
}

/// Pass 5: object-kind fields with a present, truthy value are validated
/// recursively against their own sub-schema; child error paths are re-rooted
/// as `<field>.<child path>`.
fn check_nested(
    schema: &Schema,
    data: &Value,
    errors: &mut Vec<ValidationError>,
) -> SchemaResult<()> {
    for (field, property) in &schema.properties {
        if property.kind != Some(FieldKind::Object) {
            continue;
        }
        let Some(value) = data.get(field) else { continue };
        if !is_truthy(value) {
            continue;
        }

        let mut child = Vec::new();
        run_checks(property, value, &mut child)?;
        errors.extend(child.into_iter().map(|e| e.prefixed(field)));
    }
    Ok(())
}

/// Pass 6: array-kind fields with an `items` schema validate every element.
///
/// Each element gets a direct kind check against `items.type` at path
/// `<field>[<index>]`, then a recursive validation against `items` with
/// child paths re-rooted as `<field>[<index>].<child path>`.
fn check_items(
    schema: &Schema,
    data: &Value,
    errors: &mut Vec<ValidationError>,
) -> SchemaResult<()> {
    for (field, property) in &schema.properties {
        if property.kind != Some(FieldKind::Array) {
            continue;
        }
        let Some(items) = &property.items else { continue };
        let Some(Value::Array(elements)) = data.get(field) else {
            continue;
        };

        for (index, element) in elements.iter().enumerate() {
            let slot = format!("{}[{}]", field, index);

            if let Some(kind) = items.kind {
                if !kind.matches(element) {
                    let mut params = Params::new();
                    params.insert("expected".into(), Value::String(kind.name().into()));
                    params.insert("received".into(), Value::String(value_kind(element).into()));

                    errors.push(ValidationError::new(
                        format!("Expected type {} for {}", kind.name(), slot),
                        slot.clone(),
                        params,
                    ));
                }
            }

            let mut child = Vec::new();
            run_checks(items, element, &mut child)?;
            errors.extend(child.into_iter().map(|e| e.prefixed(&slot)));
        }
    }
    Ok(())
}

/// Pass 7: when `additionalProperties` is `false`, every data key not
/// declared in `properties` is an error.
fn check_additional(schema: &Schema, data: &Value, errors: &mut Vec<ValidationError>) {
    if schema.additional_properties != Some(false) {
        return;
    }
    let Some(object) = data.as_object() else { return };

    for key in object.keys() {
        if schema.properties.contains_key(key) {
            continue;
        }
        errors.push(ValidationError::new(
            message_for(schema, key, CheckKind::AdditionalProperties, || {
                format!("Additional property not allowed: {}", key)
            }),
            key,
            Params::new(),
        ));
    }
}

/// Pass 8: custom rules run against the whole data value, not a field.
fn check_custom(schema: &Schema, data: &Value, errors: &mut Vec<ValidationError>) {
    for rule in &schema.custom_rules {
        let outcome = rule.check(data);
        if outcome.valid {
            continue;
        }
        let message = outcome
            .message
            .unwrap_or_else(|| format!("Custom validation failed for {}", rule.field));
        errors.push(ValidationError::new(message, rule.field.clone(), Params::new()));
    }
}

/// Looks up the per-field message override for a check kind, falling back to
/// the generated default.
fn message_for(
    schema: &Schema,
    field: &str,
    check: CheckKind,
    default: impl FnOnce() -> String,
) -> String {
    schema
        .properties
        .get(field)
        .and_then(|property| property.messages.get(&check))
        .cloned()
        .unwrap_or_else(default)
}

/// Returns the runtime kind name of a value for diagnostics.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns the string form a pattern is matched against: strings verbatim,
/// everything else via its JSON rendering.
fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders an enum literal for the default message text: strings unquoted,
/// everything else via its JSON rendering.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthiness of a value at a nested-object recursion site: null, false,
/// zero, and the empty string are falsy; every array and object is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
