//! Schema validation of parsed payloads
//!
//! One generic walker interprets any [`SchemaDescriptor`]. Failures are
//! collected, never thrown. List-of-object fields are best-effort: a bad
//! element is dropped and recorded while its siblings survive. Everything
//! else is strict, and a strict failure anywhere under a required top-level
//! field rejects the record.

use crate::repair::json_kind;
use salvage_domain::{
    FieldKind, FieldSpec, ObjectSchema, SchemaDescriptor, ValidatedPayload, ValidationResult,
    Violation,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Validate `payload` against `schema`
///
/// # Examples
///
/// ```
/// use salvage_domain::{FieldSpec, ObjectSchema, SchemaDescriptor};
/// use salvage_extractor::validator::validate;
/// use serde_json::json;
///
/// let schema = SchemaDescriptor::new(
///     "anti_personas",
///     vec![FieldSpec::object_list(
///         "personas",
///         ObjectSchema::new(vec![FieldSpec::text("name"), FieldSpec::text("reason")]),
///     )],
/// );
/// let payload = json!({"personas": [{"name": "X", "reason": "Y"}, {"name": "Z"}]});
///
/// let result = validate(&payload, &schema);
/// assert!(result.is_valid());
/// assert_eq!(result.violations().len(), 1);
/// ```
pub fn validate(payload: &Value, schema: &SchemaDescriptor) -> ValidationResult {
    let Some(root) = payload.as_object() else {
        return ValidationResult::Invalid(vec![Violation::wrong_type(
            "$",
            "object",
            json_kind(payload),
        )]);
    };

    let mut warnings = Vec::new();
    match check_object(root, schema.root(), "", &mut warnings) {
        Ok(value) => {
            debug!(
                "Payload valid for schema '{}' with {} warning(s)",
                schema.name(),
                warnings.len()
            );
            ValidationResult::Valid(ValidatedPayload { value, warnings })
        }
        Err(violations) => {
            debug!(
                "Payload invalid for schema '{}': {} violation(s)",
                schema.name(),
                violations.len()
            );
            ValidationResult::Invalid(violations)
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Check every declared field of `obj`, returning a cleaned copy
///
/// Undeclared keys are carried through untouched. Optional fields that fail
/// are removed and recorded in `warnings`.
fn check_object(
    obj: &Map<String, Value>,
    schema: &ObjectSchema,
    prefix: &str,
    warnings: &mut Vec<Violation>,
) -> Result<Map<String, Value>, Vec<Violation>> {
    let mut cleaned = obj.clone();
    let mut fatal = Vec::new();

    for spec in &schema.fields {
        let path = join_path(prefix, &spec.name);
        match obj.get(&spec.name) {
            None | Some(Value::Null) => {
                cleaned.remove(&spec.name);
                if spec.required {
                    fatal.push(Violation::missing_key(&path, spec.kind.describe()));
                }
            }
            Some(value) => match check_value(value, spec, &path, warnings) {
                Ok(checked) => {
                    cleaned.insert(spec.name.clone(), checked);
                }
                Err(errors) if spec.required => fatal.extend(errors),
                Err(errors) => {
                    cleaned.remove(&spec.name);
                    for error in errors {
                        warn!("Discarding optional field: {}", error);
                        warnings.push(error.into_dropped());
                    }
                }
            },
        }
    }

    if fatal.is_empty() {
        Ok(cleaned)
    } else {
        Err(fatal)
    }
}

fn check_value(
    value: &Value,
    spec: &FieldSpec,
    path: &str,
    warnings: &mut Vec<Violation>,
) -> Result<Value, Vec<Violation>> {
    match &spec.kind {
        FieldKind::Text => {
            let Some(text) = value.as_str() else {
                return Err(vec![wrong_type(path, &spec.kind, value)]);
            };
            if spec.non_empty && text.trim().is_empty() {
                return Err(vec![Violation::empty_value(path)]);
            }
            Ok(value.clone())
        }
        FieldKind::TextList => {
            let Some(items) = value.as_array() else {
                return Err(vec![wrong_type(path, &spec.kind, value)]);
            };
            let errors: Vec<Violation> = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| {
                    let item_path = format!("{}[{}]", path, i);
                    match item.as_str() {
                        None => Some(Violation::wrong_type(item_path, "string", json_kind(item))),
                        Some(s) if spec.non_empty && s.trim().is_empty() => {
                            Some(Violation::empty_value(item_path))
                        }
                        Some(_) => None,
                    }
                })
                .collect();
            if errors.is_empty() {
                Ok(value.clone())
            } else {
                Err(errors)
            }
        }
        FieldKind::Number { .. } => match value.as_f64() {
            Some(n) if spec.kind.accepts_number(n) => Ok(value.clone()),
            _ => Err(vec![wrong_type(path, &spec.kind, value)]),
        },
        FieldKind::Object(inner) => {
            let Some(obj) = value.as_object() else {
                return Err(vec![wrong_type(path, &spec.kind, value)]);
            };
            let mut nested_warnings = Vec::new();
            let cleaned = check_object(obj, inner, path, &mut nested_warnings)?;
            warnings.extend(nested_warnings);
            Ok(Value::Object(cleaned))
        }
        FieldKind::ObjectList(inner) => {
            let Some(items) = value.as_array() else {
                return Err(vec![wrong_type(path, &spec.kind, value)]);
            };
            Ok(Value::Array(check_elements(items, inner, path, warnings)))
        }
    }
}

/// Best-effort element validation: bad elements are dropped, one warning each
fn check_elements(
    items: &[Value],
    schema: &ObjectSchema,
    path: &str,
    warnings: &mut Vec<Violation>,
) -> Vec<Value> {
    let mut kept = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{}[{}]", path, i);
        let outcome = match item.as_object() {
            Some(obj) => {
                let mut element_warnings = Vec::new();
                check_object(obj, schema, &item_path, &mut element_warnings)
                    .map(|cleaned| (cleaned, element_warnings))
            }
            None => Err(vec![Violation::wrong_type(
                &item_path,
                "object",
                json_kind(item),
            )]),
        };

        match outcome {
            Ok((cleaned, element_warnings)) => {
                warnings.extend(element_warnings);
                kept.push(Value::Object(cleaned));
            }
            Err(errors) => {
                let violation = collapse(errors).into_dropped();
                warn!("Dropping malformed list element: {}", violation);
                warnings.push(violation);
            }
        }
    }
    kept
}

/// Fold all of an element's violations into its first one
fn collapse(errors: Vec<Violation>) -> Violation {
    let mut iter = errors.into_iter();
    let Some(mut first) = iter.next() else {
        return Violation::wrong_type("$", "object", "unknown");
    };
    let rest: Vec<String> = iter.map(|v| v.to_string()).collect();
    if !rest.is_empty() {
        first.actual = format!("{}; also {}", first.actual, rest.join("; "));
    }
    first
}

fn wrong_type(path: &str, kind: &FieldKind, value: &Value) -> Violation {
    let actual = match value {
        Value::Number(n) => format!("number {}", n),
        other => json_kind(other).to_string(),
    };
    Violation::wrong_type(path, kind.describe(), actual)
}
