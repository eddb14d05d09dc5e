//! Flatten validated payloads into presentation-ready sections

use salvage_domain::{
    ContentUnit, FieldKind, FieldRole, FieldSpec, NormalizedRecord, ObjectSchema,
    SchemaDescriptor, SummaryDetail, ValidatedPayload,
};
use serde_json::{Map, Value};

/// Build a [`NormalizedRecord`] from a validated payload
///
/// Sections are emitted in the schema's declared order; absent optional
/// fields produce no section. Nested objects collapse into
/// [`SummaryDetail`] units using field roles, or, for fields without roles,
/// conventional names (`summary`, `*_summary`, `details`, `*_details`).
/// Objects and object lists nested inside an object get their own section,
/// named by dotted path, directly after their parent. Inside an object list
/// the path carries the element index (`groups[1].members`), counted over
/// the elements that survived validation.
pub fn normalize(payload: &ValidatedPayload, schema: &SchemaDescriptor) -> NormalizedRecord {
    let mut record = NormalizedRecord::new(schema.name());
    record.warnings = payload.warnings.clone();
    emit_fields(&mut record, "", &payload.value, &schema.root().fields);
    record
}

fn emit_fields(
    record: &mut NormalizedRecord,
    prefix: &str,
    obj: &Map<String, Value>,
    fields: &[FieldSpec],
) {
    for spec in fields {
        let Some(value) = obj.get(&spec.name) else {
            continue;
        };
        let name = if prefix.is_empty() {
            spec.name.clone()
        } else {
            format!("{}.{}", prefix, spec.name)
        };
        let Some(unit) = to_unit(value, spec) else {
            continue;
        };
        record.sections.insert(name.clone(), unit);

        match (&spec.kind, value) {
            (FieldKind::Object(inner), Value::Object(nested)) => {
                emit_fields(record, &name, nested, &containers(inner));
            }
            (FieldKind::ObjectList(inner), Value::Array(items)) => {
                let nested_fields = containers(inner);
                if nested_fields.is_empty() {
                    continue;
                }
                for (i, nested) in items.iter().filter_map(Value::as_object).enumerate() {
                    emit_fields(record, &format!("{}[{}]", name, i), nested, &nested_fields);
                }
            }
            _ => {}
        }
    }
}

fn containers(schema: &ObjectSchema) -> Vec<FieldSpec> {
    schema
        .fields
        .iter()
        .filter(|f| matches!(f.kind, FieldKind::Object(_) | FieldKind::ObjectList(_)))
        .cloned()
        .collect()
}

fn to_unit(value: &Value, spec: &FieldSpec) -> Option<ContentUnit> {
    let unit = match &spec.kind {
        FieldKind::Text => {
            let text = value.as_str()?.to_string();
            if spec.role == FieldRole::Summary {
                ContentUnit::Summary(text)
            } else {
                ContentUnit::Text(text)
            }
        }
        FieldKind::TextList => ContentUnit::List(strings(value)),
        FieldKind::Number { .. } => ContentUnit::Text(value.as_number()?.to_string()),
        FieldKind::Object(inner) => ContentUnit::Card(flatten(value.as_object()?, inner)),
        FieldKind::ObjectList(inner) => ContentUnit::Cards(
            value
                .as_array()?
                .iter()
                .filter_map(Value::as_object)
                .map(|obj| flatten(obj, inner))
                .collect(),
        ),
    };
    Some(unit)
}

fn flatten(obj: &Map<String, Value>, schema: &ObjectSchema) -> SummaryDetail {
    let title = role_or_named(schema, FieldRole::Title, |n| n == "title")
        .and_then(|f| obj.get(&f.name))
        .and_then(Value::as_str)
        .map(str::to_string);

    let summary = role_or_named(schema, FieldRole::Summary, |n| {
        n == "summary" || n.ends_with("_summary")
    })
    .and_then(|f| obj.get(&f.name))
    .and_then(Value::as_str)
    .unwrap_or_default()
    .to_string();

    let score = role_or_named(schema, FieldRole::Score, |n| n == "score" || n.ends_with("_score"))
        .and_then(|f| obj.get(&f.name))
        .and_then(Value::as_f64);

    let mut detail_fields: Vec<&FieldSpec> = schema.with_role(FieldRole::Detail).collect();
    if detail_fields.is_empty() {
        detail_fields = schema
            .fields
            .iter()
            .filter(|f| f.role == FieldRole::Plain)
            .filter(|f| f.name == "details" || f.name.ends_with("_details"))
            .collect();
    }

    let mut details = Vec::new();
    for field in detail_fields {
        match obj.get(&field.name) {
            Some(Value::String(s)) => details.push(s.clone()),
            Some(Value::Number(n)) => details.push(n.to_string()),
            Some(list @ Value::Array(_)) => details.extend(strings(list)),
            _ => {}
        }
    }

    SummaryDetail {
        title,
        summary,
        details,
        score,
    }
}

/// Field carrying `role`, else the first unroled field whose name matches
fn role_or_named(
    schema: &ObjectSchema,
    role: FieldRole,
    name_matches: impl Fn(&str) -> bool,
) -> Option<&FieldSpec> {
    schema.first_with_role(role).or_else(|| {
        schema
            .fields
            .iter()
            .find(|f| f.role == FieldRole::Plain && name_matches(&f.name))
    })
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
