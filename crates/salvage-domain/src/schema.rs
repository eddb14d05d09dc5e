//! Declarative schema descriptors
//!
//! A [`SchemaDescriptor`] describes the shape a model response is expected to
//! have: which top-level keys must be present, what kind of value each holds,
//! and what role each field plays when the record is flattened for display.
//!
//! Descriptors are plain data. They are built once per content type and
//! shared (by reference or `Arc`) across any number of validations.

use serde::{Deserialize, Serialize};

/// The kind of value a field is expected to hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// A JSON string
    Text,
    /// A JSON array whose elements are all strings
    TextList,
    /// A JSON number, optionally bounded (inclusive)
    Number {
        /// Inclusive lower bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// A nested JSON object validated against its own schema
    Object(ObjectSchema),
    /// A JSON array of objects; malformed elements are dropped individually
    ObjectList(ObjectSchema),
}

impl FieldKind {
    /// Human-readable description used in violation messages
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Text => "string".to_string(),
            FieldKind::TextList => "list of strings".to_string(),
            FieldKind::Number { min: None, max: None } => "number".to_string(),
            FieldKind::Number { min: Some(lo), max: Some(hi) } => {
                format!("number in [{}, {}]", lo, hi)
            }
            FieldKind::Number { min: Some(lo), max: None } => format!("number >= {}", lo),
            FieldKind::Number { min: None, max: Some(hi) } => format!("number <= {}", hi),
            FieldKind::Object(_) => "object".to_string(),
            FieldKind::ObjectList(_) => "list of objects".to_string(),
        }
    }

    /// Check whether a number satisfies this kind's bounds
    ///
    /// Always false for non-numeric kinds.
    pub fn accepts_number(&self, value: f64) -> bool {
        match self {
            FieldKind::Number { min, max } => {
                value.is_finite()
                    && min.map_or(true, |lo| value >= lo)
                    && max.map_or(true, |hi| value <= hi)
            }
            _ => false,
        }
    }
}

/// How a field is used when a record is flattened for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Validated and copied, no special treatment
    #[default]
    Plain,
    /// Heading of a card
    Title,
    /// Short text subject to the summary length budget
    Summary,
    /// Supporting text or bullet points
    Detail,
    /// Numeric rating attached to a card
    Score,
}

/// A single named field within an object schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key in the JSON object
    pub name: String,

    /// Expected value kind
    pub kind: FieldKind,

    /// Whether absence is a violation
    #[serde(default = "default_required")]
    pub required: bool,

    /// Presentation role
    #[serde(default)]
    pub role: FieldRole,

    /// Reject blank strings (and blank list entries for text lists)
    #[serde(default)]
    pub non_empty: bool,
}

fn default_required() -> bool {
    true
}

impl FieldSpec {
    /// Create a required field of the given kind
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            role: FieldRole::Plain,
            non_empty: false,
        }
    }

    /// A string field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// A list-of-strings field
    pub fn text_list(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextList)
    }

    /// An unbounded numeric field
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number { min: None, max: None })
    }

    /// A numeric field bounded to `[min, max]`
    pub fn number_in_range(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(
            name,
            FieldKind::Number {
                min: Some(min),
                max: Some(max),
            },
        )
    }

    /// A nested object field
    pub fn object(name: impl Into<String>, schema: ObjectSchema) -> Self {
        Self::new(name, FieldKind::Object(schema))
    }

    /// A list-of-objects field (best-effort: bad elements are dropped)
    pub fn object_list(name: impl Into<String>, schema: ObjectSchema) -> Self {
        Self::new(name, FieldKind::ObjectList(schema))
    }

    /// Mark the field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Reject blank values
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Set the presentation role
    pub fn with_role(mut self, role: FieldRole) -> Self {
        self.role = role;
        self
    }

    /// Shorthand for `with_role(FieldRole::Title)`
    pub fn title(self) -> Self {
        self.with_role(FieldRole::Title)
    }

    /// Shorthand for `with_role(FieldRole::Summary)`
    pub fn summary(self) -> Self {
        self.with_role(FieldRole::Summary)
    }

    /// Shorthand for `with_role(FieldRole::Detail)`
    pub fn detail(self) -> Self {
        self.with_role(FieldRole::Detail)
    }

    /// Shorthand for `with_role(FieldRole::Score)`
    pub fn score(self) -> Self {
        self.with_role(FieldRole::Score)
    }

    /// True if this field is a best-effort container
    pub fn is_best_effort(&self) -> bool {
        matches!(self.kind, FieldKind::ObjectList(_))
    }
}

/// An ordered set of fields describing one JSON object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Fields in declaration order
    pub fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    /// Create an object schema from its fields
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Look up a field by key
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All fields carrying the given role, in declaration order
    pub fn with_role(&self, role: FieldRole) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.role == role)
    }

    /// First field carrying the given role
    pub fn first_with_role(&self, role: FieldRole) -> Option<&FieldSpec> {
        self.with_role(role).next()
    }
}

/// Expected shape of one content type
///
/// # Examples
///
/// ```
/// use salvage_domain::{FieldSpec, ObjectSchema, SchemaDescriptor};
///
/// let schema = SchemaDescriptor::new(
///     "anti_personas",
///     vec![FieldSpec::object_list(
///         "suggested_anti_personas",
///         ObjectSchema::new(vec![
///             FieldSpec::text("persona_name").summary(),
///             FieldSpec::text("reason").detail(),
///         ]),
///     )],
/// );
///
/// assert_eq!(schema.name(), "anti_personas");
/// assert!(schema.root().field("suggested_anti_personas").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    name: String,
    root: ObjectSchema,
}

impl SchemaDescriptor {
    /// Create a descriptor for a top-level JSON object
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            root: ObjectSchema::new(fields),
        }
    }

    /// Content type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema of the top-level object
    pub fn root(&self) -> &ObjectSchema {
        &self.root
    }

    /// Top-level fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.root.fields
    }

    /// Keys that must be present at the top level
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.root
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::text("area_summary").summary(),
            FieldSpec::number_in_range("value_score", 1.0, 5.0).score(),
            FieldSpec::text_list("details").detail(),
        ])
    }

    #[test]
    fn test_builder_defaults() {
        let field = FieldSpec::text("summary");
        assert!(field.required);
        assert_eq!(field.role, FieldRole::Plain);
        assert!(!field.non_empty);

        let field = FieldSpec::text("subtext").optional().non_empty().summary();
        assert!(!field.required);
        assert!(field.non_empty);
        assert_eq!(field.role, FieldRole::Summary);
    }

    #[test]
    fn test_kind_descriptions() {
        assert_eq!(FieldKind::Text.describe(), "string");
        assert_eq!(FieldKind::TextList.describe(), "list of strings");
        assert_eq!(
            FieldSpec::number_in_range("s", 1.0, 5.0).kind.describe(),
            "number in [1, 5]"
        );
        assert_eq!(FieldKind::ObjectList(area_schema()).describe(), "list of objects");
    }

    #[test]
    fn test_number_bounds() {
        let kind = FieldSpec::number_in_range("s", 1.0, 5.0).kind;
        assert!(kind.accepts_number(1.0));
        assert!(kind.accepts_number(5.0));
        assert!(!kind.accepts_number(0.5));
        assert!(!kind.accepts_number(f64::NAN));
        assert!(!FieldKind::Text.accepts_number(1.0));
        assert!(FieldSpec::number("n").kind.accepts_number(-1e9));
    }

    #[test]
    fn test_role_lookup() {
        let schema = area_schema();
        assert_eq!(
            schema.first_with_role(FieldRole::Summary).map(|f| f.name.as_str()),
            Some("area_summary")
        );
        assert_eq!(schema.with_role(FieldRole::Detail).count(), 1);
        assert!(schema.first_with_role(FieldRole::Title).is_none());
    }

    #[test]
    fn test_required_keys_follow_declaration_order() {
        let schema = SchemaDescriptor::new(
            "email",
            vec![
                FieldSpec::text("subject"),
                FieldSpec::text("preheader").optional(),
                FieldSpec::text("body"),
            ],
        );
        let keys: Vec<&str> = schema.required_keys().collect();
        assert_eq!(keys, vec!["subject", "body"]);
    }

    #[test]
    fn test_descriptor_deserializes_from_plain_data() {
        let json = r#"{
            "name": "opportunities",
            "root": {
                "fields": [
                    { "name": "summary", "kind": { "type": "text" }, "role": "summary" },
                    {
                        "name": "neglected_areas",
                        "kind": {
                            "type": "object_list",
                            "fields": [
                                { "name": "area_summary", "kind": { "type": "text" } },
                                { "name": "value_score", "kind": { "type": "number", "min": 1.0, "max": 5.0 } }
                            ]
                        }
                    },
                    { "name": "notes", "kind": { "type": "text_list" }, "required": false }
                ]
            }
        }"#;

        let schema: SchemaDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.fields()[0].role, FieldRole::Summary);
        assert!(!schema.fields()[2].required);
        match &schema.fields()[1].kind {
            FieldKind::ObjectList(inner) => {
                assert!(inner.field("value_score").unwrap().kind.accepts_number(3.0));
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }
}
