//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use salvage_domain::{
    ContentUnit, Diagnostic, FieldKind, FieldRole, FieldSpec, NormalizedRecord, SchemaDescriptor,
    SummaryDetail, ValidationResult, Violation,
};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Chars of raw text previewed under a diagnostic when `--show-raw` is off
const RAW_PREVIEW_CHARS: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of extracting one response.
    pub fn format_extraction(
        &self,
        source: &str,
        outcome: &std::result::Result<NormalizedRecord, Diagnostic>,
        show_raw: bool,
    ) -> Result<String> {
        match outcome {
            Ok(record) => self.format_record(source, record),
            Err(diagnostic) => self.format_diagnostic(source, diagnostic, show_raw),
        }
    }

    /// Format a normalized record.
    pub fn format_record(&self, source: &str, record: &NormalizedRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &json!({ "source": source, "record": record }),
            )?),
            OutputFormat::Quiet => Ok(record.section_names().collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                let mut out = self.success(&format!(
                    "{}: '{}' record, {} section(s)",
                    source,
                    record.schema,
                    record.sections.len()
                ));

                let mut builder = Builder::default();
                builder.push_record(["Section", "Content"]);
                for (name, unit) in &record.sections {
                    builder.push_record([name.clone(), render_unit(unit)]);
                }
                out.push('\n');
                out.push_str(&self.table(builder));

                if !record.warnings.is_empty() {
                    out.push('\n');
                    out.push_str(&self.warning(&format!(
                        "{} problem(s) recovered",
                        record.warnings.len()
                    )));
                    out.push('\n');
                    out.push_str(&self.violations_table(&record.warnings));
                }
                Ok(out)
            }
        }
    }

    /// Format a diagnostic.
    pub fn format_diagnostic(
        &self,
        source: &str,
        diagnostic: &Diagnostic,
        show_raw: bool,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &json!({ "source": source, "diagnostic": diagnostic }),
            )?),
            OutputFormat::Quiet => Ok(diagnostic.reason.code().to_string()),
            OutputFormat::Table => {
                let mut out = self.error(&format!("{}: {}", source, diagnostic));
                if !diagnostic.violations.is_empty() {
                    out.push('\n');
                    out.push_str(&self.violations_table(&diagnostic.violations));
                }
                out.push('\n');
                if show_raw {
                    out.push_str(&self.info("Raw model response:"));
                    out.push('\n');
                    out.push_str(&diagnostic.raw_text);
                    if let Some(attempted) = &diagnostic.attempted {
                        out.push('\n');
                        out.push_str(&self.info("Attempted payload:"));
                        out.push('\n');
                        out.push_str(attempted);
                    }
                } else {
                    out.push_str(&self.info(&format!(
                        "Raw: {}",
                        diagnostic.raw_excerpt(RAW_PREVIEW_CHARS)
                    )));
                }
                Ok(out)
            }
        }
    }

    /// Format a validation outcome.
    pub fn format_validation(&self, source: &str, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "source": source,
                "valid": result.is_valid(),
                "violations": result.violations(),
            }))?),
            OutputFormat::Quiet => Ok(if result.is_valid() { "valid" } else { "invalid" }.to_string()),
            OutputFormat::Table => {
                let violations = result.violations();
                let mut out = if result.is_valid() {
                    self.success(&format!("{}: payload is valid", source))
                } else {
                    self.error(&format!(
                        "{}: payload is invalid, {} violation(s)",
                        source,
                        violations.len()
                    ))
                };
                if !violations.is_empty() {
                    out.push('\n');
                    out.push_str(&self.violations_table(violations));
                }
                Ok(out)
            }
        }
    }

    /// Format the list of available schemas.
    pub fn format_schemas(&self, schemas: &[SchemaDescriptor]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(schemas)?),
            OutputFormat::Quiet => Ok(schemas
                .iter()
                .map(SchemaDescriptor::name)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Schema", "Fields", "Required keys"]);
                for schema in schemas {
                    builder.push_record([
                        schema.name().to_string(),
                        schema.fields().len().to_string(),
                        schema.required_keys().collect::<Vec<_>>().join(", "),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format one schema's fields.
    pub fn format_schema(&self, schema: &SchemaDescriptor) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(schema)?),
            OutputFormat::Quiet => {
                let mut rows = Vec::new();
                collect_fields("", schema.fields(), &mut rows);
                Ok(rows
                    .into_iter()
                    .map(|(path, _)| path)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            OutputFormat::Table => {
                let mut rows = Vec::new();
                collect_fields("", schema.fields(), &mut rows);

                let mut builder = Builder::default();
                builder.push_record(["Field", "Type", "Required", "Role"]);
                for (path, spec) in rows {
                    let mut kind = spec.kind.describe();
                    if spec.non_empty {
                        kind.push_str(", non-empty");
                    }
                    builder.push_record([
                        path,
                        kind,
                        if spec.required { "yes" } else { "no" }.to_string(),
                        role_label(spec.role).to_string(),
                    ]);
                }
                Ok(format!(
                    "{}\n{}",
                    self.info(&format!("Schema '{}'", schema.name())),
                    self.table(builder)
                ))
            }
        }
    }

    fn violations_table(&self, violations: &[Violation]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Path", "Problem", "Expected", "Found"]);
        for violation in violations {
            let problem = if violation.dropped {
                format!("{} (dropped)", violation.kind)
            } else {
                violation.kind.to_string()
            };
            builder.push_record([
                violation.path.clone(),
                problem,
                violation.expected.clone(),
                violation.actual.clone(),
            ]);
        }
        self.table(builder)
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render a content unit as multi-line plain text.
pub fn render_unit(unit: &ContentUnit) -> String {
    match unit {
        ContentUnit::Text(text) | ContentUnit::Summary(text) => text.clone(),
        ContentUnit::List(items) => bullets(items),
        ContentUnit::Card(card) => render_card(card),
        ContentUnit::Cards(cards) => cards
            .iter()
            .enumerate()
            .map(|(i, card)| format!("{}. {}", i + 1, render_card(card)))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn render_card(card: &SummaryDetail) -> String {
    let mut lines = Vec::new();
    if let Some(title) = &card.title {
        lines.push(title.clone());
    }
    match card.score {
        Some(score) => lines.push(format!("{} (score {})", card.summary, score)),
        None => lines.push(card.summary.clone()),
    }
    if !card.details.is_empty() {
        lines.push(bullets(&card.details));
    }
    lines.join("\n")
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_fields<'a>(prefix: &str, fields: &'a [FieldSpec], rows: &mut Vec<(String, &'a FieldSpec)>) {
    for spec in fields {
        let path = if prefix.is_empty() {
            spec.name.clone()
        } else {
            format!("{}.{}", prefix, spec.name)
        };
        rows.push((path.clone(), spec));
        match &spec.kind {
            FieldKind::Object(inner) => collect_fields(&path, &inner.fields, rows),
            FieldKind::ObjectList(inner) => collect_fields(&format!("{}[]", path), &inner.fields, rows),
            _ => {}
        }
    }
}

fn role_label(role: FieldRole) -> &'static str {
    match role {
        FieldRole::Plain => "",
        FieldRole::Title => "title",
        FieldRole::Summary => "summary",
        FieldRole::Detail => "detail",
        FieldRole::Score => "score",
    }
}
