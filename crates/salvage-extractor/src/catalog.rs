//! Built-in schema descriptors
//!
//! One descriptor per content type the persona and messaging tools ask a
//! text model to produce. Callers with other content types build their own
//! [`SchemaDescriptor`] the same way.

use crate::error::ExtractorError;
use salvage_domain::{FieldSpec, ObjectSchema, SchemaDescriptor};

/// Names accepted by [`by_name`], in listing order
pub const SCHEMA_NAMES: &[&str] = &[
    "anti_persona_report",
    "customer_persona",
    "problem_persona",
    "pitch_headlines",
    "cold_email",
    "website_taglines",
    "social_posts",
];

/// Look up a built-in descriptor by name
pub fn by_name(name: &str) -> Option<SchemaDescriptor> {
    let schema = match name {
        "anti_persona_report" => anti_persona_report(),
        "customer_persona" => customer_persona(),
        "problem_persona" => problem_persona(),
        "pitch_headlines" => pitch_headlines(),
        "cold_email" => cold_email(),
        "website_taglines" => website_taglines(),
        "social_posts" => social_posts(),
        _ => return None,
    };
    Some(schema)
}

/// Like [`by_name`], but an unknown name is an error
pub fn lookup(name: &str) -> Result<SchemaDescriptor, ExtractorError> {
    by_name(name).ok_or_else(|| ExtractorError::UnknownSchema(name.to_string()))
}

/// Every built-in descriptor, in listing order
pub fn all() -> Vec<SchemaDescriptor> {
    SCHEMA_NAMES.iter().filter_map(|name| by_name(name)).collect()
}

fn report_card(detail_lists: &[&str]) -> ObjectSchema {
    let mut fields = vec![
        FieldSpec::text("title").title().optional(),
        FieldSpec::text("summary").summary().optional(),
    ];
    fields.extend(
        detail_lists
            .iter()
            .map(|name| FieldSpec::text_list(*name).detail().optional()),
    );
    ObjectSchema::new(fields)
}

/// Three-card anti-persona and opportunity-cost report
///
/// Card titles and summaries are optional. Opportunity areas and suggested
/// anti-personas are best-effort lists; an area needs a `value_score`
/// between 1 and 5.
pub fn anti_persona_report() -> SchemaDescriptor {
    let mut opportunity = report_card(&["overall_exploration_ideas"]);
    opportunity.fields.insert(
        2,
        FieldSpec::object_list(
            "neglected_areas",
            ObjectSchema::new(vec![
                FieldSpec::text("area_summary").summary().optional(),
                FieldSpec::number_in_range("value_score", 1.0, 5.0).score(),
                FieldSpec::text_list("details").detail().optional(),
            ]),
        )
        .optional(),
    );

    SchemaDescriptor::new(
        "anti_persona_report",
        vec![
            FieldSpec::object(
                "negative_marketing_card",
                report_card(&[
                    "keywords_to_exclude",
                    "channels_to_deprioritize",
                    "sales_red_flags",
                ]),
            ),
            FieldSpec::object(
                "product_brief_card",
                report_card(&[
                    "undesirable_features",
                    "refinement_suggestions",
                    "misuse_warnings",
                ]),
            ),
            FieldSpec::object("opportunity_report_card", opportunity),
            FieldSpec::object_list(
                "suggested_anti_personas",
                ObjectSchema::new(vec![
                    FieldSpec::text("persona_name").summary(),
                    FieldSpec::text("reason").detail(),
                ]),
            ),
        ],
    )
}

/// Customer persona synthesized from feedback
pub fn customer_persona() -> SchemaDescriptor {
    SchemaDescriptor::new(
        "customer_persona",
        vec![
            FieldSpec::text("name").non_empty(),
            FieldSpec::text("archetype").non_empty(),
            FieldSpec::text("motivations_summary").summary(),
            FieldSpec::text_list("motivations_details").optional(),
            FieldSpec::text("pain_points_summary").summary(),
            FieldSpec::text_list("pain_points_details").optional(),
            FieldSpec::text("aspirations_summary").summary(),
            FieldSpec::text_list("aspirations_details").optional(),
            FieldSpec::text("typical_scenario").optional(),
            FieldSpec::text("visual_avatar_description").optional(),
        ],
    )
}

/// Persona that embodies a given problem statement
pub fn problem_persona() -> SchemaDescriptor {
    SchemaDescriptor::new(
        "problem_persona",
        vec![
            FieldSpec::text("name").non_empty(),
            FieldSpec::text("archetype").non_empty(),
            FieldSpec::text("problem_description_from_persona_view_summary").summary(),
            FieldSpec::text("problem_description_from_persona_view_details").optional(),
            FieldSpec::text("current_solutions_and_their_flaws_summary").summary(),
            FieldSpec::text_list("current_solutions_and_their_flaws_details").optional(),
            FieldSpec::text("ideal_solution_expectations_summary").summary(),
            FieldSpec::text_list("ideal_solution_expectations_details").optional(),
            FieldSpec::text("motivations_related_to_problem_summary").summary(),
            FieldSpec::text_list("motivations_related_to_problem_details").optional(),
            FieldSpec::text("pain_points_related_to_problem_summary").summary(),
            FieldSpec::text_list("pain_points_related_to_problem_details").optional(),
            FieldSpec::text("visual_avatar_description").optional(),
        ],
    )
}

/// Investor pitch slide headlines
pub fn pitch_headlines() -> SchemaDescriptor {
    SchemaDescriptor::new(
        "pitch_headlines",
        vec![FieldSpec::text_list("headlines").non_empty()],
    )
}

/// Short personalized cold email
pub fn cold_email() -> SchemaDescriptor {
    SchemaDescriptor::new(
        "cold_email",
        vec![
            FieldSpec::text("subject").non_empty(),
            FieldSpec::text("body").non_empty(),
        ],
    )
}

/// Website taglines / hero ideas
pub fn website_taglines() -> SchemaDescriptor {
    SchemaDescriptor::new(
        "website_taglines",
        vec![FieldSpec::text_list("taglines").non_empty()],
    )
}

/// Social media post hooks
pub fn social_posts() -> SchemaDescriptor {
    SchemaDescriptor::new("social_posts", vec![FieldSpec::text_list("posts").non_empty()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use salvage_domain::FieldKind;

    #[test]
    fn test_every_name_resolves() {
        for name in SCHEMA_NAMES {
            let schema = by_name(name).unwrap();
            assert_eq!(schema.name(), *name);
            assert!(!schema.fields().is_empty());
        }
        assert_eq!(all().len(), SCHEMA_NAMES.len());
    }

    #[test]
    fn test_unknown_name() {
        assert!(by_name("landing_page").is_none());
        assert!(matches!(
            lookup("landing_page"),
            Err(ExtractorError::UnknownSchema(name)) if name == "landing_page"
        ));
    }

    #[test]
    fn test_anti_persona_report_shape() {
        let schema = anti_persona_report();
        let keys: Vec<&str> = schema.required_keys().collect();
        assert_eq!(
            keys,
            vec![
                "negative_marketing_card",
                "product_brief_card",
                "opportunity_report_card",
                "suggested_anti_personas"
            ]
        );

        let Some(FieldSpec { kind: FieldKind::Object(card), .. }) =
            schema.root().field("opportunity_report_card")
        else {
            panic!("opportunity card should be an object");
        };
        let areas = card.field("neglected_areas").unwrap();
        assert!(areas.is_best_effort());
        assert!(!areas.required);
        assert_eq!(card.fields[2].name, "neglected_areas");
    }
}
