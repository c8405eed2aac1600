use chrono::{DateTime, SecondsFormat, Utc};

use super::super::audit::AuditTrail;
use super::super::outcome::DecisionOutcome;
use super::collaborator::ACCEPTANCE_MARKER;
use super::schema::UnderwriterSchema;

/// Request-scoped details appended to every prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptContext {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub audit: Option<String>,
}

impl PromptContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            audit: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::new("N/A")
    }

    pub fn from_trail(trail: &AuditTrail) -> Self {
        Self {
            request_id: trail.request_id.clone(),
            timestamp: trail.evaluated_at,
            audit: Some(trail.render()),
        }
    }
}

pub fn business_logic_section(schema: &UnderwriterSchema) -> String {
    let mut section = format!(
        "You are {}. Your task is to generate a clear, well-structured explanation for a loan application decision.\n\n",
        schema.instructions.role
    );
    section.push_str("Please include the following in your narrative:\n");
    for guideline in &schema.instructions.prompt_guidelines {
        section.push_str("- ");
        section.push_str(guideline);
        section.push('\n');
    }
    section
}

pub fn objective_section(schema: &UnderwriterSchema) -> String {
    format!(
        "Objective:\n{}\n\nIf information is insufficient: {}\n",
        schema.instructions.objective, schema.fallback
    )
}

pub fn evaluation_details_section(outcome: &DecisionOutcome) -> String {
    let overall_risk = outcome
        .overall_risk()
        .map_or_else(|| "N/A".to_string(), |risk| format!("{risk:.2}"));
    let required_pg = outcome
        .required_pg()
        .map_or_else(|| "N/A".to_string(), |pg| format!("{:.0}%", pg * 100.0));
    let missing = match outcome.missing_documents() {
        Some(documents) if !documents.is_empty() => documents
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => "None".to_string(),
    };

    format!(
        "Evaluation Decision:\n  - Decision: {}\n  - Confidence: {:.2}\n  - Explanation: {}\n\n\
         Additional Evaluation Details:\n  - Overall Risk Score: {}\n  - Required PG Percentage: {}\n  - Missing Documents: {}\n",
        outcome.decision(),
        outcome.confidence(),
        outcome.explanation(),
        overall_risk,
        required_pg,
        missing
    )
}

pub fn additional_context_section(context: &PromptContext) -> String {
    let mut section = format!(
        "Additional Context: Timestamp: {}, Request ID: {}\n",
        context.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        context.request_id
    );
    if let Some(audit) = &context.audit {
        section.push_str("Audit Trail:\n");
        section.push_str(audit);
        section.push('\n');
    }
    section
}

pub fn narrative_prompt(
    schema: &UnderwriterSchema,
    outcome: &DecisionOutcome,
    context: &PromptContext,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\nPlease generate the narrative explanation.",
        business_logic_section(schema),
        objective_section(schema),
        evaluation_details_section(outcome),
        additional_context_section(context)
    )
}

pub fn verification_prompt(
    narrative: &str,
    outcome: &DecisionOutcome,
    context: &PromptContext,
) -> String {
    format!(
        "Review the following evaluation decision and narrative explanation for consistency with the business rules and risk configurations.\n\n\
         {}\n{}\nNarrative Explanation:\n{}\n\n\
         If the narrative accurately reflects the evaluation decision and business logic, reply with '{}.' Otherwise, list any inconsistencies.",
        evaluation_details_section(outcome),
        additional_context_section(context),
        narrative,
        ACCEPTANCE_MARKER
    )
}
