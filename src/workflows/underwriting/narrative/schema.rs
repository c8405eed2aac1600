use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SCHEMA_VERSION: &str = "3.0";
pub const UNDERWRITER_ROLE: &str = "Underwriter GPT";

pub const FALLBACK_POLICY: &str = "If any required data from the input scenario is missing, ambiguous, or fails verification, default to flagging the application for manual review. Clearly note which data points were insufficient and recommend obtaining additional information.";

const OBJECTIVE: &str = "Generate a comprehensive explanation for an auto-approved loan application by analyzing the complete input scenario data against a set of business rules, risk metrics, and regulatory requirements. Your explanation must detail the decision-making process, include an audit trail with rule versioning and timestamps, and reference specific rule IDs, thresholds, and risk adjustments for full transparency and compliance.";

const PROMPT_GUIDELINES: [&str; 8] = [
    "Begin with a 'Decisioning Summary' that states the final decision (PASS, FLAG_AI, FLAG_UW, FAIL, or CONDITIONAL_PASS) and the overall confidence rating.",
    "Include a 'Business Logic Explanation' section detailing all key rules, risk adjustments, and calculations applied. Reference specific rule IDs and thresholds where applicable.",
    "Provide an 'Input Scenario Analysis' section summarizing the complete input data, including SME profile, risk profile, DSCR, loan amount, loan type, borrower type, credit checks, and verification statuses.",
    "Enumerate any triggered deterministic rules along with detailed explanations of their impact on the decision.",
    "Include a 'Submission Checklist' listing any documents or verifications still outstanding.",
    "Include 'Risk Mitigation Recommendations' outlining any additional security measures or manual review requirements for borderline cases.",
    "Add an 'Audit Information' section that records the rule version, evaluation timestamp, and a log of the decision-making process.",
    "Include 'Compliance Notes' that describe adherence to regulatory guidelines and internal lending policies, along with any documented exceptions.",
];

const OUTPUT_STRUCTURE: [(&str, &str); 8] = [
    ("decisioning_summary", "A concise overview of the final decision and the associated confidence rating."),
    ("business_logic_explanation", "A detailed breakdown of the applied business rules, risk adjustments, and calculations, including references to specific rule IDs."),
    ("input_scenario_analysis", "A summary of all provided input data used in the evaluation."),
    ("applied_rules", "A list of triggered deterministic rules with their IDs and detailed explanations of how they impacted the decision."),
    ("submission_checklist", "A checklist of required documents."),
    ("risk_recommendations", "Recommendations for mitigating risks, including additional security requirements or notes for manual review if the case is borderline."),
    ("audit_information", "Metadata including the rule version, evaluation timestamp, and an audit trail of all decisions made."),
    ("compliance_notes", "Notes confirming adherence to regulatory requirements and internal lending policies, along with any documented exceptions."),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderwriterInstructions {
    pub role: String,
    pub objective: String,
    pub prompt_guidelines: Vec<String>,
    pub output_structure: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditAndVersioning {
    pub rule_version: String,
    pub timestamp: DateTime<Utc>,
    pub audit_trail: String,
}

/// Versioned instructions handed to the narrative collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderwriterSchema {
    pub version: String,
    pub instructions: UnderwriterInstructions,
    pub data_sources: BTreeMap<String, String>,
    pub fallback: String,
    pub audit_and_versioning: AuditAndVersioning,
    pub compliance_notes: String,
}

impl UnderwriterSchema {
    pub fn current() -> Self {
        Self::stamped(Utc::now())
    }

    pub fn stamped(timestamp: DateTime<Utc>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            instructions: UnderwriterInstructions {
                role: UNDERWRITER_ROLE.to_string(),
                objective: OBJECTIVE.to_string(),
                prompt_guidelines: PROMPT_GUIDELINES.iter().map(|line| line.to_string()).collect(),
                output_structure: OUTPUT_STRUCTURE
                    .iter()
                    .map(|(key, text)| (key.to_string(), text.to_string()))
                    .collect(),
            },
            data_sources: BTreeMap::from([
                (
                    "decisioning_engine".to_string(),
                    "Deterministic segment decision tables, confidence adjustments and the risk curve produce the decision being explained.".to_string(),
                ),
                (
                    "external_data".to_string(),
                    "Includes verifications from external sources such as credit bureaus, open banking data, financial statements, and borrower identity checks.".to_string(),
                ),
            ]),
            fallback: FALLBACK_POLICY.to_string(),
            audit_and_versioning: AuditAndVersioning {
                rule_version: SCHEMA_VERSION.to_string(),
                timestamp,
                audit_trail: "A detailed log of all input data, applied rules, risk adjustments, and the final decision for compliance and regulatory review.".to_string(),
            },
            compliance_notes: "Ensure that the decision explanation adheres to internal lending policies and external regulatory guidelines. Any deviations must be clearly documented with appropriate justifications.".to_string(),
        }
    }
}
