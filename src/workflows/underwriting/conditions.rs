use tracing::info;

use super::domain::{LoanApplication, Segment, SecurityType};
use super::outcome::{Decision, DecisionOutcome};

const CONDITIONAL_CONFIDENCE: f64 = 0.99;

/// Supplementary condition that can hold a loan at conditional approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionCheck {
    PersonalGuarantee,
    Debenture,
    LegalCharge,
    DueDiligence,
    BusinessRegistration,
}

impl ConditionCheck {
    pub const ORDER: [ConditionCheck; 5] = [
        ConditionCheck::PersonalGuarantee,
        ConditionCheck::Debenture,
        ConditionCheck::LegalCharge,
        ConditionCheck::DueDiligence,
        ConditionCheck::BusinessRegistration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConditionCheck::PersonalGuarantee => "personal_guarantee",
            ConditionCheck::Debenture => "debenture",
            ConditionCheck::LegalCharge => "legal_charge",
            ConditionCheck::DueDiligence => "due_diligence",
            ConditionCheck::BusinessRegistration => "business_registration",
        }
    }

    fn unmet(&self, application: &LoanApplication) -> Option<String> {
        let conditions = &application.conditions;
        match self {
            ConditionCheck::PersonalGuarantee => (application.segment != Segment::Established
                && conditions.provided_pg < conditions.min_pg_required)
                .then(|| {
                    format!(
                        "Loan approved on condition that a minimum {}% Personal Guarantee (PG) is signed before funding.",
                        (conditions.min_pg_required * 100.0).round()
                    )
                }),
            ConditionCheck::Debenture => (application.segment != Segment::Startup
                && conditions.requires_debenture
                && !conditions.has_debenture)
                .then(|| {
                    "Loan approved on condition that a Debenture is signed before funding.".to_string()
                }),
            ConditionCheck::LegalCharge => (application.security == SecurityType::Secured
                && !conditions.has_legal_charge)
                .then(|| {
                    "Loan approved on condition that the lender obtains a Legal Charge (First or Second) over the security before funding."
                        .to_string()
                }),
            ConditionCheck::DueDiligence => (!conditions.due_diligence_complete).then(|| {
                "Loan approved on condition that all AML/KYC and Due Diligence checks are successfully completed before funding."
                    .to_string()
            }),
            ConditionCheck::BusinessRegistration => (!conditions.business_registered).then(|| {
                "Loan approved on condition that borrower provides proof of business registration before funding."
                    .to_string()
            }),
        }
    }
}

/// Walks the supplementary conditions in order; the first unmet one short-circuits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionalResolver;

impl ConditionalResolver {
    pub fn resolve(&self, application: &LoanApplication) -> Option<DecisionOutcome> {
        ConditionCheck::ORDER.iter().find_map(|check| {
            let explanation = check.unmet(application)?;
            info!(condition = check.label(), segment = %application.segment, "conditional approval triggered");
            Some(DecisionOutcome::new(
                Decision::ConditionalPass,
                CONDITIONAL_CONFIDENCE,
                explanation,
            ))
        })
    }
}
