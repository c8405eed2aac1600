use std::sync::Arc;

use tracing::info;

use super::domain::{BorrowerType, RiskTier, Segment};
use super::evaluation::EvaluationProfile;
use super::outcome::{Decision, DecisionOutcome};
use super::profiles::{IndustryStanding, ProfileRegistry};

pub const MIN_DSCR: f64 = 1.25;
pub const MIN_LOAN_AMOUNT: f64 = 25_001.0;
const GATE_CONFIDENCE: f64 = 0.99;

/// Portfolio-wide checks applied before any segment table.
#[derive(Debug, Clone)]
pub struct EligibilityGate {
    profile: EvaluationProfile,
    registry: Arc<ProfileRegistry>,
}

impl EligibilityGate {
    pub fn new(profile: EvaluationProfile, registry: Arc<ProfileRegistry>) -> Self {
        Self { profile, registry }
    }

    /// First violated check wins; `None` means the application may proceed.
    pub fn check_global(
        &self,
        dscr: f64,
        amount: f64,
        tier: RiskTier,
        segment: Segment,
        industry: &str,
    ) -> Option<DecisionOutcome> {
        let outcome = self.first_violation(dscr, amount, tier, segment, industry)?;
        info!(
            segment = %segment,
            decision = %outcome.decision(),
            reason = outcome.explanation(),
            "application stopped at eligibility gate"
        );
        Some(outcome)
    }

    fn first_violation(
        &self,
        dscr: f64,
        amount: f64,
        tier: RiskTier,
        segment: Segment,
        industry: &str,
    ) -> Option<DecisionOutcome> {
        // Negated comparisons so NaN never slips through.
        if !(dscr >= MIN_DSCR) {
            return Some(DecisionOutcome::fail("DSCR <125%. Loan declined."));
        }
        if !(amount >= MIN_LOAN_AMOUNT) {
            return Some(DecisionOutcome::fail(
                "Loan amount below £25,001. Does not meet minimum threshold.",
            ));
        }

        if self.profile == EvaluationProfile::HappyPath {
            if tier == RiskTier::T3 {
                return Some(DecisionOutcome::fail(
                    "T3 risk profiles do not meet the minimum credit profile threshold.",
                ));
            }
            if segment == Segment::Startup {
                return Some(DecisionOutcome::fail(
                    "Startups are not considered for the Happy Path.",
                ));
            }
        }

        match self.registry.industries().standing(industry) {
            IndustryStanding::Acceptable => None,
            IndustryStanding::Disallowed => Some(DecisionOutcome::fail(format!(
                "Industry sector '{industry}' is not accepted."
            ))),
            IndustryStanding::Unrecognized => Some(DecisionOutcome::new(
                Decision::FlagUw,
                GATE_CONFIDENCE,
                format!("Industry sector '{industry}' is not recognized."),
            )),
        }
    }

    pub fn check_borrower(&self, borrower: &BorrowerType) -> Option<DecisionOutcome> {
        if borrower.is_accepted() {
            return None;
        }
        info!(borrower_type = %borrower, "borrower type rejected");
        Some(DecisionOutcome::fail(format!(
            "Borrower type {borrower} is not allowed."
        )))
    }
}
