mod config;
mod rules;
mod tables;

pub use config::{EvaluationConfig, EvaluationProfile, FallbackDialect};
pub use rules::{DecisionRule, DecisionTable, DscrBand};
pub use tables::{table_for, TABLE_VERSION};

use std::sync::Arc;

use tracing::{debug, error};

use super::confidence::ConfidenceAdjuster;
use super::domain::{LoanApplication, Segment};
use super::outcome::{Decision, DecisionOutcome, SegmentVerdict};
use super::profiles::ProfileRegistry;

pub const FALLBACK_EXPLANATION: &str = "Although the loan amount complies with the defined borrowing limits, the applicant’s DSCR and risk indicators do not justify an automatic PASS. However, since the only issues relate to missing personal guarantees, debentures, ID verifications, or AML/KYC checks, the application is granted a CONDITIONAL_PASS subject to these additional conditions.";

pub const FALLBACK_FAIL_EXPLANATION: &str =
    "No decision rule matched the application profile. Loan declined.";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("{received} application routed to the {expected} evaluator")]
    SegmentMismatch { expected: Segment, received: Segment },
    #[error("no profile registered for segment {0}")]
    MissingProfile(Segment),
}

/// Applies one segment's hard stops and decision table.
#[derive(Debug, Clone)]
pub struct SegmentEvaluator {
    segment: Segment,
    table: DecisionTable,
    registry: Arc<ProfileRegistry>,
    adjuster: Arc<ConfidenceAdjuster>,
    config: EvaluationConfig,
}

impl SegmentEvaluator {
    pub fn new(
        segment: Segment,
        registry: Arc<ProfileRegistry>,
        adjuster: Arc<ConfidenceAdjuster>,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            segment,
            table: table_for(segment),
            registry,
            adjuster,
            config,
        }
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    pub fn evaluate(&self, application: &LoanApplication) -> Result<SegmentVerdict, EvaluationError> {
        if application.segment != self.segment {
            error!(
                expected = %self.segment,
                received = %application.segment,
                "application routed to the wrong segment evaluator"
            );
            return Err(EvaluationError::SegmentMismatch {
                expected: self.segment,
                received: application.segment,
            });
        }

        let profile = self
            .registry
            .segment(self.segment)
            .ok_or(EvaluationError::MissingProfile(self.segment))?;
        let bounds = profile.bounds(application.security);
        let amount = application.loan_amount;

        if amount < bounds.min {
            return Ok(SegmentVerdict::Settled(DecisionOutcome::fail(format!(
                "Loan amount £{amount} is below the minimum allowed limit of £{} for {} {} loans.",
                bounds.min,
                self.segment.code(),
                application.security
            ))));
        }
        if amount > bounds.max {
            return Ok(SegmentVerdict::Settled(DecisionOutcome::fail(format!(
                "Loan amount £{amount} exceeds the maximum allowed limit of £{} for {} {} loans.",
                bounds.max,
                self.segment.code(),
                application.security
            ))));
        }

        let Some(rule) = self.table.lookup(
            application.risk_tier,
            application.dscr,
            application.security,
            amount,
        ) else {
            debug!(segment = %self.segment, dscr = application.dscr, "no decision rule matched");
            return Ok(SegmentVerdict::Settled(self.fallback()));
        };

        debug!(rule = %rule.id, band = rule.band.label(), decision = %rule.decision, "decision rule matched");

        let outcome = rule.outcome();
        if self.config.profile == EvaluationProfile::HappyPath && rule.decision == Decision::Pass {
            let confidence = self.adjuster.adjust(
                profile.base_confidence,
                amount,
                bounds,
                application.risk_tier,
                application.dscr_level(),
                Some(application.industry_sector.as_str()),
            );
            return Ok(SegmentVerdict::PendingPaperwork(
                outcome.with_confidence(confidence),
            ));
        }

        Ok(SegmentVerdict::Settled(outcome))
    }

    fn fallback(&self) -> DecisionOutcome {
        match self.config.fallback {
            FallbackDialect::ConditionalPass => {
                DecisionOutcome::new(Decision::ConditionalPass, 0.99, FALLBACK_EXPLANATION)
            }
            FallbackDialect::Fail => DecisionOutcome::fail(FALLBACK_FAIL_EXPLANATION),
        }
    }
}
