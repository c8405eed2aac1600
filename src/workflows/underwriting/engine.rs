use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use super::audit::{AuditStage, AuditTrail};
use super::checklist::DocumentChecklist;
use super::conditions::ConditionalResolver;
use super::confidence::ConfidenceAdjuster;
use super::domain::{LoanApplication, Segment};
use super::evaluation::{EvaluationConfig, EvaluationError, SegmentEvaluator, TABLE_VERSION};
use super::gate::EligibilityGate;
use super::outcome::DecisionOutcome;
use super::profiles::ProfileRegistry;
use super::risk::{PgCurve, RiskAggregator};

/// Runs the full decision pipeline over immutable, shared configuration.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: EvaluationConfig,
    registry: Arc<ProfileRegistry>,
    gate: EligibilityGate,
    resolver: ConditionalResolver,
    evaluators: BTreeMap<Segment, SegmentEvaluator>,
    checklist: DocumentChecklist,
    aggregator: RiskAggregator,
    pg_curve: PgCurve,
}

impl DecisionEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self::with_registry(config, Arc::new(ProfileRegistry::standard()))
    }

    pub fn with_registry(config: EvaluationConfig, registry: Arc<ProfileRegistry>) -> Self {
        let adjuster = Arc::new(ConfidenceAdjuster::default());
        let evaluators = Segment::ALL
            .iter()
            .map(|segment| {
                (
                    *segment,
                    SegmentEvaluator::new(*segment, registry.clone(), adjuster.clone(), config),
                )
            })
            .collect();

        Self {
            config,
            gate: EligibilityGate::new(config.profile, registry.clone()),
            registry,
            resolver: ConditionalResolver,
            evaluators,
            checklist: DocumentChecklist::default(),
            aggregator: RiskAggregator::default(),
            pg_curve: PgCurve::default(),
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn evaluator(&self, segment: Segment) -> Option<&SegmentEvaluator> {
        self.evaluators.get(&segment)
    }

    pub fn checklist(&self) -> &DocumentChecklist {
        &self.checklist
    }

    pub fn evaluate(&self, application: &LoanApplication) -> Result<DecisionOutcome, EvaluationError> {
        let mut trail = AuditTrail::new("", TABLE_VERSION);
        self.run(application, &mut trail)
    }

    pub fn evaluate_with_trail(
        &self,
        application: &LoanApplication,
        request_id: impl Into<String>,
    ) -> Result<(DecisionOutcome, AuditTrail), EvaluationError> {
        let mut trail = AuditTrail::new(request_id, TABLE_VERSION);
        let outcome = self.run(application, &mut trail)?;
        Ok((outcome, trail))
    }

    fn run(
        &self,
        application: &LoanApplication,
        trail: &mut AuditTrail,
    ) -> Result<DecisionOutcome, EvaluationError> {
        if let Some(outcome) = self.gate.check_global(
            application.dscr,
            application.loan_amount,
            application.risk_tier,
            application.segment,
            &application.industry_sector,
        ) {
            trail.record(AuditStage::Gate, outcome.summary());
            return Ok(outcome);
        }
        trail.record(AuditStage::Gate, "global eligibility checks passed");

        if self.config.screen_borrower_type {
            if let Some(outcome) = self.gate.check_borrower(&application.borrower_type) {
                trail.record(AuditStage::BorrowerScreen, outcome.summary());
                return Ok(outcome);
            }
            trail.record(
                AuditStage::BorrowerScreen,
                format!("borrower type {} accepted", application.borrower_type),
            );
        }

        if let Some(outcome) = self.resolver.resolve(application) {
            trail.record(AuditStage::Conditions, outcome.summary());
            return Ok(self.attach_risk(application, outcome, trail));
        }
        trail.record(AuditStage::Conditions, "supplementary conditions satisfied");

        let evaluator = self
            .evaluators
            .get(&application.segment)
            .ok_or(EvaluationError::MissingProfile(application.segment))?;
        let verdict = evaluator.evaluate(application)?;
        trail.record(AuditStage::SegmentTable, verdict.describe());

        let outcome = self.checklist.finalize_checklist(
            verdict,
            &application.provided_documents,
            application.segment,
        );
        if let Some(missing) = outcome.missing_documents() {
            trail.record(
                AuditStage::Checklist,
                format!("{} required documents outstanding", missing.len()),
            );
        }

        Ok(self.attach_risk(application, outcome, trail))
    }

    fn attach_risk(
        &self,
        application: &LoanApplication,
        outcome: DecisionOutcome,
        trail: &mut AuditTrail,
    ) -> DecisionOutcome {
        let industry_score = RiskAggregator::industry_score(
            self.registry.industries(),
            &application.industry_sector,
        );
        let overall_risk = self.aggregator.overall(
            application.segment,
            application.dscr_level(),
            application.risk_tier,
            industry_score,
        );
        let required_pg = self.pg_curve.required_pg(overall_risk);
        let outcome = outcome.with_risk(overall_risk, required_pg);

        trail.record(
            AuditStage::Risk,
            format!("overall risk {overall_risk:.2}, required PG {required_pg:.2}"),
        );
        info!(
            segment = %application.segment,
            tier = %application.risk_tier,
            decision = %outcome.decision(),
            confidence = outcome.confidence(),
            overall_risk,
            "loan application evaluated"
        );
        outcome
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}
