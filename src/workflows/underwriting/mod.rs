//! SME loan eligibility decisioning: eligibility gate, per-segment decision tables, conditional
//! resolution, document checklist, risk aggregation and the narrative rationale loop.

pub mod audit;
pub mod batch;
pub mod checklist;
pub mod conditions;
pub mod confidence;
pub mod domain;
pub mod engine;
pub mod evaluation;
pub mod gate;
pub mod narrative;
pub mod outcome;
pub mod profiles;
pub mod risk;
pub mod router;

#[cfg(test)]
mod tests;

pub use audit::{AuditEntry, AuditStage, AuditTrail};
pub use batch::{BatchImportError, BatchImporter};
pub use checklist::{DocumentChecklist, PENDING_DOCUMENTS_CLAUSE};
pub use conditions::{ConditionCheck, ConditionalResolver};
pub use confidence::ConfidenceAdjuster;
pub use domain::{
    BorrowerType, DscrLevel, LoanApplication, RiskTier, Segment, SecurityType,
    SupplementaryConditions,
};
pub use engine::DecisionEngine;
pub use evaluation::{
    DecisionRule, DecisionTable, DscrBand, EvaluationConfig, EvaluationError, EvaluationProfile,
    FallbackDialect, SegmentEvaluator, FALLBACK_EXPLANATION,
};
pub use gate::{EligibilityGate, MIN_DSCR, MIN_LOAN_AMOUNT};
pub use outcome::{Decision, DecisionOutcome, SegmentVerdict, MAX_CONFIDENCE, MIN_CONFIDENCE};
pub use profiles::{
    IndustryCatalog, IndustryStanding, LoanBounds, ProfileRegistry, RiskTierProfile,
    SegmentProfile,
};
pub use risk::{PgCurve, RiskAggregator};
pub use router::underwriting_router;
