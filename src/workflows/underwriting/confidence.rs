use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{DscrLevel, RiskTier};
use super::outcome::{MAX_CONFIDENCE, MIN_CONFIDENCE};
use super::profiles::LoanBounds;

/// Normalizes a segment's base confidence against the requested amount, tier and DSCR level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceAdjuster {
    pub loan_adjustment_factor: f64,
    pub tier_deltas: BTreeMap<RiskTier, f64>,
    pub dscr_deltas: Vec<(DscrLevel, f64)>,
    pub industry_deltas: BTreeMap<String, f64>,
}

impl Default for ConfidenceAdjuster {
    fn default() -> Self {
        Self {
            loan_adjustment_factor: 0.10,
            tier_deltas: BTreeMap::from([
                (RiskTier::T1, 0.10),
                (RiskTier::T2, 0.00),
                (RiskTier::T3, -0.15),
            ]),
            dscr_deltas: vec![
                (DscrLevel::Low, -0.15),
                (DscrLevel::Medium, 0.00),
                (DscrLevel::High, 0.10),
            ],
            industry_deltas: BTreeMap::new(),
        }
    }
}

impl ConfidenceAdjuster {
    pub fn adjust(
        &self,
        base: f64,
        requested: f64,
        bounds: LoanBounds,
        tier: RiskTier,
        dscr_level: DscrLevel,
        industry: Option<&str>,
    ) -> f64 {
        let span = bounds.max - bounds.min;
        let denominator = if span == 0.0 { 1.0 } else { span };
        let reduction = ((requested - bounds.min) / denominator) * self.loan_adjustment_factor;
        let loan_confidence = (base - reduction).max(MIN_CONFIDENCE);

        let tier_delta = self.tier_deltas.get(&tier).copied().unwrap_or(0.0);
        let dscr_delta = self
            .dscr_deltas
            .iter()
            .find(|(level, _)| *level == dscr_level)
            .map_or(0.0, |(_, delta)| *delta);
        let industry_delta = industry
            .and_then(|sector| self.industry_deltas.get(sector))
            .copied()
            .unwrap_or(0.0);

        let adjusted = loan_confidence + tier_delta + dscr_delta + industry_delta;
        if adjusted.is_nan() {
            return MIN_CONFIDENCE;
        }
        adjusted.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    }
}
