use serde::Serialize;

use super::domain::{DscrLevel, RiskTier, Segment};
use super::profiles::{IndustryCatalog, IndustryStanding};

/// Weighted risk score from 1.0 (best) to 2.16 (worst). Left unclamped; [`PgCurve`] clamps its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAggregator {
    pub segment_weight: f64,
    pub dscr_weight: f64,
    pub tier_weight: f64,
    pub industry_weight: f64,
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self {
            segment_weight: 0.32,
            dscr_weight: 0.32,
            tier_weight: 0.32,
            industry_weight: 0.04,
        }
    }
}

impl RiskAggregator {
    pub fn segment_score(segment: Segment) -> f64 {
        match segment {
            Segment::Established => 1.0,
            Segment::EarlyStage => 1.5,
            Segment::NewlyTrading => 2.0,
            Segment::Startup => 2.5,
        }
    }

    pub fn dscr_score(level: DscrLevel) -> f64 {
        match level {
            DscrLevel::High => 1.0,
            DscrLevel::Medium => 1.5,
            DscrLevel::Low => 2.0,
        }
    }

    pub fn tier_score(tier: RiskTier) -> f64 {
        match tier {
            RiskTier::T1 => 1.0,
            RiskTier::T2 => 1.5,
            RiskTier::T3 => 2.0,
        }
    }

    pub fn industry_score(catalog: &IndustryCatalog, sector: &str) -> f64 {
        match catalog.standing(sector) {
            IndustryStanding::Acceptable => 1.0,
            IndustryStanding::Disallowed | IndustryStanding::Unrecognized => 2.0,
        }
    }

    pub fn overall(
        &self,
        segment: Segment,
        dscr_level: DscrLevel,
        tier: RiskTier,
        industry_score: f64,
    ) -> f64 {
        self.segment_weight * Self::segment_score(segment)
            + self.dscr_weight * Self::dscr_score(dscr_level)
            + self.tier_weight * Self::tier_score(tier)
            + self.industry_weight * industry_score
    }
}

/// Linear personal-guarantee interpolation over the overall risk score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PgCurve {
    pub base_pg: f64,
    pub max_pg: f64,
    pub min_risk: f64,
    pub max_risk: f64,
}

impl Default for PgCurve {
    fn default() -> Self {
        Self {
            base_pg: 0.20,
            max_pg: 1.00,
            min_risk: 1.0,
            max_risk: 2.0,
        }
    }
}

impl PgCurve {
    /// Out-of-range risk clamps to the curve ends. Written as a lerp so 1.5 lands on 0.60.
    pub fn required_pg(&self, overall_risk: f64) -> f64 {
        let span = self.max_risk - self.min_risk;
        let t = if span > 0.0 {
            ((overall_risk - self.min_risk) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if t.is_nan() {
            return self.max_pg;
        }
        self.base_pg * (1.0 - t) + self.max_pg * t
    }
}
