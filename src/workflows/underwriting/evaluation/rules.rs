use serde::Serialize;

use super::super::domain::{RiskTier, Segment, SecurityType};
use super::super::outcome::{Decision, DecisionOutcome};

/// Canonical DSCR bands shared by every segment table.
///
/// `Strong` and `Upper` overlap at exactly 1.50, and `Upper` and `Lower` overlap on
/// (1.349, 1.35]; bands are always tried in [`DscrBand::PRIORITY`] order so the overlap
/// resolves to the more favourable band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DscrBand {
    Strong,
    Upper,
    Lower,
}

impl DscrBand {
    pub const PRIORITY: [DscrBand; 3] = [DscrBand::Strong, DscrBand::Upper, DscrBand::Lower];

    pub fn contains(&self, dscr: f64) -> bool {
        match self {
            DscrBand::Strong => dscr >= 1.50,
            DscrBand::Upper => dscr > 1.349 && dscr <= 1.50,
            DscrBand::Lower => dscr > 1.25 && dscr <= 1.35,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DscrBand::Strong => "dscr >= 1.50",
            DscrBand::Upper => "1.349 < dscr <= 1.50",
            DscrBand::Lower => "1.25 < dscr <= 1.35",
        }
    }
}

/// One row of a segment decision table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRule {
    pub id: String,
    pub tier: RiskTier,
    pub band: DscrBand,
    pub security: SecurityType,
    pub max_amount: f64,
    pub decision: Decision,
    pub confidence: f64,
    pub explanation: &'static str,
}

impl DecisionRule {
    pub fn matches(&self, tier: RiskTier, dscr: f64, security: SecurityType, amount: f64) -> bool {
        self.tier == tier
            && self.security == security
            && self.band.contains(dscr)
            && amount <= self.max_amount
    }

    pub fn outcome(&self) -> DecisionOutcome {
        DecisionOutcome::new(self.decision, self.confidence, self.explanation)
    }
}

/// Ordered, versioned decision table for one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTable {
    pub segment: Segment,
    pub version: &'static str,
    rules: Vec<DecisionRule>,
}

impl DecisionTable {
    pub(crate) fn new(segment: Segment, version: &'static str, rows: Vec<RuleRow>) -> Self {
        let rules = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| DecisionRule {
                id: format!("{}-{:02}", segment.code(), index + 1),
                tier: row.tier,
                band: row.band,
                security: row.security,
                max_amount: row.max_amount,
                decision: row.decision,
                confidence: row.confidence,
                explanation: row.explanation,
            })
            .collect();

        Self {
            segment,
            version,
            rules,
        }
    }

    pub fn rules(&self) -> &[DecisionRule] {
        &self.rules
    }

    /// First matching row, probing bands from strongest to weakest.
    pub fn lookup(
        &self,
        tier: RiskTier,
        dscr: f64,
        security: SecurityType,
        amount: f64,
    ) -> Option<&DecisionRule> {
        DscrBand::PRIORITY.iter().find_map(|band| {
            self.rules.iter().find(|rule| {
                rule.band == *band && rule.matches(tier, dscr, security, amount)
            })
        })
    }
}

/// Compact row literal used by the table definitions.
pub(crate) struct RuleRow {
    pub tier: RiskTier,
    pub band: DscrBand,
    pub security: SecurityType,
    pub max_amount: f64,
    pub decision: Decision,
    pub confidence: f64,
    pub explanation: &'static str,
}
