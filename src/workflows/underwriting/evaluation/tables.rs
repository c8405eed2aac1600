//! Fixed decision tables, one per segment.
//!
//! Rows whose source rule spans several bands (for example NTB `dscr > 1.25`) are
//! expanded onto each canonical band and keep the rule's original wording.

use super::super::domain::RiskTier::{T1, T2, T3};
use super::super::domain::SecurityType::{Secured, Unsecured};
use super::super::domain::{RiskTier, Segment, SecurityType};
use super::super::outcome::Decision;
use super::super::outcome::Decision::{Fail, FlagAi, FlagUw, Pass};
use super::rules::DscrBand::{Lower, Strong, Upper};
use super::rules::{DecisionTable, DscrBand, RuleRow};

pub const TABLE_VERSION: &str = "2024.1";

fn row(
    tier: RiskTier,
    band: DscrBand,
    security: SecurityType,
    max_amount: f64,
    decision: Decision,
    confidence: f64,
    explanation: &'static str,
) -> RuleRow {
    RuleRow {
        tier,
        band,
        security,
        max_amount,
        decision,
        confidence,
        explanation,
    }
}

pub fn table_for(segment: Segment) -> DecisionTable {
    let rows = match segment {
        Segment::Established => established(),
        Segment::EarlyStage => early_stage(),
        Segment::NewlyTrading => newly_trading(),
        Segment::Startup => startup(),
    };
    DecisionTable::new(segment, TABLE_VERSION, rows)
}

#[rustfmt::skip]
fn established() -> Vec<RuleRow> {
    vec![
        row(T1, Strong, Unsecured, 150_000.0, Pass, 0.87,
            "EB/T1 with DSCR >150% qualifies for an unsecured loan."),
        row(T1, Strong, Secured, 250_000.0, Pass, 0.89,
            "EB/T1 with DSCR >150% qualifies for a secured loan."),
        row(T2, Strong, Unsecured, 150_000.0, Pass, 0.87,
            "EB/T2 with DSCR >150% qualifies for an unsecured loan."),
        row(T2, Strong, Secured, 250_000.0, Pass, 0.89,
            "EB/T2 with DSCR >150% qualifies for a secured loan."),
        row(T3, Strong, Unsecured, 100_000.0, FlagAi, 0.75,
            "EB/T3 with DSCR >150% (unsecured): AI review required."),
        row(T3, Strong, Secured, 250_000.0, FlagAi, 0.78,
            "EB/T3 with DSCR >150% (secured): AI review required."),
        row(T1, Upper, Unsecured, 150_000.0, Pass, 0.85,
            "EB/T1 with DSCR just below 150% qualifies for an unsecured loan."),
        row(T1, Upper, Secured, 250_000.0, Pass, 0.88,
            "EB/T1 with DSCR just below 150% qualifies for a secured loan."),
        row(T2, Upper, Unsecured, 100_000.0, Pass, 0.80,
            "EB/T2 with DSCR just below 150% qualifies for an unsecured loan."),
        row(T2, Upper, Secured, 250_000.0, Pass, 0.83,
            "EB/T2 with DSCR just below 150% qualifies for a secured loan."),
        row(T3, Upper, Unsecured, 75_000.0, FlagUw, 0.70,
            "EB/T3 with DSCR just below 150%: underwriter review required (unsecured)."),
        row(T3, Upper, Secured, 250_000.0, FlagUw, 0.72,
            "EB/T3 with DSCR just below 150%: underwriter review required (secured)."),
        row(T1, Lower, Unsecured, 100_000.0, Pass, 0.78,
            "EB/T1 with DSCR between 125%-135% qualifies for an unsecured loan."),
        row(T1, Lower, Secured, 250_000.0, Pass, 0.82,
            "EB/T1 with DSCR between 125%-135% qualifies for a secured loan."),
        row(T2, Lower, Unsecured, 75_000.0, Pass, 0.75,
            "EB/T2 with DSCR between 125%-135% qualifies for an unsecured loan."),
        row(T2, Lower, Secured, 250_000.0, Pass, 0.79,
            "EB/T2 with DSCR between 125%-135% qualifies for a secured loan."),
        row(T3, Lower, Unsecured, 50_000.0, FlagAi, 0.65,
            "EB/T3 with DSCR between 125%-135%: AI review required (unsecured)."),
        row(T3, Lower, Secured, 250_000.0, FlagUw, 0.70,
            "EB/T3 with DSCR between 125%-135%: underwriter review required (secured)."),
    ]
}

#[rustfmt::skip]
fn early_stage() -> Vec<RuleRow> {
    vec![
        row(T1, Strong, Unsecured, 80_000.0, Pass, 0.88,
            "ESB/T1 with DSCR >150% qualifies for an unsecured loan."),
        row(T1, Strong, Secured, 150_000.0, Pass, 0.90,
            "ESB/T1 with DSCR >150% qualifies for a secured loan."),
        row(T2, Strong, Unsecured, 75_000.0, Pass, 0.85,
            "ESB/T2 with DSCR >150% qualifies for an unsecured loan."),
        row(T2, Strong, Secured, 150_000.0, Pass, 0.87,
            "ESB/T2 with DSCR >150% qualifies for a secured loan."),
        row(T3, Strong, Unsecured, 60_000.0, FlagAi, 0.70,
            "ESB/T3 with DSCR >150% (unsecured): AI review required."),
        row(T3, Strong, Secured, 150_000.0, FlagUw, 0.72,
            "ESB/T3 with DSCR >150% (secured): underwriter review required."),
        row(T1, Upper, Unsecured, 80_000.0, Pass, 0.85,
            "ESB/T1 with DSCR between 135%-150% qualifies for an unsecured loan."),
        row(T1, Upper, Secured, 150_000.0, Pass, 0.87,
            "ESB/T1 with DSCR between 135%-150% qualifies for a secured loan."),
        row(T2, Upper, Unsecured, 75_000.0, Pass, 0.82,
            "ESB/T2 with DSCR between 135%-150% qualifies for an unsecured loan."),
        row(T2, Upper, Secured, 150_000.0, Pass, 0.85,
            "ESB/T2 with DSCR between 135%-150% qualifies for a secured loan."),
        row(T3, Upper, Unsecured, 50_000.0, FlagAi, 0.70,
            "ESB/T3 with DSCR between 135%-150%: AI review required (unsecured)."),
        row(T3, Upper, Secured, 150_000.0, FlagUw, 0.72,
            "ESB/T3 with DSCR between 135%-150%: underwriter review required (secured)."),
        row(T1, Lower, Unsecured, 60_000.0, Pass, 0.80,
            "ESB/T1 with DSCR between 125%-135% qualifies for an unsecured loan."),
        row(T1, Lower, Secured, 150_000.0, Pass, 0.83,
            "ESB/T1 with DSCR between 125%-135% qualifies for a secured loan."),
        row(T2, Lower, Unsecured, 50_000.0, Pass, 0.75,
            "ESB/T2 with DSCR >125% and <135% qualifies for a unsecured loan."),
        row(T2, Lower, Secured, 150_000.0, Pass, 0.78,
            "ESB/T2 with DSCR >125% and <135% qualifies for a secured loan."),
        row(T3, Lower, Unsecured, 40_000.0, FlagAi, 0.70,
            "ESB/T3 with DSCR >125% and <135%: AI review required (unsecured)."),
        row(T3, Lower, Secured, 150_000.0, FlagUw, 0.72,
            "ESB/T3 with DSCR >125% and <135%: underwriter review required (secured)."),
    ]
}

#[rustfmt::skip]
fn newly_trading() -> Vec<RuleRow> {
    const T1_UNSECURED: &str = "NTB/T1 with DSCR >125% qualifies for an unsecured loan.";
    const T2_UNSECURED: &str = "NTB/T2 with DSCR >135% qualifies for an unsecured loan.";
    const T3_UNSECURED: &str = "NTB/T3 with DSCR >135%: AI review required (unsecured).";
    const T3_SECURED: &str = "NTB/T3 with DSCR >125%: underwriter review required (secured).";

    vec![
        row(T1, Strong, Unsecured, 60_000.0, Pass, 0.80, T1_UNSECURED),
        row(T1, Strong, Secured, 100_000.0, Pass, 0.85,
            "NTB/T1 with DSCR >150% qualifies for a secured loan."),
        row(T2, Strong, Unsecured, 60_000.0, Pass, 0.78, T2_UNSECURED),
        row(T2, Strong, Secured, 100_000.0, Pass, 0.80,
            "NTB/T2 with DSCR >150% qualifies for a secured loan."),
        row(T3, Strong, Unsecured, 60_000.0, FlagAi, 0.70, T3_UNSECURED),
        row(T3, Strong, Secured, 150_000.0, FlagUw, 0.72, T3_SECURED),
        row(T1, Upper, Unsecured, 60_000.0, Pass, 0.80, T1_UNSECURED),
        row(T2, Upper, Unsecured, 60_000.0, Pass, 0.78, T2_UNSECURED),
        row(T3, Upper, Unsecured, 60_000.0, FlagAi, 0.70, T3_UNSECURED),
        row(T3, Upper, Secured, 150_000.0, FlagUw, 0.72, T3_SECURED),
        row(T1, Lower, Unsecured, 60_000.0, Pass, 0.80, T1_UNSECURED),
        row(T3, Lower, Unsecured, 40_000.0, FlagAi, 0.70,
            "NTB/T3 with DSCR between 125%-135%: AI review required (unsecured)."),
        row(T3, Lower, Secured, 150_000.0, FlagUw, 0.72,
            "NTB/T3 with DSCR between 125%-135%: underwriter review required (secured)."),
    ]
}

#[rustfmt::skip]
fn startup() -> Vec<RuleRow> {
    const T2_UNSECURED: &str = "SU/T2 with DSCR >135%: AI review required (unsecured).";
    const T2_SECURED: &str = "SU/T2 with DSCR >135%: AI review required (secured).";
    const T3_UNSECURED: &str = "SU/T3 with DSCR >135%: underwriter review required (unsecured).";
    const T3_SECURED: &str = "SU/T3 with DSCR >135%: underwriter review required (secured).";

    vec![
        row(T2, Strong, Unsecured, 40_000.0, FlagAi, 0.72, T2_UNSECURED),
        row(T2, Strong, Secured, 80_000.0, FlagAi, 0.75, T2_SECURED),
        row(T3, Strong, Unsecured, 40_000.0, FlagUw, 0.70, T3_UNSECURED),
        row(T3, Strong, Secured, 80_000.0, FlagUw, 0.73, T3_SECURED),
        row(T2, Upper, Unsecured, 40_000.0, FlagAi, 0.72, T2_UNSECURED),
        row(T2, Upper, Secured, 80_000.0, FlagAi, 0.75, T2_SECURED),
        row(T3, Upper, Unsecured, 40_000.0, FlagUw, 0.70, T3_UNSECURED),
        row(T3, Upper, Secured, 80_000.0, FlagUw, 0.73, T3_SECURED),
        row(T1, Lower, Unsecured, 40_000.0, FlagAi, 0.70,
            "SU/T1 with DSCR between 125%-135%: AI review required (unsecured)."),
        row(T1, Lower, Secured, 80_000.0, FlagAi, 0.73,
            "SU/T1 with DSCR between 125%-135%: AI review required (secured)."),
        row(T2, Lower, Unsecured, 40_000.0, Fail, 0.99,
            "SU/T2 with DSCR <135% (unsecured): Loan declined."),
        row(T2, Lower, Secured, 80_000.0, Fail, 0.99,
            "SU/T2 with DSCR <135% (secured): Loan declined."),
        row(T3, Lower, Unsecured, 26_000.0, Fail, 0.99,
            "SU/T3 with DSCR <135% (unsecured): Loan declined."),
        row(T3, Lower, Secured, 80_000.0, Fail, 0.99,
            "SU/T3 with DSCR <135% (secured): Loan declined."),
    ]
}
