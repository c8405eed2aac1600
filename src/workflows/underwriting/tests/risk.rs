use super::common::{application, assert_close};
use crate::workflows::underwriting::domain::{DscrLevel, RiskTier, Segment, SecurityType};
use crate::workflows::underwriting::engine::DecisionEngine;
use crate::workflows::underwriting::outcome::{Decision, DecisionOutcome};
use crate::workflows::underwriting::profiles::ProfileRegistry;
use crate::workflows::underwriting::risk::{PgCurve, RiskAggregator};

#[test]
fn pg_curve_hits_anchor_points_exactly() {
    let curve = PgCurve::default();

    assert_eq!(curve.required_pg(1.0), 0.20);
    assert_eq!(curve.required_pg(1.5), 0.60);
    assert_eq!(curve.required_pg(2.0), 1.00);
}

#[test]
fn pg_curve_clamps_out_of_range_risk() {
    let curve = PgCurve::default();

    assert_eq!(curve.required_pg(0.4), 0.20);
    assert_eq!(curve.required_pg(2.16), 1.00);
}

#[test]
fn overall_risk_weights_each_factor() {
    let registry = ProfileRegistry::standard();
    let aggregator = RiskAggregator::default();

    let industry = RiskAggregator::industry_score(registry.industries(), "Construction");
    let risk = aggregator.overall(Segment::Established, DscrLevel::High, RiskTier::T2, industry);
    assert_close(risk, 1.16);
    assert_close(PgCurve::default().required_pg(risk), 0.328);

    let unknown = RiskAggregator::industry_score(registry.industries(), "Space Tourism");
    let worst = aggregator.overall(Segment::Startup, DscrLevel::Low, RiskTier::T3, unknown);
    assert_close(worst, 2.16);
}

#[test]
fn declined_outcomes_never_carry_pg() {
    let declined = DecisionOutcome::fail("declined").with_risk(1.8, 0.84);
    assert_eq!(declined.overall_risk(), Some(1.8));
    assert_eq!(declined.required_pg(), None);

    let flagged = DecisionOutcome::new(Decision::FlagUw, 0.7, "review").with_risk(1.8, 0.84);
    assert_eq!(flagged.required_pg(), Some(0.84));
}

#[test]
fn engine_reports_raw_risk_above_the_pg_ceiling() {
    let engine = DecisionEngine::default();
    let application = application(
        Segment::Startup,
        RiskTier::T3,
        1.30,
        30_000.0,
        SecurityType::Unsecured,
    );

    let outcome = engine.evaluate(&application).expect("evaluates");

    assert_eq!(outcome.decision(), Decision::ConditionalPass);
    assert_close(outcome.overall_risk().expect("risk attached"), 2.12);
    assert_eq!(outcome.required_pg(), Some(1.0));
}
