use super::common::assert_close;
use crate::workflows::underwriting::confidence::ConfidenceAdjuster;
use crate::workflows::underwriting::domain::{DscrLevel, RiskTier};
use crate::workflows::underwriting::outcome::{Decision, DecisionOutcome};
use crate::workflows::underwriting::profiles::LoanBounds;

#[test]
fn reduction_scales_with_position_in_bounds() {
    let adjuster = ConfidenceAdjuster::default();
    let bounds = LoanBounds::new(25_000.0, 75_000.0);

    let at_min = adjuster.adjust(0.85, 25_000.0, bounds, RiskTier::T2, DscrLevel::Medium, None);
    let at_max = adjuster.adjust(0.85, 75_000.0, bounds, RiskTier::T2, DscrLevel::Medium, None);

    assert_close(at_min, 0.85);
    assert_close(at_max, 0.75);
}

#[test]
fn equal_bounds_avoid_division_by_zero() {
    let adjuster = ConfidenceAdjuster::default();
    let bounds = LoanBounds::new(40_000.0, 40_000.0);

    let confidence =
        adjuster.adjust(0.70, 40_000.0, bounds, RiskTier::T2, DscrLevel::Medium, None);

    assert_close(confidence, 0.70);
}

#[test]
fn tier_and_dscr_deltas_stack_within_bounds() {
    let adjuster = ConfidenceAdjuster::default();
    let bounds = LoanBounds::new(25_000.0, 150_000.0);

    let strong = adjuster.adjust(0.75, 25_000.0, bounds, RiskTier::T1, DscrLevel::High, None);
    assert_close(strong, 0.95);

    let weak = adjuster.adjust(0.55, 150_000.0, bounds, RiskTier::T3, DscrLevel::Low, None);
    assert_close(weak, 0.50);

    let capped = adjuster.adjust(0.95, 25_000.0, bounds, RiskTier::T1, DscrLevel::High, None);
    assert_close(capped, 1.0);
}

#[test]
fn unknown_industries_carry_no_delta() {
    let adjuster = ConfidenceAdjuster::default();
    let bounds = LoanBounds::new(25_000.0, 75_000.0);

    let with_industry = adjuster.adjust(
        0.85,
        50_000.0,
        bounds,
        RiskTier::T2,
        DscrLevel::Medium,
        Some("Manufacturing"),
    );
    let without = adjuster.adjust(0.85, 50_000.0, bounds, RiskTier::T2, DscrLevel::Medium, None);

    assert_close(with_industry, without);
}

#[test]
fn outcome_confidence_is_always_clamped() {
    assert_eq!(DecisionOutcome::new(Decision::Pass, 1.7, "high").confidence(), 1.0);
    assert_eq!(DecisionOutcome::new(Decision::Pass, 0.1, "low").confidence(), 0.5);
    assert_eq!(
        DecisionOutcome::new(Decision::FlagAi, f64::NAN, "nan").confidence(),
        0.5
    );
    assert_eq!(
        DecisionOutcome::new(Decision::FlagAi, 0.7, "ok")
            .with_confidence(-3.0)
            .confidence(),
        0.5
    );
}

#[test]
fn dscr_levels_follow_thresholds() {
    assert_eq!(DscrLevel::from_dscr(1.50), DscrLevel::High);
    assert_eq!(DscrLevel::from_dscr(1.4999), DscrLevel::Medium);
    assert_eq!(DscrLevel::from_dscr(1.35), DscrLevel::Medium);
    assert_eq!(DscrLevel::from_dscr(1.349), DscrLevel::Low);
}
