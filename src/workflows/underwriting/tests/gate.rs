use super::common::*;
use crate::workflows::underwriting::domain::{BorrowerType, RiskTier, Segment};
use crate::workflows::underwriting::evaluation::EvaluationProfile;
use crate::workflows::underwriting::gate::EligibilityGate;
use crate::workflows::underwriting::outcome::Decision;

fn full_review_gate() -> EligibilityGate {
    EligibilityGate::new(EvaluationProfile::FullReview, registry())
}

fn happy_path_gate() -> EligibilityGate {
    EligibilityGate::new(EvaluationProfile::HappyPath, registry())
}

#[test]
fn declines_dscr_below_floor() {
    let outcome = full_review_gate()
        .check_global(1.10, 30_000.0, RiskTier::T3, Segment::Startup, ACCEPTED_INDUSTRY)
        .expect("gate stops application");

    assert_eq!(outcome.decision(), Decision::Fail);
    assert_eq!(outcome.explanation(), "DSCR <125%. Loan declined.");
    assert_eq!(outcome.confidence(), 0.99);
}

#[test]
fn dscr_check_takes_precedence_over_amount() {
    let outcome = full_review_gate()
        .check_global(1.0, 10_000.0, RiskTier::T1, Segment::Established, "Unknown")
        .expect("gate stops application");

    assert_eq!(outcome.explanation(), "DSCR <125%. Loan declined.");
}

#[test]
fn non_finite_dscr_is_declined() {
    let outcome = full_review_gate()
        .check_global(f64::NAN, 50_000.0, RiskTier::T1, Segment::Established, ACCEPTED_INDUSTRY)
        .expect("NaN never passes");

    assert_eq!(outcome.decision(), Decision::Fail);
}

#[test]
fn minimum_amount_is_exclusive_of_25000() {
    let gate = full_review_gate();

    let below = gate
        .check_global(1.60, 25_000.0, RiskTier::T1, Segment::Established, ACCEPTED_INDUSTRY)
        .expect("25,000 is below the threshold");
    assert_eq!(
        below.explanation(),
        "Loan amount below £25,001. Does not meet minimum threshold."
    );

    assert!(gate
        .check_global(1.60, 25_001.0, RiskTier::T1, Segment::Established, ACCEPTED_INDUSTRY)
        .is_none());
}

#[test]
fn happy_path_excludes_t3_and_startups() {
    let gate = happy_path_gate();

    let tier = gate
        .check_global(1.60, 50_000.0, RiskTier::T3, Segment::Established, ACCEPTED_INDUSTRY)
        .expect("T3 excluded");
    assert_eq!(tier.decision(), Decision::Fail);
    assert!(tier.explanation().contains("T3"));

    let startup = gate
        .check_global(1.60, 30_000.0, RiskTier::T1, Segment::Startup, ACCEPTED_INDUSTRY)
        .expect("startups excluded");
    assert_eq!(
        startup.explanation(),
        "Startups are not considered for the Happy Path."
    );
}

#[test]
fn full_review_lets_t3_startups_through_to_tables() {
    assert!(full_review_gate()
        .check_global(1.60, 30_000.0, RiskTier::T3, Segment::Startup, ACCEPTED_INDUSTRY)
        .is_none());
}

#[test]
fn industry_standing_controls_outcome() {
    let gate = full_review_gate();

    let disallowed = gate
        .check_global(1.60, 50_000.0, RiskTier::T1, Segment::Established, "Places of Gambling")
        .expect("disallowed sector stopped");
    assert_eq!(disallowed.decision(), Decision::Fail);
    assert_eq!(
        disallowed.explanation(),
        "Industry sector 'Places of Gambling' is not accepted."
    );

    let unknown = gate
        .check_global(1.60, 50_000.0, RiskTier::T1, Segment::Established, "Space Tourism")
        .expect("unknown sector flagged");
    assert_eq!(unknown.decision(), Decision::FlagUw);
    assert_eq!(unknown.confidence(), 0.99);
}

#[test]
fn borrower_screen_accepts_known_forms_only() {
    let gate = full_review_gate();

    assert!(gate.check_borrower(&BorrowerType::from("sole_trader")).is_none());
    assert!(gate.check_borrower(&BorrowerType::from("llp")).is_none());

    let rejected = gate
        .check_borrower(&BorrowerType::from("Partnership"))
        .expect("partnerships rejected");
    assert_eq!(rejected.decision(), Decision::Fail);
    assert_eq!(
        rejected.explanation(),
        "Borrower type Partnership is not allowed."
    );
}
