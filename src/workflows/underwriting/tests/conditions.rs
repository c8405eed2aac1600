use super::common::*;
use crate::workflows::underwriting::conditions::ConditionalResolver;
use crate::workflows::underwriting::domain::{RiskTier, Segment, SecurityType};
use crate::workflows::underwriting::outcome::Decision;

#[test]
fn satisfied_conditions_do_not_short_circuit() {
    let application = application(
        Segment::EarlyStage,
        RiskTier::T2,
        1.40,
        50_000.0,
        SecurityType::Secured,
    );

    assert!(ConditionalResolver.resolve(&application).is_none());
}

#[test]
fn personal_guarantee_shortfall_applies_outside_established() {
    let mut application = application(
        Segment::EarlyStage,
        RiskTier::T2,
        1.40,
        50_000.0,
        SecurityType::Unsecured,
    );
    application.conditions.provided_pg = 0.10;
    application.conditions.min_pg_required = 0.40;

    let outcome = ConditionalResolver
        .resolve(&application)
        .expect("pg shortfall triggers");
    assert_eq!(outcome.decision(), Decision::ConditionalPass);
    assert_eq!(outcome.confidence(), 0.99);
    assert_eq!(
        outcome.explanation(),
        "Loan approved on condition that a minimum 40% Personal Guarantee (PG) is signed before funding."
    );

    application.segment = Segment::Established;
    assert!(ConditionalResolver.resolve(&application).is_none());
}

#[test]
fn debenture_is_waived_for_startups() {
    let mut application = application(
        Segment::Startup,
        RiskTier::T2,
        1.40,
        30_000.0,
        SecurityType::Unsecured,
    );
    application.conditions.requires_debenture = true;
    application.conditions.has_debenture = false;

    assert!(ConditionalResolver.resolve(&application).is_none());

    application.segment = Segment::NewlyTrading;
    let outcome = ConditionalResolver
        .resolve(&application)
        .expect("debenture required");
    assert!(outcome.explanation().contains("Debenture"));
}

#[test]
fn legal_charge_only_matters_for_secured_loans() {
    let mut application = application(
        Segment::Established,
        RiskTier::T1,
        1.60,
        100_000.0,
        SecurityType::Unsecured,
    );
    application.conditions.has_legal_charge = false;
    assert!(ConditionalResolver.resolve(&application).is_none());

    application.security = SecurityType::Secured;
    let outcome = ConditionalResolver
        .resolve(&application)
        .expect("legal charge required");
    assert!(outcome.explanation().contains("Legal Charge"));
}

#[test]
fn first_unmet_condition_wins() {
    let mut application = application(
        Segment::NewlyTrading,
        RiskTier::T1,
        1.40,
        40_000.0,
        SecurityType::Unsecured,
    );
    application.conditions.due_diligence_complete = false;
    application.conditions.business_registered = false;

    let outcome = ConditionalResolver
        .resolve(&application)
        .expect("condition triggered");
    assert!(outcome.explanation().contains("AML/KYC"));

    application.conditions.due_diligence_complete = true;
    let outcome = ConditionalResolver
        .resolve(&application)
        .expect("condition triggered");
    assert!(outcome.explanation().contains("business registration"));
}
