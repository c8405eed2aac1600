//! End-to-end decisioning scenarios driven through the public engine, batch importer and router.

mod common {
    use std::collections::BTreeSet;

    use sme_underwriting::workflows::underwriting::{
        BorrowerType, LoanApplication, RiskTier, Segment, SecurityType, SupplementaryConditions,
    };

    pub(super) fn application(
        segment: Segment,
        risk_tier: RiskTier,
        dscr: f64,
        loan_amount: f64,
        security: SecurityType,
    ) -> LoanApplication {
        LoanApplication {
            segment,
            risk_tier,
            dscr,
            loan_amount,
            security,
            industry_sector: "Information and Communication".to_string(),
            borrower_type: BorrowerType::Llp,
            provided_documents: BTreeSet::new(),
            conditions: SupplementaryConditions::satisfied(),
        }
    }

    pub(super) fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }
}

use std::io::Cursor;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use sme_underwriting::workflows::underwriting::{
    underwriting_router, BatchImporter, Decision, DecisionEngine, EvaluationConfig, RiskTier,
    Segment, SecurityType, MAX_CONFIDENCE, MIN_CONFIDENCE,
};

#[test]
fn reference_scenarios_produce_expected_decisions() {
    let engine = DecisionEngine::default();

    let pass = engine
        .evaluate(&application(
            Segment::Established,
            RiskTier::T2,
            1.55,
            200_000.0,
            SecurityType::Secured,
        ))
        .expect("evaluates");
    assert_eq!(pass.decision(), Decision::Pass);
    assert_eq!(pass.confidence(), 0.89);
    assert_close(pass.required_pg().expect("pg attached"), 0.328);

    let declined = engine
        .evaluate(&application(
            Segment::Startup,
            RiskTier::T3,
            1.10,
            30_000.0,
            SecurityType::Unsecured,
        ))
        .expect("evaluates");
    assert_eq!(declined.decision(), Decision::Fail);
    assert!(declined.explanation().contains("DSCR <125%"));

    let flagged = engine
        .evaluate(&application(
            Segment::EarlyStage,
            RiskTier::T3,
            1.30,
            35_000.0,
            SecurityType::Unsecured,
        ))
        .expect("evaluates");
    assert_eq!(flagged.decision(), Decision::FlagAi);
}

#[test]
fn confidence_stays_in_bounds_across_the_grid() {
    let engines = [
        DecisionEngine::default(),
        DecisionEngine::new(EvaluationConfig::happy_path()),
    ];
    let dscrs = [0.9, 1.25, 1.26, 1.30, 1.349, 1.35, 1.42, 1.4999, 1.50, 1.80, 3.0];
    let amounts = [20_000.0, 25_001.0, 30_000.0, 55_000.0, 90_000.0, 140_000.0, 260_000.0];

    for engine in &engines {
        for segment in Segment::ALL {
            for tier in RiskTier::ALL {
                for security in [SecurityType::Secured, SecurityType::Unsecured] {
                    for dscr in dscrs {
                        for amount in amounts {
                            let outcome = engine
                                .evaluate(&application(segment, tier, dscr, amount, security))
                                .expect("evaluates");
                            assert!(outcome.confidence() >= MIN_CONFIDENCE);
                            assert!(outcome.confidence() <= MAX_CONFIDENCE);
                            if outcome.decision() == Decision::Fail {
                                assert!(outcome.required_pg().is_none());
                                assert!(outcome.missing_documents().is_none());
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn batch_import_feeds_the_engine() {
    let csv = "segment,risk_tier,dscr,loan_amount,security,industry_sector,borrower_type,provided_documents,provided_pg,min_pg_required,requires_debenture,has_debenture,has_legal_charge,due_diligence_complete,business_registered\n\
               EB,T2,1.55,200000,secured,Construction,LTD,,1.0,0.2,false,false,true,true,true\n\
               SU,T3,1.10,30000,unsecured,Construction,LTD,,1.0,0.2,false,false,false,true,true\n\
               ESB,T1,1.60,60000,unsecured,Places of Worship,LTD,,1.0,0.2,false,false,false,true,true\n";

    let applications = BatchImporter::from_reader(Cursor::new(csv)).expect("batch parses");
    let engine = DecisionEngine::default();
    let decisions: Vec<Decision> = applications
        .iter()
        .map(|application| engine.evaluate(application).expect("evaluates").decision())
        .collect();

    assert_eq!(decisions, vec![Decision::Pass, Decision::Fail, Decision::Fail]);
}

#[tokio::test]
async fn router_serializes_conditional_pass_with_documents() {
    let router = underwriting_router(Arc::new(DecisionEngine::new(EvaluationConfig::happy_path())));
    let body = json!({
        "segment": "ESB",
        "risk_tier": "T1",
        "dscr": 1.62,
        "loan_amount": 60000.0,
        "security": "unsecured",
        "industry_sector": "Manufacturing",
        "borrower_type": "Sole Trader",
        "provided_documents": ["Proof of Identity", "Bank Statements"],
        "conditions": {
            "provided_pg": 0.5,
            "min_pg_required": 0.2,
            "requires_debenture": false,
            "has_debenture": false,
            "has_legal_charge": false,
            "due_diligence_complete": true,
            "business_registered": true
        }
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/underwriting/evaluate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).expect("serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(payload.get("decision"), Some(&json!("CONDITIONAL_PASS")));
    let missing = payload
        .get("missing_documents")
        .and_then(Value::as_object)
        .expect("missing documents listed");
    assert_eq!(missing.len(), 8);
    assert!(missing.contains_key("Financial Statements"));
}
