use crate::commands::{render_outcome, request_id};
use crate::infra::{evaluation_config, parse_profile, OfflineNarrator};
use clap::Args;
use sme_underwriting::config::{AppConfig, NarrativeConfig};
use sme_underwriting::error::AppError;
use sme_underwriting::workflows::underwriting::narrative::{
    NarrativeLoop, PromptContext, PromptVerifier,
};
use sme_underwriting::workflows::underwriting::{
    BorrowerType, DecisionEngine, EvaluationProfile, LoanApplication, RiskTier, Segment,
    SecurityType, SupplementaryConditions,
};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the configured evaluation profile for the sample run
    #[arg(long, value_parser = parse_profile)]
    pub(crate) profile: Option<EvaluationProfile>,
    /// Print the audit trail for every sample application
    #[arg(long)]
    pub(crate) show_trail: bool,
    /// Skip the narrative generation portion of the demo
    #[arg(long)]
    pub(crate) skip_narrative: bool,
}

type OfflineLoop = NarrativeLoop<OfflineNarrator, PromptVerifier<OfflineNarrator>>;

pub(crate) fn offline_narrative_loop(
    narrative: &NarrativeConfig,
    request_id: &str,
) -> OfflineLoop {
    let narrator = Arc::new(OfflineNarrator);
    let verifier = Arc::new(PromptVerifier::for_request(narrator.clone(), request_id));
    NarrativeLoop::new(narrator, verifier, narrative.retry_policy())
}

pub(crate) async fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        profile,
        show_trail,
        skip_narrative,
    } = args;

    let engine = DecisionEngine::new(evaluation_config(config.underwriting, profile));

    println!(
        "SME underwriting demo ({} profile)",
        engine.config().profile.label()
    );

    let mut first = None;
    for (title, application) in sample_applications() {
        let request_id = request_id("demo");
        let (outcome, trail) = engine.evaluate_with_trail(&application, request_id.as_str())?;
        println!("\n{title}");
        render_outcome(&application, &outcome);
        if show_trail {
            println!("{}", trail.render());
        }
        if first.is_none() {
            first = Some((outcome, trail));
        }
    }

    if skip_narrative {
        return Ok(());
    }
    let Some((outcome, trail)) = first else {
        return Ok(());
    };

    println!("\nNarrative rationale (offline narrator)");
    let narrative_loop = offline_narrative_loop(&config.narrative, &trail.request_id);
    println!(
        "- up to {} attempt(s), {:?} per call",
        narrative_loop.policy().max_attempts,
        narrative_loop.policy().call_timeout
    );
    let record = narrative_loop
        .run(&outcome, &PromptContext::from_trail(&trail))
        .await;

    println!(
        "- state {:?} after {} attempt(s)",
        record.state, record.attempts
    );
    if let Some(verdict) = &record.verdict {
        println!("- verifier: {verdict}");
    }
    println!("{}", record.narrative);
    Ok(())
}

fn base_application(
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
        industry_sector: "Construction".to_string(),
        borrower_type: BorrowerType::Ltd,
        provided_documents: BTreeSet::new(),
        conditions: SupplementaryConditions::satisfied(),
    }
}

fn sample_applications() -> Vec<(&'static str, LoanApplication)> {
    let established = base_application(
        Segment::Established,
        RiskTier::T2,
        1.55,
        200_000.0,
        SecurityType::Secured,
    );

    let startup = base_application(
        Segment::Startup,
        RiskTier::T3,
        1.10,
        30_000.0,
        SecurityType::Unsecured,
    );

    let early_stage = base_application(
        Segment::EarlyStage,
        RiskTier::T3,
        1.30,
        35_000.0,
        SecurityType::Unsecured,
    );

    let mut missing_guarantee = base_application(
        Segment::NewlyTrading,
        RiskTier::T1,
        1.45,
        60_000.0,
        SecurityType::Unsecured,
    );
    missing_guarantee.conditions.provided_pg = 0.2;
    missing_guarantee.conditions.min_pg_required = 0.5;

    let mut partnership = base_application(
        Segment::Established,
        RiskTier::T1,
        1.80,
        120_000.0,
        SecurityType::Unsecured,
    );
    partnership.borrower_type = BorrowerType::from("Partnership");

    vec![
        ("Established business, secured, strong coverage", established),
        ("Startup below the DSCR floor", startup),
        ("Early-stage business in the lower band", early_stage),
        ("Newly trading business short on guarantee", missing_guarantee),
        ("Unsupported borrower type", partnership),
    ]
}
