use crate::infra::{evaluation_config, parse_profile, parse_security, parse_segment, parse_tier};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use sme_underwriting::config::AppConfig;
use sme_underwriting::error::AppError;
use sme_underwriting::workflows::underwriting::narrative::UnderwriterSchema;
use sme_underwriting::workflows::underwriting::{
    AuditEntry, BatchImporter, BorrowerType, Decision, DecisionEngine, DecisionOutcome, EvaluationProfile,
    LoanApplication, RiskTier, Segment, SecurityType, SupplementaryConditions,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Business segment code (EB, ESB, NTB, SU)
    #[arg(long, value_parser = parse_segment)]
    pub(crate) segment: Segment,
    /// Risk tier (T1, T2, T3)
    #[arg(long, value_parser = parse_tier)]
    pub(crate) tier: RiskTier,
    /// Debt service coverage ratio, e.g. 1.42
    #[arg(long)]
    pub(crate) dscr: f64,
    /// Requested loan amount in GBP
    #[arg(long)]
    pub(crate) amount: f64,
    #[arg(long, value_parser = parse_security, default_value = "unsecured")]
    pub(crate) security: SecurityType,
    #[arg(long)]
    pub(crate) industry: String,
    #[arg(long, default_value = "LTD")]
    pub(crate) borrower_type: String,
    /// Provided document name; repeat for each document
    #[arg(long = "document")]
    pub(crate) documents: Vec<String>,
    /// Personal guarantee offered, as a fraction of the loan
    #[arg(long, default_value_t = 1.0)]
    pub(crate) provided_pg: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_pg_required: f64,
    #[arg(long)]
    pub(crate) requires_debenture: bool,
    #[arg(long)]
    pub(crate) has_debenture: bool,
    /// Secured loan has no legal charge in place
    #[arg(long)]
    pub(crate) no_legal_charge: bool,
    #[arg(long)]
    pub(crate) due_diligence_pending: bool,
    #[arg(long)]
    pub(crate) unregistered: bool,
    /// Override the configured evaluation profile (full_review or happy_path)
    #[arg(long, value_parser = parse_profile)]
    pub(crate) profile: Option<EvaluationProfile>,
    /// Print the audit trail after the outcome
    #[arg(long)]
    pub(crate) trail: bool,
    /// Emit the outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    fn application(&self) -> LoanApplication {
        LoanApplication {
            segment: self.segment,
            risk_tier: self.tier,
            dscr: self.dscr,
            loan_amount: self.amount,
            security: self.security,
            industry_sector: self.industry.clone(),
            borrower_type: BorrowerType::from(self.borrower_type.as_str()),
            provided_documents: self.documents.iter().cloned().collect::<BTreeSet<_>>(),
            conditions: SupplementaryConditions {
                provided_pg: self.provided_pg,
                min_pg_required: self.min_pg_required,
                requires_debenture: self.requires_debenture,
                has_debenture: self.has_debenture,
                has_legal_charge: !self.no_legal_charge,
                due_diligence_complete: !self.due_diligence_pending,
                business_registered: !self.unregistered,
            },
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one application per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    #[arg(long, value_parser = parse_profile)]
    pub(crate) profile: Option<EvaluationProfile>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport<'a> {
    request_id: &'a str,
    outcome: &'a DecisionOutcome,
    audit_trail: &'a [AuditEntry],
}

pub(crate) fn run_evaluate(args: EvaluateArgs, config: &AppConfig) -> Result<(), AppError> {
    let engine = DecisionEngine::new(evaluation_config(config.underwriting, args.profile));
    let application = args.application();
    let request_id = request_id("cli");

    let (outcome, trail) = engine.evaluate_with_trail(&application, request_id.as_str())?;

    if args.json {
        let report = EvaluationReport {
            request_id: &request_id,
            outcome: &outcome,
            audit_trail: trail.entries(),
        };
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    render_outcome(&application, &outcome);
    if args.trail {
        println!("\n{}", trail.render());
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs, config: &AppConfig) -> Result<(), AppError> {
    let engine = DecisionEngine::new(evaluation_config(config.underwriting, args.profile));
    let applications = BatchImporter::from_path(&args.csv)?;

    println!(
        "Evaluating {} applications from {} ({} profile)",
        applications.len(),
        args.csv.display(),
        engine.config().profile.label()
    );

    let tally = evaluate_all(&engine, &applications)?;

    println!("\nDecision tally");
    for (decision, count) in &tally {
        println!("- {decision}: {count}");
    }
    Ok(())
}

pub(crate) fn run_schema() -> Result<(), AppError> {
    let schema = UnderwriterSchema::current();
    let rendered = serde_json::to_string_pretty(&schema).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn evaluate_all(
    engine: &DecisionEngine,
    applications: &[LoanApplication],
) -> Result<BTreeMap<Decision, usize>, AppError> {
    let mut tally = BTreeMap::new();
    for (index, application) in applications.iter().enumerate() {
        let outcome = engine.evaluate(application)?;
        println!(
            "Row {}: {} {} {} £{:.0} -> {}",
            index + 1,
            application.segment,
            application.risk_tier,
            application.security,
            application.loan_amount,
            outcome.summary()
        );
        *tally.entry(outcome.decision()).or_insert(0) += 1;
    }
    Ok(tally)
}

pub(crate) fn render_outcome(application: &LoanApplication, outcome: &DecisionOutcome) {
    println!(
        "{} ({}) | {} | {} £{:.0} | DSCR {:.2} | {}",
        application.segment.label(),
        application.segment,
        application.risk_tier,
        application.security,
        application.loan_amount,
        application.dscr,
        application.industry_sector
    );
    println!("  Decision: {} ({:.2} confidence)", outcome.decision(), outcome.confidence());
    println!("  Explanation: {}", outcome.explanation().trim());
    if let Some(risk) = outcome.overall_risk() {
        println!("  Overall risk: {risk:.2}");
    }
    if let Some(pg) = outcome.required_pg() {
        println!("  Required PG: {:.0}%", pg * 100.0);
    }
    if let Some(missing) = outcome.missing_documents() {
        println!("  Missing documents:");
        for (document, reason) in missing {
            println!("    - {document}: {reason}");
        }
    }
}

pub(crate) fn request_id(prefix: &str) -> String {
    format!("{prefix}-{}", Utc::now().format("%Y%m%dT%H%M%S%3f"))
}
