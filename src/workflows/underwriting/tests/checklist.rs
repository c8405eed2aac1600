use std::collections::BTreeSet;

use super::common::all_documents;
use crate::workflows::underwriting::checklist::{
    DocumentChecklist, FINANCIAL_STATEMENTS, PENDING_DOCUMENTS_CLAUSE,
};
use crate::workflows::underwriting::domain::Segment;
use crate::workflows::underwriting::outcome::{Decision, DecisionOutcome, SegmentVerdict};

#[test]
fn segment_financials_extend_common_documents() {
    let checklist = DocumentChecklist::default();

    let established = checklist.required(Segment::Established);
    let startup = checklist.required(Segment::Startup);

    assert_eq!(established.len(), 10);
    assert_eq!(
        startup.get(FINANCIAL_STATEMENTS).map(String::as_str),
        Some("3 years of projections.")
    );
    assert_ne!(
        established.get(FINANCIAL_STATEMENTS),
        startup.get(FINANCIAL_STATEMENTS)
    );
}

#[test]
fn pending_verdict_with_missing_documents_becomes_conditional() {
    let checklist = DocumentChecklist::default();
    let mut provided = BTreeSet::new();
    provided.insert("Proof of Identity".to_string());

    let verdict = SegmentVerdict::PendingPaperwork(DecisionOutcome::new(
        Decision::Pass,
        0.9,
        "EB/T1 with DSCR >150% qualifies for an unsecured loan.",
    ));

    let outcome = checklist.finalize_checklist(verdict, &provided, Segment::Established);

    assert_eq!(outcome.decision(), Decision::ConditionalPass);
    assert!(outcome.explanation().ends_with(PENDING_DOCUMENTS_CLAUSE));
    let missing = outcome.missing_documents().expect("missing documents listed");
    assert_eq!(missing.len(), 9);
    assert!(!missing.contains_key("Proof of Identity"));
}

#[test]
fn complete_paperwork_still_settles_as_conditional() {
    let checklist = DocumentChecklist::default();
    let verdict =
        SegmentVerdict::PendingPaperwork(DecisionOutcome::new(Decision::Pass, 0.9, "eligible"));

    let outcome = checklist.finalize_checklist(
        verdict,
        &all_documents(Segment::EarlyStage),
        Segment::EarlyStage,
    );

    assert_eq!(outcome.decision(), Decision::ConditionalPass);
    assert_eq!(outcome.missing_documents().map(|missing| missing.len()), Some(0));
    assert!(outcome.explanation().ends_with(PENDING_DOCUMENTS_CLAUSE));
}

#[test]
fn settled_verdicts_pass_through_untouched() {
    let checklist = DocumentChecklist::default();
    let flagged = DecisionOutcome::new(Decision::FlagAi, 0.7, "AI review required.");

    let outcome = checklist.finalize_checklist(
        SegmentVerdict::Settled(flagged.clone()),
        &BTreeSet::new(),
        Segment::Startup,
    );

    assert_eq!(outcome, flagged);
}
