use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::underwriting::checklist::DocumentChecklist;
use crate::workflows::underwriting::confidence::ConfidenceAdjuster;
use crate::workflows::underwriting::domain::{
    BorrowerType, LoanApplication, RiskTier, Segment, SecurityType, SupplementaryConditions,
};
use crate::workflows::underwriting::evaluation::{EvaluationConfig, SegmentEvaluator};
use crate::workflows::underwriting::narrative::{
    CollaboratorError, NarrativeVerifier, TextGenerator,
};
use crate::workflows::underwriting::outcome::DecisionOutcome;
use crate::workflows::underwriting::profiles::ProfileRegistry;

pub(super) const ACCEPTED_INDUSTRY: &str = "Construction";

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
        industry_sector: ACCEPTED_INDUSTRY.to_string(),
        borrower_type: BorrowerType::Ltd,
        provided_documents: BTreeSet::new(),
        conditions: SupplementaryConditions::satisfied(),
    }
}

pub(super) fn all_documents(segment: Segment) -> BTreeSet<String> {
    DocumentChecklist::default()
        .required(segment)
        .into_keys()
        .collect()
}

pub(super) fn registry() -> Arc<ProfileRegistry> {
    Arc::new(ProfileRegistry::standard())
}

pub(super) fn evaluator(segment: Segment, config: EvaluationConfig) -> SegmentEvaluator {
    SegmentEvaluator::new(
        segment,
        registry(),
        Arc::new(ConfidenceAdjuster::default()),
        config,
    )
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("valid json body")
}

/// Generator replaying a fixed script of replies; the last reply repeats once exhausted.
pub(super) struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, CollaboratorError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub(super) fn new(replies: Vec<Result<String, CollaboratorError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn numbered(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|index| Ok(format!("narrative #{index}")))
                .collect(),
        )
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        let mut replies = self.replies.lock().expect("script poisoned");
        match replies.len() {
            0 => Err(CollaboratorError::Rejected("script exhausted".to_string())),
            1 => replies
                .front()
                .cloned()
                .unwrap_or_else(|| Err(CollaboratorError::Rejected("empty".to_string()))),
            _ => replies
                .pop_front()
                .unwrap_or_else(|| Err(CollaboratorError::Rejected("empty".to_string()))),
        }
    }
}

/// Verifier replaying scripted verdicts and recording what it reviewed.
pub(super) struct ScriptedVerifier {
    verdicts: Mutex<VecDeque<Result<String, CollaboratorError>>>,
    reviewed: Mutex<Vec<String>>,
}

impl ScriptedVerifier {
    pub(super) fn new(verdicts: Vec<Result<String, CollaboratorError>>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into()),
            reviewed: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn reviewed(&self) -> Vec<String> {
        self.reviewed.lock().expect("review log poisoned").clone()
    }
}

#[async_trait]
impl NarrativeVerifier for ScriptedVerifier {
    async fn verify(
        &self,
        narrative: &str,
        _outcome: &DecisionOutcome,
    ) -> Result<String, CollaboratorError> {
        self.reviewed
            .lock()
            .expect("review log poisoned")
            .push(narrative.to_string());
        self.verdicts
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok("Discrepancy: script exhausted".to_string()))
    }
}

/// Generator that never answers inside any reasonable timeout.
pub(super) struct StalledGenerator;

#[async_trait]
impl TextGenerator for StalledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, CollaboratorError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}
