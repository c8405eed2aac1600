use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_CONFIDENCE: f64 = 0.50;
pub const MAX_CONFIDENCE: f64 = 1.00;

/// Closed set of decision tags.
///
/// Variants are declared from least to most favourable so the derived ordering matches
/// `FAIL < FLAG_UW < FLAG_AI < CONDITIONAL_PASS < PASS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "FLAG_UW", alias = "FLAG/UW")]
    FlagUw,
    #[serde(rename = "FLAG_AI", alias = "FLAG/AI")]
    FlagAi,
    #[serde(rename = "CONDITIONAL_PASS")]
    ConditionalPass,
    #[serde(rename = "PASS")]
    Pass,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Pass => "PASS",
            Decision::Fail => "FAIL",
            Decision::ConditionalPass => "CONDITIONAL_PASS",
            Decision::FlagAi => "FLAG_AI",
            Decision::FlagUw => "FLAG_UW",
        }
    }

    pub fn definition(&self) -> &'static str {
        match self {
            Decision::Pass => "The application is approved without any conditions.",
            Decision::Fail => "The application is declined.",
            Decision::ConditionalPass => {
                "The application is approved on condition that certain requirements are met."
            }
            Decision::FlagAi => "The application requires an AI review.",
            Decision::FlagUw => "The application requires an underwriter review.",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final, immutable result of one evaluation.
///
/// Every transformation consumes the outcome and returns a new one so the causal chain stays
/// visible. Confidence is clamped on construction, and a `FAIL` never carries a PG requirement
/// or a missing-documents map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutcome {
    decision: Decision,
    confidence: f64,
    explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    overall_risk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_pg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_documents: Option<BTreeMap<String, String>>,
}

impl DecisionOutcome {
    pub fn new(decision: Decision, confidence: f64, explanation: impl Into<String>) -> Self {
        Self {
            decision,
            confidence: clamp_confidence(confidence),
            explanation: explanation.into(),
            overall_risk: None,
            required_pg: None,
            missing_documents: None,
        }
    }

    pub fn fail(explanation: impl Into<String>) -> Self {
        Self::new(Decision::Fail, 0.99, explanation)
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn overall_risk(&self) -> Option<f64> {
        self.overall_risk
    }

    pub fn required_pg(&self) -> Option<f64> {
        self.required_pg
    }

    pub fn missing_documents(&self) -> Option<&BTreeMap<String, String>> {
        self.missing_documents.as_ref()
    }

    /// Attach the aggregated risk score and, unless declined, the PG requirement.
    pub fn with_risk(self, overall_risk: f64, required_pg: f64) -> Self {
        let required_pg = (self.decision != Decision::Fail).then_some(required_pg);
        Self {
            overall_risk: Some(overall_risk),
            required_pg,
            ..self
        }
    }

    pub fn with_confidence(self, confidence: f64) -> Self {
        Self {
            confidence: clamp_confidence(confidence),
            ..self
        }
    }

    /// Convert into a conditional approval listing the outstanding documents.
    pub fn pending_documents(self, missing: BTreeMap<String, String>, clause: &str) -> Self {
        let mut explanation = self.explanation;
        explanation.push_str(clause);
        Self {
            decision: Decision::ConditionalPass,
            explanation,
            missing_documents: Some(missing),
            ..self
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({:.2} confidence): {}",
            self.decision, self.confidence, self.explanation
        )
    }
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_CONFIDENCE;
    }
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Raw result of a segment evaluator before the document checklist runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentVerdict {
    /// Terminal outcome; the checklist leaves it untouched.
    Settled(DecisionOutcome),
    /// Eligible, pending confirmation that the paperwork is complete.
    PendingPaperwork(DecisionOutcome),
}

impl SegmentVerdict {
    pub fn outcome(&self) -> &DecisionOutcome {
        match self {
            SegmentVerdict::Settled(outcome) | SegmentVerdict::PendingPaperwork(outcome) => {
                outcome
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SegmentVerdict::PendingPaperwork(_))
    }

    pub fn describe(&self) -> String {
        match self {
            SegmentVerdict::Settled(outcome) => outcome.summary(),
            SegmentVerdict::PendingPaperwork(outcome) => {
                format!("{} [pending paperwork]", outcome.summary())
            }
        }
    }
}
