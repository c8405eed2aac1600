use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use sme_underwriting::workflows::underwriting::narrative::{CollaboratorError, TextGenerator};
use sme_underwriting::workflows::underwriting::{
    EvaluationConfig, EvaluationProfile, RiskTier, Segment, SecurityType,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Deterministic stand-in for a language model so demos run without network access.
///
/// Narrative prompts are answered with a digest of the evaluation block; verification
/// prompts are always accepted.
#[derive(Debug, Default, Clone)]
pub(crate) struct OfflineNarrator;

const VERIFICATION_HEADING: &str = "Narrative Explanation:";

#[async_trait]
impl TextGenerator for OfflineNarrator {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError> {
        if prompt.contains(VERIFICATION_HEADING) {
            return Ok("No contradictions found.".to_string());
        }

        let details: Vec<&str> = prompt
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix("- "))
            .collect();
        if details.is_empty() {
            return Err(CollaboratorError::Rejected(
                "prompt carries no evaluation details".to_string(),
            ));
        }

        let mut narrative = String::from("Decisioning Summary\n");
        for detail in details {
            narrative.push_str("  ");
            narrative.push_str(detail);
            narrative.push('\n');
        }
        Ok(narrative)
    }
}

pub(crate) fn evaluation_config(
    base: EvaluationConfig,
    profile: Option<EvaluationProfile>,
) -> EvaluationConfig {
    match profile {
        Some(profile) => EvaluationConfig { profile, ..base },
        None => base,
    }
}

pub(crate) fn parse_segment(raw: &str) -> Result<Segment, String> {
    Segment::from_code(raw).ok_or_else(|| format!("unknown segment '{raw}' (expected EB, ESB, NTB or SU)"))
}

pub(crate) fn parse_tier(raw: &str) -> Result<RiskTier, String> {
    RiskTier::from_code(raw).ok_or_else(|| format!("unknown risk tier '{raw}' (expected T1, T2 or T3)"))
}

pub(crate) fn parse_security(raw: &str) -> Result<SecurityType, String> {
    SecurityType::from_label(raw)
        .ok_or_else(|| format!("unknown security type '{raw}' (expected secured or unsecured)"))
}

pub(crate) fn parse_profile(raw: &str) -> Result<EvaluationProfile, String> {
    EvaluationProfile::from_str(raw)
        .ok_or_else(|| format!("unknown profile '{raw}' (expected full_review or happy_path)"))
}
