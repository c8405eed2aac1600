use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::super::outcome::DecisionOutcome;
use super::collaborator::{NarrativeVerifier, TextGenerator, ACCEPTANCE_MARKER};
use super::prompt::{narrative_prompt, PromptContext};
use super::retry::RetryPolicy;
use super::schema::UnderwriterSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeState {
    Generating,
    Verifying,
    Accepted,
    Exhausted,
}

/// Result of one narrative run. `verdict` holds the last verifier reply or failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRecord {
    pub prompt: String,
    pub narrative: String,
    pub verdict: Option<String>,
    pub attempts: u32,
    pub state: NarrativeState,
}

impl NarrativeRecord {
    pub fn is_accepted(&self) -> bool {
        self.state == NarrativeState::Accepted
    }
}

/// Generate, verify, retry. Collaborator failures are absorbed; the loop always yields a record.
pub struct NarrativeLoop<G: ?Sized, V: ?Sized> {
    generator: Arc<G>,
    verifier: Arc<V>,
    policy: RetryPolicy,
}

impl<G, V> NarrativeLoop<G, V>
where
    G: TextGenerator + ?Sized,
    V: NarrativeVerifier + ?Sized,
{
    pub fn new(generator: Arc<G>, verifier: Arc<V>, policy: RetryPolicy) -> Self {
        Self {
            generator,
            verifier,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn run(&self, outcome: &DecisionOutcome, context: &PromptContext) -> NarrativeRecord {
        let schema = UnderwriterSchema::stamped(context.timestamp);
        let prompt = narrative_prompt(&schema, outcome, context);
        debug!(request_id = %context.request_id, prompt = %prompt, "narrative prompt built");

        let max_attempts = self.policy.attempts();
        let mut narrative = String::new();
        let mut verdict = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                self.policy.pause().await;
            }

            debug!(attempt, state = ?NarrativeState::Generating, "requesting narrative");
            match self
                .policy
                .call("generate", self.generator.generate(&prompt))
                .await
            {
                Ok(text) => narrative = text,
                Err(err) => {
                    warn!(attempt, error = %err, "narrative generation failed");
                    verdict = Some(err.to_string());
                    continue;
                }
            }

            debug!(attempt, state = ?NarrativeState::Verifying, "verifying narrative");
            match self
                .policy
                .call("verify", self.verifier.verify(&narrative, outcome))
                .await
            {
                Ok(reply) if reply.contains(ACCEPTANCE_MARKER) => {
                    info!(attempt, request_id = %context.request_id, "narrative accepted");
                    return NarrativeRecord {
                        prompt,
                        narrative,
                        verdict: Some(reply),
                        attempts: attempt,
                        state: NarrativeState::Accepted,
                    };
                }
                Ok(reply) => {
                    info!(attempt, discrepancies = %reply, "narrative discrepancies found");
                    verdict = Some(reply);
                }
                Err(err) => {
                    warn!(attempt, error = %err, "narrative verification failed");
                    verdict = Some(err.to_string());
                }
            }
        }

        warn!(
            attempts = max_attempts,
            request_id = %context.request_id,
            "narrative retries exhausted, returning last narrative"
        );
        NarrativeRecord {
            prompt,
            narrative,
            verdict,
            attempts: max_attempts,
            state: NarrativeState::Exhausted,
        }
    }
}
