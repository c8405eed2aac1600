use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::super::outcome::DecisionOutcome;
use super::collaborator::{CollaboratorError, NarrativeVerifier, TextGenerator};
use super::prompt::{verification_prompt, PromptContext};

/// Uses a [`TextGenerator`] as a consistency reviewer.
pub struct PromptVerifier<G: ?Sized> {
    generator: Arc<G>,
    request_id: String,
}

impl<G: TextGenerator + ?Sized> PromptVerifier<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            request_id: "N/A".to_string(),
        }
    }

    pub fn for_request(generator: Arc<G>, request_id: impl Into<String>) -> Self {
        Self {
            generator,
            request_id: request_id.into(),
        }
    }
}

#[async_trait]
impl<G: TextGenerator + ?Sized> NarrativeVerifier for PromptVerifier<G> {
    async fn verify(
        &self,
        narrative: &str,
        outcome: &DecisionOutcome,
    ) -> Result<String, CollaboratorError> {
        let context = PromptContext::new(self.request_id.clone());
        let prompt = verification_prompt(narrative, outcome, &context);
        debug!(request_id = %self.request_id, "verification prompt built");
        self.generator.generate(&prompt).await
    }
}
