use std::time::Duration;

use async_trait::async_trait;

use super::super::outcome::DecisionOutcome;

/// Verifier replies containing this phrase accept the narrative.
pub const ACCEPTANCE_MARKER: &str = "No contradictions found";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Produces free text from a prompt, typically backed by a language model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

/// Reviews a narrative against the decision it explains.
#[async_trait]
pub trait NarrativeVerifier: Send + Sync {
    async fn verify(
        &self,
        narrative: &str,
        outcome: &DecisionOutcome,
    ) -> Result<String, CollaboratorError>;
}
