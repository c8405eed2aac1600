//! Narrative rationale for a decision: prompt construction and the generate/verify/retry loop
//! around injected text collaborators.

mod collaborator;
mod generation;
mod prompt;
mod retry;
mod schema;
mod verifier;

pub use collaborator::{CollaboratorError, NarrativeVerifier, TextGenerator, ACCEPTANCE_MARKER};
pub use generation::{NarrativeLoop, NarrativeRecord, NarrativeState};
pub use prompt::{
    additional_context_section, business_logic_section, evaluation_details_section,
    narrative_prompt, objective_section, verification_prompt, PromptContext,
};
pub use retry::{RetryPolicy, DEFAULT_CALL_TIMEOUT, DEFAULT_MAX_ATTEMPTS};
pub use schema::{
    AuditAndVersioning, UnderwriterInstructions, UnderwriterSchema, FALLBACK_POLICY,
    SCHEMA_VERSION, UNDERWRITER_ROLE,
};
pub use verifier::PromptVerifier;
