use serde::{Deserialize, Serialize};

/// Which gate and checklist behaviour the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationProfile {
    /// Strict intake: T3 and startups are declined at the gate and table PASS rows wait on
    /// the document checklist.
    HappyPath,
    #[default]
    FullReview,
}

impl EvaluationProfile {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "happy_path" | "happy" => Some(Self::HappyPath),
            "full_review" | "full" => Some(Self::FullReview),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HappyPath => "happy_path",
            Self::FullReview => "full_review",
        }
    }
}

/// Outcome produced when no decision row matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackDialect {
    #[default]
    ConditionalPass,
    Fail,
}

impl FallbackDialect {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "conditional_pass" | "conditional" => Some(Self::ConditionalPass),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ConditionalPass => "conditional_pass",
            Self::Fail => "fail",
        }
    }
}

/// Engine-wide evaluation switches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub profile: EvaluationProfile,
    pub fallback: FallbackDialect,
    pub screen_borrower_type: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            profile: EvaluationProfile::FullReview,
            fallback: FallbackDialect::ConditionalPass,
            screen_borrower_type: true,
        }
    }
}

impl EvaluationConfig {
    pub fn happy_path() -> Self {
        Self {
            profile: EvaluationProfile::HappyPath,
            ..Self::default()
        }
    }
}
