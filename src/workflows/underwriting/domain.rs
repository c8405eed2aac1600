use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Business-maturity classification driving loan bounds and evidence requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "EB", alias = "Established")]
    Established,
    #[serde(rename = "ESB", alias = "EarlyStage")]
    EarlyStage,
    #[serde(rename = "NTB", alias = "NewlyTrading")]
    NewlyTrading,
    #[serde(rename = "SU", alias = "Startup")]
    Startup,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::Established,
        Segment::EarlyStage,
        Segment::NewlyTrading,
        Segment::Startup,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Segment::Established => "EB",
            Segment::EarlyStage => "ESB",
            Segment::NewlyTrading => "NTB",
            Segment::Startup => "SU",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Segment::Established => "Established Business",
            Segment::EarlyStage => "Early-Stage Business",
            Segment::NewlyTrading => "Newly Trading Business",
            Segment::Startup => "Startup",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EB" | "ESTABLISHED" => Some(Segment::Established),
            "ESB" | "EARLYSTAGE" | "EARLY-STAGE" => Some(Segment::EarlyStage),
            "NTB" | "NEWLYTRADING" | "NEWLY-TRADING" => Some(Segment::NewlyTrading),
            "SU" | "STARTUP" => Some(Segment::Startup),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Credit-risk banding from lowest (T1) to highest (T3) risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    T1,
    T2,
    T3,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::T1, RiskTier::T2, RiskTier::T3];

    pub fn code(&self) -> &'static str {
        match self {
            RiskTier::T1 => "T1",
            RiskTier::T2 => "T2",
            RiskTier::T3 => "T3",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "T1" => Some(RiskTier::T1),
            "T2" => Some(RiskTier::T2),
            "T3" => Some(RiskTier::T3),
            _ => None,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    Secured,
    Unsecured,
}

impl SecurityType {
    pub fn label(&self) -> &'static str {
        match self {
            SecurityType::Secured => "secured",
            SecurityType::Unsecured => "unsecured",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "secured" => Some(SecurityType::Secured),
            "unsecured" => Some(SecurityType::Unsecured),
            _ => None,
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Legal form of the borrowing entity. Unrecognized forms are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BorrowerType {
    Ltd,
    SoleTrader,
    Llp,
    Other(String),
}

impl BorrowerType {
    pub fn label(&self) -> &str {
        match self {
            BorrowerType::Ltd => "LTD",
            BorrowerType::SoleTrader => "Sole Trader",
            BorrowerType::Llp => "LLP",
            BorrowerType::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, BorrowerType::Other(_))
    }
}

impl From<String> for BorrowerType {
    fn from(value: String) -> Self {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "LTD" => BorrowerType::Ltd,
            "SOLETRADER" => BorrowerType::SoleTrader,
            "LLP" => BorrowerType::Llp,
            _ => BorrowerType::Other(value.trim().to_string()),
        }
    }
}

impl From<&str> for BorrowerType {
    fn from(value: &str) -> Self {
        BorrowerType::from(value.to_string())
    }
}

impl From<BorrowerType> for String {
    fn from(value: BorrowerType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for BorrowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse DSCR classification shared by the confidence and risk calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DscrLevel {
    Low,
    Medium,
    High,
}

impl DscrLevel {
    pub fn from_dscr(dscr: f64) -> Self {
        if dscr >= 1.50 {
            DscrLevel::High
        } else if dscr >= 1.35 {
            DscrLevel::Medium
        } else {
            DscrLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DscrLevel::Low => "low",
            DscrLevel::Medium => "medium",
            DscrLevel::High => "high",
        }
    }
}

/// Supplementary guarantees, charges and checks consulted by the conditional resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplementaryConditions {
    pub provided_pg: f64,
    pub min_pg_required: f64,
    pub requires_debenture: bool,
    pub has_debenture: bool,
    pub has_legal_charge: bool,
    pub due_diligence_complete: bool,
    pub business_registered: bool,
}

impl SupplementaryConditions {
    /// Every condition met; handy when the intake layer has already cleared them.
    pub fn satisfied() -> Self {
        Self {
            provided_pg: 1.0,
            min_pg_required: 0.0,
            requires_debenture: false,
            has_debenture: false,
            has_legal_charge: true,
            due_diligence_complete: true,
            business_registered: true,
        }
    }
}

/// Loan application as consumed from the intake layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub segment: Segment,
    pub risk_tier: RiskTier,
    pub dscr: f64,
    pub loan_amount: f64,
    pub security: SecurityType,
    pub industry_sector: String,
    pub borrower_type: BorrowerType,
    #[serde(default)]
    pub provided_documents: BTreeSet<String>,
    pub conditions: SupplementaryConditions,
}

impl LoanApplication {
    pub fn dscr_level(&self) -> DscrLevel {
        DscrLevel::from_dscr(self.dscr)
    }
}
