use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::{RiskTier, Segment, SecurityType};

/// Inclusive loan-amount bounds for one security variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanBounds {
    pub min: f64,
    pub max: f64,
}

impl LoanBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Per-segment lending envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentProfile {
    pub segment: Segment,
    pub label: &'static str,
    pub base_confidence: f64,
    pub unsecured: LoanBounds,
    pub secured: LoanBounds,
    pub financials_required: Vec<&'static str>,
}

impl SegmentProfile {
    pub fn bounds(&self, security: SecurityType) -> LoanBounds {
        match security {
            SecurityType::Secured => self.secured,
            SecurityType::Unsecured => self.unsecured,
        }
    }
}

/// Credit-bureau banding for a risk tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskTierProfile {
    pub tier: RiskTier,
    pub label: &'static str,
    pub missed_payments: (u32, Option<u32>),
    pub ccj_defaults: (f64, f64),
    pub iva_liquidation_years: u8,
    pub confidence: f64,
}

impl RiskTierProfile {
    pub fn accepts_missed_payments(&self, count: u32) -> bool {
        let (low, high) = self.missed_payments;
        count >= low && high.map_or(true, |high| count <= high)
    }
}

/// Industry allow/deny lists. Sectors in neither list are "unrecognized".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryCatalog {
    acceptable: BTreeSet<String>,
    disallowed: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndustryStanding {
    Acceptable,
    Disallowed,
    Unrecognized,
}

impl IndustryCatalog {
    pub fn new<A, D>(acceptable: A, disallowed: D) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            acceptable: acceptable.into_iter().map(Into::into).collect(),
            disallowed: disallowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn standing(&self, sector: &str) -> IndustryStanding {
        if self.disallowed.contains(sector) {
            IndustryStanding::Disallowed
        } else if self.acceptable.contains(sector) {
            IndustryStanding::Acceptable
        } else {
            IndustryStanding::Unrecognized
        }
    }

    pub fn acceptable(&self) -> impl Iterator<Item = &str> {
        self.acceptable.iter().map(String::as_str)
    }
}

pub const ACCEPTABLE_INDUSTRY_SECTORS: [&str; 15] = [
    "Construction",
    "Professional, Scientific, and Technical Activities",
    "Wholesale and Retail Trade",
    "Other Service Activities",
    "Human Health and Social Work Activities",
    "Information and Communication",
    "Transportation and Storage",
    "Education",
    "Arts, Entertainment, and Recreation",
    "Manufacturing",
    "Accommodation and Food Service Activities",
    "Agriculture, Forestry, and Fishing",
    "Real Estate Activities",
    "Administrative and Support Service Activities",
    "Financial and Insurance Activities",
];

pub const DISALLOWED_INDUSTRY_SECTORS: [&str; 5] = [
    "Illicit or Illegal industries",
    "Places of Worship",
    "Places of Gambling",
    "Environmentally harmful industries",
    "Predatory financial services (e.g. payday lenders)",
];

/// Read-only lending configuration, built once and shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRegistry {
    segments: BTreeMap<Segment, SegmentProfile>,
    tiers: BTreeMap<RiskTier, RiskTierProfile>,
    industries: IndustryCatalog,
}

impl ProfileRegistry {
    pub fn standard() -> Self {
        let segments = [
            SegmentProfile {
                segment: Segment::Established,
                label: Segment::Established.label(),
                base_confidence: 0.95,
                unsecured: LoanBounds::new(25_000.0, 150_000.0),
                secured: LoanBounds::new(25_000.0, 250_000.0),
                financials_required: vec![
                    "3 years certified accounts",
                    "2 years accounts + 12-month forecast",
                ],
            },
            SegmentProfile {
                segment: Segment::EarlyStage,
                label: Segment::EarlyStage.label(),
                base_confidence: 0.85,
                unsecured: LoanBounds::new(25_000.0, 75_000.0),
                secured: LoanBounds::new(25_000.0, 150_000.0),
                financials_required: vec![
                    "1 year certified accounts",
                    "12+ months management accounts",
                ],
            },
            SegmentProfile {
                segment: Segment::NewlyTrading,
                label: Segment::NewlyTrading.label(),
                base_confidence: 0.75,
                unsecured: LoanBounds::new(25_000.0, 60_000.0),
                secured: LoanBounds::new(25_000.0, 100_000.0),
                financials_required: vec!["3-11 months management accounts"],
            },
            SegmentProfile {
                segment: Segment::Startup,
                label: Segment::Startup.label(),
                base_confidence: 0.60,
                unsecured: LoanBounds::new(26_000.0, 40_000.0),
                secured: LoanBounds::new(26_000.0, 80_000.0),
                financials_required: vec!["No management accounts, pre-revenue"],
            },
        ]
        .into_iter()
        .map(|profile| (profile.segment, profile))
        .collect();

        let tiers = [
            RiskTierProfile {
                tier: RiskTier::T1,
                label: "Low Risk",
                missed_payments: (0, Some(1)),
                ccj_defaults: (0.0, 2_500.0),
                iva_liquidation_years: 5,
                confidence: 0.95,
            },
            RiskTierProfile {
                tier: RiskTier::T2,
                label: "Medium Risk",
                missed_payments: (0, Some(2)),
                ccj_defaults: (2_500.0, 3_000.0),
                iva_liquidation_years: 5,
                confidence: 0.85,
            },
            RiskTierProfile {
                tier: RiskTier::T3,
                label: "High Risk",
                missed_payments: (3, None),
                ccj_defaults: (3_000.0, 5_000.0),
                iva_liquidation_years: 5,
                confidence: 0.70,
            },
        ]
        .into_iter()
        .map(|profile| (profile.tier, profile))
        .collect();

        Self {
            segments,
            tiers,
            industries: IndustryCatalog::new(
                ACCEPTABLE_INDUSTRY_SECTORS,
                DISALLOWED_INDUSTRY_SECTORS,
            ),
        }
    }

    pub fn segment(&self, segment: Segment) -> Option<&SegmentProfile> {
        self.segments.get(&segment)
    }

    pub fn tier(&self, tier: RiskTier) -> Option<&RiskTierProfile> {
        self.tiers.get(&tier)
    }

    pub fn industries(&self) -> &IndustryCatalog {
        &self.industries
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
