use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::Segment;
use super::outcome::{DecisionOutcome, SegmentVerdict};

pub const PENDING_DOCUMENTS_CLAUSE: &str =
    " Conditional approval pending submission of required documents.";

const COMMON_DOCUMENTS: [(&str, &str); 9] = [
    (
        "Completed Application Form",
        "Must capture the loan request, purpose, trading history, and full details of the borrower and directors, including both personal and business assets/liabilities and a declaration of credit history.",
    ),
    (
        "Proof of Identity",
        "For all business owners, directors, and persons with significant control. Acceptable forms include: Passport, Driving license, National identity card, or other government-issued photo ID.",
    ),
    (
        "Proof of Address",
        "Certified proof of address, such as a recent utility bill (not older than 3 months), bank statement, or local authority tax bill.",
    ),
    (
        "Bank Statements",
        "A minimum of 6 months of business bank statements and at least 3 months of personal bank statements for the business owner or directors.",
    ),
    (
        "Declaration of Income and Expenditure",
        "A formal declaration outlining the borrower’s income, expenditures, and overall financial position.",
    ),
    (
        "Credit History Documentation",
        "Evidence of credit history, such as a credit report or related documentation from a credit reference agency.",
    ),
    (
        "Valuation and Professional Reports",
        "For secured loans, an independent professional valuation report of the collateral is required.",
    ),
    (
        "Agreement in Principle",
        "An agreement in principle may be required as part of the overall documentation package.",
    ),
    (
        "Legal Representation/Independent Legal Advice",
        "Documentation confirming independent legal advice or representation if required.",
    ),
];

pub const FINANCIAL_STATEMENTS: &str = "Financial Statements";

/// Common documents plus the per-segment financial statement requirement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentChecklist {
    common: BTreeMap<String, String>,
    per_segment: BTreeMap<Segment, BTreeMap<String, String>>,
}

impl Default for DocumentChecklist {
    fn default() -> Self {
        let common = COMMON_DOCUMENTS
            .iter()
            .map(|(id, description)| (id.to_string(), description.to_string()))
            .collect();

        let per_segment = Segment::ALL
            .iter()
            .map(|segment| {
                let description = match segment {
                    Segment::Established => "Either 3 years of historical accounts OR 2 years of historical accounts and 1 year of projections.",
                    Segment::EarlyStage => "1 year of historical accounts and 2 years of projections.",
                    Segment::NewlyTrading => "Up to 12 months of historical accounts and, for the current year, the remaining period projections plus 2 additional years of projections.",
                    Segment::Startup => "3 years of projections.",
                };
                (
                    *segment,
                    BTreeMap::from([(FINANCIAL_STATEMENTS.to_string(), description.to_string())]),
                )
            })
            .collect();

        Self {
            common,
            per_segment,
        }
    }
}

impl DocumentChecklist {
    pub fn required(&self, segment: Segment) -> BTreeMap<String, String> {
        let mut required = self.common.clone();
        if let Some(extra) = self.per_segment.get(&segment) {
            required.extend(extra.iter().map(|(id, text)| (id.clone(), text.clone())));
        }
        required
    }

    pub fn missing(
        &self,
        provided: &BTreeSet<String>,
        segment: Segment,
    ) -> BTreeMap<String, String> {
        self.required(segment)
            .into_iter()
            .filter(|(id, _)| !provided.contains(id))
            .collect()
    }

    /// Settle a verdict. Paperwork-pending outcomes always become a conditional approval listing
    /// the outstanding documents, even when that list is empty.
    pub fn finalize_checklist(
        &self,
        verdict: SegmentVerdict,
        provided: &BTreeSet<String>,
        segment: Segment,
    ) -> DecisionOutcome {
        match verdict {
            SegmentVerdict::Settled(outcome) => outcome,
            SegmentVerdict::PendingPaperwork(outcome) => outcome
                .pending_documents(self.missing(provided, segment), PENDING_DOCUMENTS_CLAUSE),
        }
    }
}
