use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::domain::{
    BorrowerType, LoanApplication, RiskTier, Segment, SecurityType, SupplementaryConditions,
};

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read application batch: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid application CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid {field} value '{value}'")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Loads loan applications from a CSV export, one application per row.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LoanApplication>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LoanApplication>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut applications = Vec::new();

        for (index, record) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
            let row = record?;
            applications.push(row.into_application(index + 1)?);
        }

        debug!(count = applications.len(), "application batch parsed");
        Ok(applications)
    }
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    segment: String,
    risk_tier: String,
    dscr: f64,
    loan_amount: f64,
    security: String,
    industry_sector: String,
    borrower_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    provided_documents: Option<String>,
    #[serde(default)]
    provided_pg: f64,
    #[serde(default)]
    min_pg_required: f64,
    #[serde(default, deserialize_with = "flag")]
    requires_debenture: bool,
    #[serde(default, deserialize_with = "flag")]
    has_debenture: bool,
    #[serde(default, deserialize_with = "flag")]
    has_legal_charge: bool,
    #[serde(default, deserialize_with = "flag")]
    due_diligence_complete: bool,
    #[serde(default, deserialize_with = "flag")]
    business_registered: bool,
}

impl ApplicationRow {
    fn into_application(self, row: usize) -> Result<LoanApplication, BatchImportError> {
        let invalid = |field: &'static str, value: &str| BatchImportError::InvalidField {
            row,
            field,
            value: value.to_string(),
        };

        let segment = Segment::from_code(&self.segment).ok_or_else(|| invalid("segment", &self.segment))?;
        let risk_tier =
            RiskTier::from_code(&self.risk_tier).ok_or_else(|| invalid("risk_tier", &self.risk_tier))?;
        let security = SecurityType::from_label(&self.security)
            .ok_or_else(|| invalid("security", &self.security))?;

        let provided_documents: BTreeSet<String> = self
            .provided_documents
            .as_deref()
            .map(|documents| {
                documents
                    .split(';')
                    .map(str::trim)
                    .filter(|document| !document.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(LoanApplication {
            segment,
            risk_tier,
            dscr: self.dscr,
            loan_amount: self.loan_amount,
            security,
            industry_sector: self.industry_sector,
            borrower_type: BorrowerType::from(self.borrower_type),
            provided_documents,
            conditions: SupplementaryConditions {
                provided_pg: self.provided_pg,
                min_pg_required: self.min_pg_required,
                requires_debenture: self.requires_debenture,
                has_debenture: self.has_debenture,
                has_legal_charge: self.has_legal_charge,
                due_diligence_complete: self.due_diligence_complete,
                business_registered: self.business_registered,
            },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}
