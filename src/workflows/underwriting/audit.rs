use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stage of the decision pipeline that produced an audit note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStage {
    Gate,
    BorrowerScreen,
    Conditions,
    SegmentTable,
    Checklist,
    Risk,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub stage: AuditStage,
    pub note: String,
}

/// In-memory record of how one decision was reached. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditTrail {
    pub request_id: String,
    pub rule_version: String,
    pub evaluated_at: DateTime<Utc>,
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new(request_id: impl Into<String>, rule_version: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            rule_version: rule_version.into(),
            evaluated_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, stage: AuditStage, note: impl Into<String>) {
        self.entries.push(AuditEntry {
            stage,
            note: note.into(),
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn stages(&self) -> Vec<AuditStage> {
        self.entries.iter().map(|entry| entry.stage).collect()
    }

    /// Multi-line rendering embedded in narrative prompts.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("Request ID: {}", self.request_id),
            format!("Rule version: {}", self.rule_version),
            format!("Evaluated at: {}", self.evaluated_at.to_rfc3339()),
        ];
        lines.extend(
            self.entries
                .iter()
                .enumerate()
                .map(|(index, entry)| format!("{}. [{:?}] {}", index + 1, entry.stage, entry.note)),
        );
        lines.join("\n")
    }
}
