use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// AI verdict for a clause, as assigned by the analysis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComplianceStatus {
    Sesuai,
    BelumSesuai,
    /// Any other label the backend sends, kept verbatim.
    Other(String),
}

impl ComplianceStatus {
    pub fn is_compliant(&self) -> bool {
        matches!(self, ComplianceStatus::Sesuai)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ComplianceStatus::Sesuai => "Sesuai",
            ComplianceStatus::BelumSesuai => "Belum Sesuai",
            ComplianceStatus::Other(label) => label,
        }
    }
}

impl From<String> for ComplianceStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Sesuai" => ComplianceStatus::Sesuai,
            "Belum Sesuai" => ComplianceStatus::BelumSesuai,
            _ => ComplianceStatus::Other(raw),
        }
    }
}

impl From<ComplianceStatus> for String {
    fn from(status: ComplianceStatus) -> Self {
        status.as_str().to_string()
    }
}

/// The human auditor's decision overriding the AI suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AuditorStatus {
    Confirm,
    NonConfirmMinor,
    NonConfirmMajor,
}

impl AuditorStatus {
    pub fn label(self) -> &'static str {
        match self {
            AuditorStatus::Confirm => "Confirm",
            AuditorStatus::NonConfirmMinor => "Non-Confirm (Minor)",
            AuditorStatus::NonConfirmMajor => "Non-Confirm (Major)",
        }
    }
}

/// Stored analysis result for one clause (`/audit/results/{clause_id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    #[serde(default)]
    pub id: Option<String>,
    pub clause_id: String,
    pub status: ComplianceStatus,
    pub score: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub improvement_suggestions: String,
    #[serde(default)]
    pub audited_at: Option<Timestamp>,
    #[serde(default)]
    pub audited_by: Option<String>,
    #[serde(default)]
    pub auditor_status: Option<AuditorStatus>,
    #[serde(default)]
    pub auditor_notes: Option<String>,
    #[serde(default)]
    pub agreed_date: Option<Timestamp>,
}

/// Body of `PUT /audit/results/{clause_id}/auditor-assessment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditorAssessment {
    pub auditor_status: AuditorStatus,
    pub auditor_notes: String,
    /// `YYYY-MM-DD`.
    pub agreed_date: String,
}

/// Response of `POST /audit/hard-reset`.
#[derive(Debug, Clone, Deserialize)]
pub struct HardResetOutcome {
    #[serde(default)]
    pub message: Option<String>,
    pub deleted: HardResetCounts,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HardResetCounts {
    #[serde(default)]
    pub files: u64,
    #[serde(default)]
    pub documents: u64,
    #[serde(default)]
    pub audit_results: u64,
    #[serde(default)]
    pub recommendations: u64,
}
