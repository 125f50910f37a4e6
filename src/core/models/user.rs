use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// Role of a signed-in account.
///
/// Roles only drive what the client offers; the backend re-checks every
/// request on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Auditor,
    Auditee,
}

impl Role {
    /// Label shown in the navigation chrome.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Auditor => "Auditor",
            Role::Auditee => "Auditee",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Auditor => "auditor",
            Role::Auditee => "auditee",
        }
    }

    /// Whether the client shows `capability` to this role.
    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageCriteria
            | Capability::AddClause
            | Capability::SeedData
            | Capability::HardReset => self == Role::Admin,
            Capability::EditKnowledgeBase => matches!(self, Role::Admin | Role::Auditor),
            Capability::RunAnalysis | Capability::AssessClause | Capability::AddRecommendation => {
                self == Role::Auditor
            }
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-gated actions. Anything not listed here is offered to every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageCriteria,
    SeedData,
    AddClause,
    EditKnowledgeBase,
    HardReset,
    RunAnalysis,
    AssessClause,
    AddRecommendation,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Capability::ManageCriteria => "manage criteria",
            Capability::SeedData => "seed data",
            Capability::AddClause => "add clause",
            Capability::EditKnowledgeBase => "edit knowledge base",
            Capability::HardReset => "hard reset",
            Capability::RunAnalysis => "run AI analysis",
            Capability::AssessClause => "auditor assessment",
            Capability::AddRecommendation => "add recommendation",
        }
    }
}

/// An account as returned by `/auth/me` and `/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
    pub role: Role,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}
