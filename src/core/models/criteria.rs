use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// A top-level SMK3 audit criteria grouping clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub id: String,
    pub name: String,
    pub description: String,
    pub order: i64,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Body of `POST /criteria`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCriteria {
    pub name: String,
    pub description: String,
    pub order: i64,
}

/// Response of `POST /seed-data`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedOutcome {
    pub message: String,
    #[serde(default)]
    pub criteria_count: Option<u64>,
    #[serde(default)]
    pub clauses_count: Option<u64>,
}
