use serde::{Deserialize, Deserializer, Serialize};

use super::timestamp::Timestamp;

/// An auditable requirement under a criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub id: String,
    pub criteria_id: String,
    pub clause_number: String,
    pub title: String,
    pub description: String,
    /// Free-text guidance consumed by the AI analysis. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub knowledge_base: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Clause {
    /// `"<number>: <title>"`, how clauses are referred to across pages.
    pub fn heading(&self) -> String {
        format!("{}: {}", self.clause_number, self.title)
    }

    pub fn has_knowledge_base(&self) -> bool {
        !self.knowledge_base.trim().is_empty()
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /clauses`.
#[derive(Debug, Clone, Serialize)]
pub struct NewClause {
    pub criteria_id: String,
    pub clause_number: String,
    pub title: String,
    pub description: String,
}

/// Body of `PUT /clauses/{id}/knowledge-base`.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeBaseUpdate {
    pub knowledge_base: String,
}
