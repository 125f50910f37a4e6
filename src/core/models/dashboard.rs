use serde::Deserialize;

/// Response of `GET /audit/dashboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardStats {
    pub total_clauses: u64,
    pub audited_clauses: u64,
    pub average_score: f64,
    pub compliant_clauses: u64,
    pub non_compliant_clauses: u64,
    #[serde(default)]
    pub criteria_scores: Vec<CriteriaScore>,
}

impl DashboardStats {
    /// Share of clauses audited so far, in percent.
    pub fn achievement_percentage(&self) -> f64 {
        if self.total_clauses == 0 {
            0.0
        } else {
            self.audited_clauses as f64 / self.total_clauses as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CriteriaScore {
    pub id: String,
    pub name: String,
    pub average_score: f64,
    pub achievement_percentage: f64,
    pub total_clauses: u64,
    pub audited_clauses: u64,
    pub compliant_clauses: u64,
    pub strength: Strength,
    #[serde(default)]
    pub strength_label: Option<String>,
}

/// SMK3 achievement band of a criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::Strong => "Memuaskan",
            Strength::Moderate => "Baik",
            Strength::Weak => "Kurang",
        }
    }
}
