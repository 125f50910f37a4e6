use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// Progress of a remediation recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Pending,
    InProgress,
    Completed,
}

impl RecommendationStatus {
    pub fn label(self) -> &'static str {
        match self {
            RecommendationStatus::Pending => "Pending",
            RecommendationStatus::InProgress => "Dalam Proses",
            RecommendationStatus::Completed => "Selesai",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationStatus::Pending => "pending",
            RecommendationStatus::InProgress => "in_progress",
            RecommendationStatus::Completed => "completed",
        }
    }
}

/// A remediation item raised by an auditor against a clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub clause_id: String,
    pub recommendation_text: String,
    pub deadline: Timestamp,
    pub status: RecommendationStatus,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Body of `POST /recommendations`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecommendation {
    pub clause_id: String,
    pub recommendation_text: String,
    /// `YYYY-MM-DD`.
    pub deadline: String,
}

/// Body of `PUT /recommendations/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: RecommendationStatus,
    pub completed_at: Option<String>,
}

impl StatusUpdate {
    /// Completion stamps `now`; any other status clears the stamp.
    pub fn new(status: RecommendationStatus, now: Timestamp) -> Self {
        let completed_at =
            (status == RecommendationStatus::Completed).then(|| now.0.to_rfc3339());
        Self {
            status,
            completed_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    Warning,
}

/// A recommendation whose deadline is within a week.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: String,
    pub clause_number: String,
    pub clause_title: String,
    pub recommendation: String,
    pub deadline: Timestamp,
    pub days_left: i64,
    pub urgency: Urgency,
}

/// Response of `GET /recommendations/notifications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationFeed {
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn completed_update_stamps_completion() {
        let now = Timestamp(chrono::Utc.with_ymd_and_hms(2026, 5, 2, 7, 0, 0).unwrap());
        let update = StatusUpdate::new(RecommendationStatus::Completed, now);
        assert_eq!(
            update.completed_at.as_deref(),
            Some("2026-05-02T07:00:00+00:00")
        );
    }

    #[test]
    fn reopening_clears_completion() {
        let update = StatusUpdate::new(RecommendationStatus::InProgress, Timestamp::now());
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert!(json["completed_at"].is_null());
    }

    #[test]
    fn naive_deadline_is_accepted() {
        let json = r#"{
            "id": "rec-1",
            "clause_id": "c-1",
            "recommendation_text": "Lengkapi APAR",
            "deadline": "2026-06-30T00:00:00",
            "status": "pending",
            "created_by": "u-1",
            "created_at": "2026-06-01T02:00:00+00:00",
            "completed_at": null
        }"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.deadline.date_string(), "2026-06-30");
        assert!(rec.completed_at.is_none());
    }

    #[test]
    fn notification_feed_deserializes() {
        let json = r#"{"notifications":[{
            "id": "rec-1",
            "clause_number": "2.1",
            "clause_title": "Rencana K3",
            "recommendation": "Susun rencana",
            "deadline": "2026-06-30T00:00:00",
            "days_left": 2,
            "urgency": "critical"
        }]}"#;
        let feed: NotificationFeed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.notifications[0].urgency, Urgency::Critical);
    }
}
