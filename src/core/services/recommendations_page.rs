use crate::core::models::clause::Clause;
use crate::core::models::recommendation::{
    NewRecommendation, Notification, NotificationFeed, Recommendation, RecommendationStatus,
    StatusUpdate,
};
use crate::core::models::timestamp::Timestamp;
use crate::core::models::user::Capability;
use crate::core::services::session::Session;
use crate::core::traits::transport::{Method, Request};

/// Optional filters for the recommendation list.
#[derive(Debug, Clone, Default)]
pub struct RecommendationFilter {
    pub clause_id: Option<String>,
    pub status: Option<RecommendationStatus>,
}

#[derive(Debug, Default)]
pub struct RecommendationsPage {
    pub recommendations: Vec<Recommendation>,
    pub clauses: Vec<Clause>,
    pub filter: RecommendationFilter,
}

impl RecommendationsPage {
    pub fn mount(&mut self, session: &Session, filter: RecommendationFilter) -> bool {
        self.filter = filter;
        self.refresh(session)
    }

    fn refresh(&mut self, session: &Session) -> bool {
        let mut request = Request::new(Method::Get, "/recommendations");
        if let Some(clause_id) = &self.filter.clause_id {
            request = request.query("clause_id", clause_id);
        }
        if let Some(status) = self.filter.status {
            request = request.query("status", status.as_str());
        }

        let recommendations = session.api().fetch::<Vec<Recommendation>>(request);
        let clauses = session.api().get::<Vec<Clause>>("/clauses");
        match (recommendations, clauses) {
            (Ok(recommendations), Ok(clauses)) => {
                self.recommendations = recommendations;
                self.clauses = clauses;
                true
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "loading recommendations failed");
                session.notifier().error("Gagal memuat data");
                false
            }
        }
    }

    /// `"number: title"` of the clause a recommendation belongs to.
    pub fn clause_label(&self, clause_id: &str) -> String {
        self.clauses
            .iter()
            .find(|c| c.id == clause_id)
            .map(Clause::heading)
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn by_status(&self, status: RecommendationStatus) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.status == status)
            .collect()
    }

    pub fn create(&mut self, session: &Session, new: &NewRecommendation) -> bool {
        if !session.offers(Capability::AddRecommendation) {
            return false;
        }
        if new.recommendation_text.trim().is_empty() {
            session
                .notifier()
                .error("Teks rekomendasi wajib diisi");
            return false;
        }
        match session
            .api()
            .post::<_, serde_json::Value>("/recommendations", new)
        {
            Ok(_) => {
                session
                    .notifier()
                    .success("Rekomendasi berhasil ditambahkan");
                self.refresh(session);
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal menambahkan rekomendasi"));
                false
            }
        }
    }

    /// Move a recommendation to `status`; completing it stamps `now`.
    pub fn update_status(
        &mut self,
        session: &Session,
        recommendation_id: &str,
        status: RecommendationStatus,
        now: Timestamp,
    ) -> bool {
        let update = StatusUpdate::new(status, now);
        match session.api().put::<_, serde_json::Value>(
            &format!("/recommendations/{recommendation_id}"),
            &update,
        ) {
            Ok(_) => {
                session.notifier().success("Status berhasil diperbarui");
                self.refresh(session);
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal memperbarui status"));
                false
            }
        }
    }
}

/// Recommendations due within a week. Failures are logged and yield an
/// empty list.
pub fn notifications(session: &Session) -> Vec<Notification> {
    match session
        .api()
        .get::<NotificationFeed>("/recommendations/notifications")
    {
        Ok(feed) => feed.notifications,
        Err(e) => {
            tracing::warn!(error = %e, "loading notifications failed");
            Vec::new()
        }
    }
}
