use crate::core::models::clause::{Clause, KnowledgeBaseUpdate, NewClause};
use crate::core::models::criteria::Criteria;
use crate::core::models::user::Capability;
use crate::core::services::session::Session;
use crate::core::traits::transport::{Method, Request};

/// Clauses grouped under their criteria, with clause creation and
/// knowledge-base editing.
#[derive(Debug, Default)]
pub struct ClausesPage {
    pub criteria: Vec<Criteria>,
    pub clauses: Vec<Clause>,
    /// Criteria the list is narrowed to, if any.
    pub filter: Option<String>,
}

impl ClausesPage {
    pub fn mount(&mut self, session: &Session, criteria_id: Option<&str>) -> bool {
        let criteria = session.api().get::<Vec<Criteria>>("/criteria");
        let mut request = Request::new(Method::Get, "/clauses");
        if let Some(id) = criteria_id {
            request = request.query("criteria_id", id);
        }
        let clauses = session.api().fetch::<Vec<Clause>>(request);

        match (criteria, clauses) {
            (Ok(mut criteria), Ok(clauses)) => {
                criteria.sort_by_key(|c| c.order);
                self.criteria = criteria;
                self.clauses = clauses;
                self.filter = criteria_id.map(str::to_string);
                true
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "loading clauses failed");
                session.notifier().error("Gagal memuat data");
                false
            }
        }
    }

    /// Criteria in display order with their clauses. A narrowed view holds
    /// only the selected criteria; one with no clauses gets an empty list.
    pub fn grouped(&self) -> Vec<(Option<&Criteria>, Vec<&Clause>)> {
        match &self.filter {
            Some(id) => vec![(
                self.criteria.iter().find(|c| &c.id == id),
                self.clauses_for(id),
            )],
            None => self
                .criteria
                .iter()
                .map(|c| (Some(c), self.clauses_for(&c.id)))
                .collect(),
        }
    }

    pub fn clauses_for(&self, criteria_id: &str) -> Vec<&Clause> {
        let mut clauses: Vec<&Clause> = self
            .clauses
            .iter()
            .filter(|c| c.criteria_id == criteria_id)
            .collect();
        clauses.sort_by(|a, b| natural_cmp(&a.clause_number, &b.clause_number));
        clauses
    }

    pub fn create(&mut self, session: &Session, form: &NewClause) -> bool {
        if !session.offers(Capability::AddClause) {
            return false;
        }
        match session.api().post::<_, Clause>("/clauses", form) {
            Ok(_) => {
                session.notifier().success("Klausul berhasil ditambahkan");
                let filter = self.filter.clone();
                self.mount(session, filter.as_deref());
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal menambahkan klausul"));
                false
            }
        }
    }

    pub fn update_knowledge_base(&mut self, session: &Session, clause_id: &str, text: &str) -> bool {
        if !session.offers(Capability::EditKnowledgeBase) {
            return false;
        }
        let body = KnowledgeBaseUpdate {
            knowledge_base: text.to_string(),
        };
        match session
            .api()
            .put::<_, serde_json::Value>(&format!("/clauses/{clause_id}/knowledge-base"), &body)
        {
            Ok(_) => {
                session
                    .notifier()
                    .success("Knowledge base berhasil diperbarui");
                let filter = self.filter.clone();
                self.mount(session, filter.as_deref());
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal memperbarui knowledge base"));
                false
            }
        }
    }
}

/// Orders clause numbers segment by segment, so `1.2` < `1.10`.
fn natural_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return std::cmp::Ordering::Equal,
            (None, Some(_)) => return std::cmp::Ordering::Less,
            (Some(_), None) => return std::cmp::Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if ord.is_ne() {
                    return ord;
                }
            }
        }
    }
}
