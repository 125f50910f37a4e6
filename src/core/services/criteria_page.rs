use crate::core::models::criteria::{Criteria, NewCriteria, SeedOutcome};
use crate::core::models::user::Capability;
use crate::core::services::session::Session;

/// Criteria list with admin-only create, delete and seed actions.
#[derive(Debug, Default)]
pub struct CriteriaPage {
    pub criteria: Vec<Criteria>,
}

impl CriteriaPage {
    pub fn mount(&mut self, session: &Session) -> bool {
        match session.api().get::<Vec<Criteria>>("/criteria") {
            Ok(mut criteria) => {
                criteria.sort_by_key(|c| c.order);
                self.criteria = criteria;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading criteria failed");
                session.notifier().error("Gagal memuat kriteria");
                false
            }
        }
    }

    pub fn create(&mut self, session: &Session, form: &NewCriteria) -> bool {
        if !session.offers(Capability::ManageCriteria) {
            return false;
        }
        if form.name.trim().is_empty() {
            session.notifier().error("Nama kriteria wajib diisi");
            return false;
        }
        match session.api().post::<_, Criteria>("/criteria", form) {
            Ok(_) => {
                session.notifier().success("Kriteria berhasil ditambahkan");
                self.mount(session);
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal menambahkan kriteria"));
                false
            }
        }
    }

    pub fn delete(&mut self, session: &Session, id: &str) -> bool {
        if !session.offers(Capability::ManageCriteria) {
            return false;
        }
        match session
            .api()
            .delete::<serde_json::Value>(&format!("/criteria/{id}"))
        {
            Ok(_) => {
                session.notifier().success("Kriteria berhasil dihapus");
                self.mount(session);
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal menghapus kriteria"));
                false
            }
        }
    }

    /// Load the SMK3 catalogue. Offered only while no criteria exist.
    pub fn seed(&mut self, session: &Session) -> bool {
        if !session.offers(Capability::SeedData) {
            return false;
        }
        if !self.criteria.is_empty() {
            session.notifier().info("Data sudah ada");
            return false;
        }
        match session.api().post_empty::<SeedOutcome>("/seed-data") {
            Ok(outcome) => {
                tracing::debug!(
                    criteria = ?outcome.criteria_count,
                    clauses = ?outcome.clauses_count,
                    "catalogue seeded"
                );
                session.notifier().success("Data berhasil diinisialisasi");
                session.notifier().info(&outcome.message);
                self.mount(session);
                true
            }
            Err(e) => {
                session.notifier().info(&e.notice("Data sudah ada"));
                false
            }
        }
    }
}
