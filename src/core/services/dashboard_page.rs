use crate::core::models::dashboard::DashboardStats;
use crate::core::models::recommendation::Notification;
use crate::core::services::recommendations_page::notifications;
use crate::core::services::session::Session;

/// Which evidence archive to pull from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvidenceScope {
    All,
    Criteria(String),
}

impl EvidenceScope {
    pub fn path(&self) -> String {
        match self {
            EvidenceScope::All => "/audit/download-all-evidence".to_string(),
            EvidenceScope::Criteria(id) => format!("/audit/download-criteria-evidence/{id}"),
        }
    }

    /// Local file name for a saved archive, stamped with `stamp`.
    pub fn archive_name(&self, stamp: &str) -> String {
        match self {
            EvidenceScope::All => format!("Evidence_SMK3_{stamp}.zip"),
            EvidenceScope::Criteria(id) => format!("Evidence_{id}_{stamp}.zip"),
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardPage {
    pub stats: Option<DashboardStats>,
    pub notifications: Vec<Notification>,
}

impl DashboardPage {
    pub fn mount(&mut self, session: &Session) -> bool {
        match session.api().get::<DashboardStats>("/audit/dashboard") {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => {
                tracing::warn!(error = %e, "loading dashboard failed");
                session.notifier().error("Gagal memuat data dashboard");
                return false;
            }
        }
        self.notifications = notifications(session);
        true
    }

    pub fn evidence_url(&self, session: &Session, scope: &EvidenceScope) -> String {
        session.api().url(&scope.path())
    }

    /// Fetch an evidence archive through the authenticated client.
    pub fn fetch_evidence(&self, session: &Session, scope: &EvidenceScope) -> Option<Vec<u8>> {
        match session.api().get_bytes(&scope.path()) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "evidence download failed");
                session
                    .notifier()
                    .error(&e.notice("Gagal mengunduh evidence"));
                None
            }
        }
    }
}
