use std::path::Path;

use chrono::NaiveDate;

use crate::core::errors::{Result, Smk3Error};
use crate::core::models::audit_result::{AuditResult, AuditorAssessment, AuditorStatus, HardResetOutcome};
use crate::core::models::clause::Clause;
use crate::core::models::criteria::Criteria;
use crate::core::models::document::{DeleteOutcome, Document, mime_for};
use crate::core::models::user::Capability;
use crate::core::services::session::Session;
use crate::core::traits::transport::{Method, Request};

const NO_AI_RESULT: &str = "Tidak ada hasil audit AI. Lakukan analisis AI terlebih dahulu.";
const NO_STATUS: &str = "Pilih status penilaian (Confirm/Non-Confirm)";
const NO_AGREED_DATE: &str = "Tentukan tanggal kesepakatan";
const NO_CLAUSE: &str = "Pilih klausul terlebih dahulu";
const NO_KNOWLEDGE_BASE: &str = "Knowledge base belum dikonfigurasi untuk klausul ini";

/// Local state of the auditor sign-off form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentForm {
    pub auditor_status: Option<AuditorStatus>,
    pub auditor_notes: String,
    pub agreed_date: Option<NaiveDate>,
}

impl AssessmentForm {
    /// Pre-fill from an existing result.
    pub fn from_result(result: &AuditResult) -> Self {
        Self {
            auditor_status: result.auditor_status,
            auditor_notes: result.auditor_notes.clone().unwrap_or_default(),
            agreed_date: result.agreed_date.map(|d| d.date()),
        }
    }

    /// Build the request body. The form stays disabled until an AI result
    /// exists, and needs both a status and an agreed date.
    pub fn validate(&self, result: Option<&AuditResult>) -> Result<AuditorAssessment> {
        let invalid = |detail: &str| Smk3Error::Validation {
            detail: detail.to_string(),
        };
        if result.is_none() {
            return Err(invalid(NO_AI_RESULT));
        }
        let auditor_status = self.auditor_status.ok_or_else(|| invalid(NO_STATUS))?;
        let agreed_date = self.agreed_date.ok_or_else(|| invalid(NO_AGREED_DATE))?;
        Ok(AuditorAssessment {
            auditor_status,
            auditor_notes: self.auditor_notes.clone(),
            agreed_date: agreed_date.format("%Y-%m-%d").to_string(),
        })
    }
}

/// A fetched file ready to hand to a viewer or write to disk.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub document: Document,
    pub bytes: Vec<u8>,
}

/// The audit workspace: pick a criteria and clause, manage its evidence,
/// run the AI analysis and record the auditor's decision.
#[derive(Debug, Default)]
pub struct AuditPage {
    pub criteria: Vec<Criteria>,
    pub clauses: Vec<Clause>,
    pub selected_criteria: Option<String>,
    pub selected_clause: Option<Clause>,
    pub documents: Vec<Document>,
    pub audit_result: Option<AuditResult>,
    pub form: AssessmentForm,
}

impl AuditPage {
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

    /// Load the clauses of a criteria and select its first clause.
    pub fn select_criteria(&mut self, session: &Session, criteria_id: &str) -> bool {
        let request = Request::new(Method::Get, "/clauses").query("criteria_id", criteria_id);
        match session.api().fetch::<Vec<Clause>>(request) {
            Ok(clauses) => {
                self.selected_criteria = Some(criteria_id.to_string());
                self.clauses = clauses;
                self.selected_clause = None;
                self.documents.clear();
                self.audit_result = None;
                self.form = AssessmentForm::default();
                if let Some(first) = self.clauses.first().cloned() {
                    self.select_clause(session, first);
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading clauses failed");
                session.notifier().error("Gagal memuat klausul");
                false
            }
        }
    }

    /// Jump straight to a clause by id, loading its criteria's clause list.
    pub fn focus_clause(&mut self, session: &Session, clause_id: &str) -> bool {
        if let Some(clause) = self.clauses.iter().find(|c| c.id == clause_id).cloned() {
            self.select_clause(session, clause);
            return true;
        }
        let all = match session.api().get::<Vec<Clause>>("/clauses") {
            Ok(all) => all,
            Err(e) => {
                tracing::warn!(error = %e, "loading clauses failed");
                session.notifier().error("Gagal memuat klausul");
                return false;
            }
        };
        let Some(clause) = all.iter().find(|c| c.id == clause_id).cloned() else {
            session.notifier().error("Klausul tidak ditemukan");
            return false;
        };
        self.selected_criteria = Some(clause.criteria_id.clone());
        self.clauses = all
            .into_iter()
            .filter(|c| c.criteria_id == clause.criteria_id)
            .collect();
        self.select_clause(session, clause);
        true
    }

    /// Select a clause and load its documents and audit result.
    pub fn select_clause(&mut self, session: &Session, clause: Clause) {
        let clause_id = clause.id.clone();
        self.selected_clause = Some(clause);
        self.audit_result = None;
        self.form = AssessmentForm::default();
        self.fetch_documents(session, &clause_id);
        self.fetch_result(session, &clause_id);
    }

    fn fetch_documents(&mut self, session: &Session, clause_id: &str) {
        match session
            .api()
            .get::<Vec<Document>>(&format!("/clauses/{clause_id}/documents"))
        {
            Ok(documents) => self.documents = documents,
            Err(e) => tracing::warn!(error = %e, clause_id, "loading documents failed"),
        }
    }

    fn fetch_result(&mut self, session: &Session, clause_id: &str) {
        let result = session
            .api()
            .get::<Option<AuditResult>>(&format!("/audit/results/{clause_id}"))
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, clause_id, "no audit result");
                None
            });
        self.set_result(result);
    }

    fn set_result(&mut self, result: Option<AuditResult>) {
        self.form = result
            .as_ref()
            .map(AssessmentForm::from_result)
            .unwrap_or_default();
        self.audit_result = result;
    }

    fn clause_id(&self, session: &Session) -> Option<String> {
        let id = self.selected_clause.as_ref().map(|c| c.id.clone());
        if id.is_none() {
            session.notifier().error(NO_CLAUSE);
        }
        id
    }

    /// Upload an evidence file for the selected clause.
    pub fn upload(&mut self, session: &Session, path: &Path) -> bool {
        let Some(clause_id) = self.clause_id(session) else {
            return false;
        };
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                session.notifier().error("Nama file tidak valid");
                return false;
            }
        };
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                session
                    .notifier()
                    .error(&format!("Tidak dapat membaca {}: {e}", path.display()));
                return false;
            }
        };

        let outcome = session.api().upload::<Document>(
            &format!("/clauses/{clause_id}/upload"),
            &filename,
            mime_for(&filename),
            bytes,
        );
        match outcome {
            Ok(_) => {
                session.notifier().success("Dokumen berhasil diupload");
                self.fetch_documents(session, &clause_id);
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal mengupload dokumen"));
                false
            }
        }
    }

    /// Delete a document. When it was the last one the backend drops the
    /// audit result too, and so does the page.
    pub fn delete_document(&mut self, session: &Session, document_id: &str) -> bool {
        let Some(clause_id) = self.clause_id(session) else {
            return false;
        };
        match session
            .api()
            .delete::<DeleteOutcome>(&format!("/documents/{document_id}"))
        {
            Ok(outcome) => {
                if outcome.audit_result_deleted {
                    self.set_result(None);
                    session.notifier().success(
                        "Dokumen dan hasil audit berhasil dihapus (tidak ada dokumen tersisa)",
                    );
                } else {
                    session.notifier().success("Dokumen berhasil dihapus");
                }
                self.fetch_documents(session, &clause_id);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, document_id, "delete failed");
                session.notifier().error("Gagal menghapus dokumen");
                false
            }
        }
    }

    pub fn document(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }

    /// Fetch a PDF or image for inline viewing. Other types are refused
    /// without a request.
    pub fn preview(&self, session: &Session, document_id: &str) -> Option<FetchedFile> {
        let Some(document) = self.document(document_id).cloned() else {
            session.notifier().error("Dokumen tidak ditemukan");
            return None;
        };
        if !document.preview_kind().is_previewable() {
            session
                .notifier()
                .error("Pratinjau hanya tersedia untuk PDF dan gambar. Silakan unduh dokumen.");
            return None;
        }
        match session
            .api()
            .get_bytes(&format!("/documents/{document_id}/preview"))
        {
            Ok(bytes) => Some(FetchedFile { document, bytes }),
            Err(e) => {
                tracing::warn!(error = %e, document_id, "preview failed");
                session.notifier().error("Gagal membuka preview dokumen");
                None
            }
        }
    }

    pub fn download(&self, session: &Session, document_id: &str) -> Option<FetchedFile> {
        let Some(document) = self.document(document_id).cloned() else {
            session.notifier().error("Dokumen tidak ditemukan");
            return None;
        };
        match session
            .api()
            .get_bytes(&format!("/documents/{document_id}/download"))
        {
            Ok(bytes) => Some(FetchedFile { document, bytes }),
            Err(e) => {
                tracing::warn!(error = %e, document_id, "download failed");
                session.notifier().error("Gagal mengunduh dokumen");
                None
            }
        }
    }

    /// Link to the backend's zip of every document of the selected clause.
    pub fn download_all_url(&self, session: &Session) -> Option<String> {
        let clause_id = self.clause_id(session)?;
        Some(
            session
                .api()
                .url(&format!("/clauses/{clause_id}/documents/download-all")),
        )
    }

    /// Run the AI analysis on the selected clause's documents.
    pub fn analyze(&mut self, session: &Session) -> bool {
        if !session.offers(Capability::RunAnalysis) {
            return false;
        }
        let Some(clause_id) = self.clause_id(session) else {
            return false;
        };
        if !self
            .selected_clause
            .as_ref()
            .is_some_and(Clause::has_knowledge_base)
        {
            session.notifier().error(NO_KNOWLEDGE_BASE);
            return false;
        }
        if self.documents.is_empty() {
            session
                .notifier()
                .error("Upload dokumen terlebih dahulu sebelum analisis");
            return false;
        }
        match session
            .api()
            .post_empty::<AuditResult>(&format!("/audit/analyze/{clause_id}"))
        {
            Ok(result) => {
                self.set_result(Some(result));
                session.notifier().success("Analisis selesai!");
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal menganalisis dokumen"));
                false
            }
        }
    }

    /// Submit the auditor assessment form, then re-fetch the result.
    pub fn save_assessment(&mut self, session: &Session) -> bool {
        if !session.offers(Capability::AssessClause) {
            return false;
        }
        let Some(clause_id) = self.clause_id(session) else {
            return false;
        };
        let body = match self.form.validate(self.audit_result.as_ref()) {
            Ok(body) => body,
            Err(e) => {
                session.notifier().error(&e.to_string());
                return false;
            }
        };
        match session.api().put::<_, serde_json::Value>(
            &format!("/audit/results/{clause_id}/auditor-assessment"),
            &body,
        ) {
            Ok(_) => {
                session
                    .notifier()
                    .success("Penilaian auditor berhasil disimpan!");
                self.fetch_result(session, &clause_id);
                true
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal menyimpan penilaian auditor"));
                false
            }
        }
    }

    /// Wipe every document, result and recommendation on the backend, then
    /// reload the page from scratch.
    pub fn hard_reset(&mut self, session: &Session) -> Option<HardResetOutcome> {
        if !session.offers(Capability::HardReset) {
            return None;
        }
        match session.api().post_empty::<HardResetOutcome>("/audit/hard-reset") {
            Ok(outcome) => {
                let d = &outcome.deleted;
                session.notifier().success(&format!(
                    "Hard reset berhasil! Dihapus: {} dokumen, {} hasil audit, {} rekomendasi",
                    d.documents, d.audit_results, d.recommendations
                ));
                *self = AuditPage::default();
                self.mount(session);
                Some(outcome)
            }
            Err(e) => {
                session
                    .notifier()
                    .error(&e.notice("Gagal melakukan hard reset"));
                None
            }
        }
    }
}
