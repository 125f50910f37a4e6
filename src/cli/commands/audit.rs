use colored::Colorize;

use super::io_helpers::{confirm, open_link, open_preview, save_file};
use super::{can, done};
use crate::cli::output::{self, Spinner};
use crate::cli::AuditAction;
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, Smk3Error};
use crate::core::models::audit_result::AuditResult;
use crate::core::models::document::format_size;
use crate::core::models::user::Capability;
use crate::core::services::audit_page::AuditPage;
use crate::core::services::session::Session;

/// Execute the `smk3 audit` command.
pub fn execute(action: Option<&AuditAction>, session: &mut Session, config: &AppConfig) -> Result<()> {
    let mut page = AuditPage::default();
    let Some(action) = action else {
        done(page.mount(session))?;
        render(&page, session);
        return Ok(());
    };

    match action {
        AuditAction::Show { criteria, clause } => {
            done(page.mount(session))?;
            if let Some(clause) = clause {
                done(page.focus_clause(session, clause))?;
            } else if let Some(criteria) = criteria {
                done(page.select_criteria(session, criteria))?;
            }
        }
        AuditAction::Upload { clause, file } => {
            if !file.exists() {
                return Err(Smk3Error::FileNotFound { path: file.clone() });
            }
            done(page.focus_clause(session, clause))?;
            let spinner = Spinner::start("Mengupload dokumen...");
            let ok = page.upload(session, file);
            spinner.finish();
            done(ok)?;
        }
        AuditAction::DeleteDoc {
            clause,
            document,
            yes,
        } => {
            done(page.focus_clause(session, clause))?;
            if !confirm(&format!("Hapus dokumen {document}?"), *yes)? {
                output::info("Dibatalkan");
                return Ok(());
            }
            done(page.delete_document(session, document))?;
        }
        AuditAction::Preview { clause, document } => {
            done(page.focus_clause(session, clause))?;
            let file = page
                .preview(session, document)
                .ok_or(Smk3Error::ActionFailed)?;
            open_preview(&file.document.filename, &file.bytes)?;
            return Ok(());
        }
        AuditAction::Download { clause, document } => {
            done(page.focus_clause(session, clause))?;
            let file = page
                .download(session, document)
                .ok_or(Smk3Error::ActionFailed)?;
            let path = save_file(
                &config.output.download_dir,
                &file.document.filename,
                &file.bytes,
            )?;
            output::success(&format!("Dokumen disimpan ke {}", path.display()));
            return Ok(());
        }
        AuditAction::DownloadAll { clause } => {
            done(page.focus_clause(session, clause))?;
            let url = page
                .download_all_url(session)
                .ok_or(Smk3Error::ActionFailed)?;
            open_link(&url);
            return Ok(());
        }
        AuditAction::Analyze { clause } => {
            done(page.focus_clause(session, clause))?;
            let spinner = Spinner::start("Menganalisis dokumen dengan AI...");
            let ok = page.analyze(session);
            spinner.finish();
            done(ok)?;
        }
        AuditAction::Assess {
            clause,
            status,
            agreed_date,
            notes,
        } => {
            done(page.focus_clause(session, clause))?;
            if let Some(status) = status {
                page.form.auditor_status = Some(*status);
            }
            if let Some(date) = agreed_date {
                page.form.agreed_date = Some(*date);
            }
            if let Some(notes) = notes {
                page.form.auditor_notes = notes.clone();
            }
            done(page.save_assessment(session))?;
        }
        AuditAction::HardReset { yes } => {
            if !confirm(
                "Hapus SEMUA dokumen, hasil audit dan rekomendasi? Tindakan ini tidak dapat dibatalkan.",
                *yes,
            )? {
                output::info("Dibatalkan");
                return Ok(());
            }
            if page.hard_reset(session).is_none() {
                return Err(Smk3Error::ActionFailed);
            }
        }
    }
    render(&page, session);
    Ok(())
}

fn render(page: &AuditPage, session: &Session) {
    let Some(clause) = &page.selected_clause else {
        output::header("Kriteria");
        for c in &page.criteria {
            println!("  {:>3}. {}  {}", c.order, c.name, c.id.dimmed());
        }
        println!("\n  Pilih klausul: smk3 audit show --clause <id>  atau  --criteria <id>");
        return;
    };

    if page.clauses.len() > 1 {
        output::header("Klausul");
        for c in &page.clauses {
            let marker = if c.id == clause.id { "▸" } else { " " };
            println!("  {marker} {}  {}", c.heading(), c.id.dimmed());
        }
    }

    output::header(&clause.heading());
    if !clause.description.is_empty() {
        println!("  {}", clause.description);
    }

    println!("\n  {}", "Dokumen".bold());
    if page.documents.is_empty() {
        println!("    {}", "Belum ada dokumen".dimmed());
    }
    for doc in &page.documents {
        println!(
            "    {}  {}  {}  {}",
            doc.filename,
            format_size(doc.size).dimmed(),
            doc.uploaded_at.date_string().dimmed(),
            doc.id.dimmed()
        );
    }

    match &page.audit_result {
        Some(result) => render_result(result),
        None => {
            println!("\n  {}", "Belum ada hasil audit".dimmed());
            if can(session, Capability::RunAnalysis) && !page.documents.is_empty() {
                if clause.has_knowledge_base() {
                    println!("  Jalankan analisis: smk3 audit analyze --clause {}", clause.id);
                } else {
                    println!(
                        "  {}",
                        format!(
                            "Analisis AI butuh knowledge base: smk3 clauses knowledge-base {} --text <teks>",
                            clause.id
                        )
                        .dimmed()
                    );
                }
            }
        }
    }
}

fn render_result(result: &AuditResult) {
    let status = if result.status.is_compliant() {
        result.status.as_str().green()
    } else {
        result.status.as_str().red()
    };
    println!("\n  {}", "Hasil Audit AI".bold());
    println!("    Status: {status}   Skor: {:.1}", result.score);
    if let Some(at) = result.audited_at {
        println!("    Dianalisis: {at}");
    }
    if !result.reasoning.is_empty() {
        println!("    Alasan: {}", result.reasoning);
    }
    if !result.feedback.is_empty() {
        println!("    Umpan balik: {}", result.feedback);
    }
    if !result.improvement_suggestions.is_empty() {
        println!("    Saran perbaikan: {}", result.improvement_suggestions);
    }

    if let Some(status) = result.auditor_status {
        println!("\n  {}", "Penilaian Auditor".bold());
        println!("    Status: {}", status.label().cyan());
        if let Some(notes) = result.auditor_notes.as_deref().filter(|n| !n.is_empty()) {
            println!("    Catatan: {notes}");
        }
        if let Some(date) = result.agreed_date {
            println!("    Tanggal kesepakatan: {}", date.date_string());
        }
    }
}
