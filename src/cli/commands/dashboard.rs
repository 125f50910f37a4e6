use colored::Colorize;

use super::io_helpers::{open_link, save_file};
use crate::cli::DashboardAction;
use crate::cli::output::{self, Spinner};
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, Smk3Error};
use crate::core::models::dashboard::{DashboardStats, Strength};
use crate::core::models::recommendation::{Notification, Urgency};
use crate::core::services::dashboard_page::{DashboardPage, EvidenceScope};
use crate::core::services::session::Session;

/// Execute the `smk3 dashboard` command.
pub fn execute(
    action: Option<&DashboardAction>,
    session: &mut Session,
    config: &AppConfig,
) -> Result<()> {
    match action {
        None => show(session),
        Some(DashboardAction::Evidence { criteria, save }) => {
            let scope = criteria
                .clone()
                .map(EvidenceScope::Criteria)
                .unwrap_or(EvidenceScope::All);
            evidence(session, config, &scope, *save)
        }
    }
}

fn show(session: &Session) -> Result<()> {
    let mut page = DashboardPage::default();
    if !page.mount(session) {
        return Err(Smk3Error::ActionFailed);
    }
    if let Some(stats) = &page.stats {
        print_stats(stats);
    }
    print_notifications(&page.notifications);
    Ok(())
}

fn print_stats(stats: &DashboardStats) {
    output::header("Ringkasan Audit");
    println!("  Total klausul:     {}", stats.total_clauses);
    println!(
        "  Sudah diaudit:     {} ({:.1}%)",
        stats.audited_clauses,
        stats.achievement_percentage()
    );
    println!("  Rata-rata skor:    {:.1}", stats.average_score);
    println!(
        "  Sesuai:            {}",
        stats.compliant_clauses.to_string().green()
    );
    println!(
        "  Belum sesuai:      {}",
        stats.non_compliant_clauses.to_string().red()
    );

    if stats.criteria_scores.is_empty() {
        return;
    }
    output::header("Pencapaian per Kriteria");
    for score in &stats.criteria_scores {
        let label = score
            .strength_label
            .clone()
            .unwrap_or_else(|| score.strength.label().to_string());
        let label = match score.strength {
            Strength::Strong => label.green(),
            Strength::Moderate => label.yellow(),
            Strength::Weak => label.red(),
        };
        println!(
            "  {:<45} {:>5.1}%  {:>3}/{:<3} skor {:>5.1}  {}",
            score.name,
            score.achievement_percentage,
            score.audited_clauses,
            score.total_clauses,
            score.average_score,
            label
        );
    }
}

fn print_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        return;
    }
    output::header("Tenggat Rekomendasi");
    for n in notifications {
        let marker = match n.urgency {
            Urgency::Critical => "●".red(),
            Urgency::Warning => "●".yellow(),
        };
        println!(
            "  {marker} {} {}: {} ({} hari lagi, {})",
            n.clause_number,
            n.clause_title,
            n.recommendation,
            n.days_left,
            n.deadline.date_string()
        );
    }
}

fn evidence(session: &Session, config: &AppConfig, scope: &EvidenceScope, save: bool) -> Result<()> {
    let page = DashboardPage::default();
    if !save {
        open_link(&page.evidence_url(session, scope));
        return Ok(());
    }

    let spinner = Spinner::start("Mengunduh evidence...");
    let bytes = page.fetch_evidence(session, scope);
    spinner.finish();
    let bytes = bytes.ok_or(Smk3Error::ActionFailed)?;

    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let path = save_file(
        &config.output.download_dir,
        &scope.archive_name(&stamp),
        &bytes,
    )?;
    output::success(&format!("Evidence disimpan ke {}", path.display()));
    Ok(())
}
