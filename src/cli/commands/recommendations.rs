use colored::Colorize;

use super::{can, done};
use crate::cli::{RecommendationsAction, output};
use crate::core::errors::Result;
use crate::core::models::recommendation::{NewRecommendation, RecommendationStatus, Urgency};
use crate::core::models::timestamp::Timestamp;
use crate::core::models::user::Capability;
use crate::core::services::recommendations_page::{
    RecommendationFilter, RecommendationsPage, notifications,
};
use crate::core::services::session::Session;

/// Execute the `smk3 recommendations` command.
pub fn execute(action: Option<&RecommendationsAction>, session: &mut Session) -> Result<()> {
    let mut page = RecommendationsPage::default();
    match action {
        None => done(page.mount(session, RecommendationFilter::default()))?,
        Some(RecommendationsAction::List { clause, status }) => {
            let filter = RecommendationFilter {
                clause_id: clause.clone(),
                status: *status,
            };
            done(page.mount(session, filter))?;
        }
        Some(RecommendationsAction::Add {
            clause,
            text,
            deadline,
        }) => {
            let new = NewRecommendation {
                clause_id: clause.clone(),
                recommendation_text: text.clone(),
                deadline: deadline.format("%Y-%m-%d").to_string(),
            };
            done(page.create(session, &new))?;
        }
        Some(RecommendationsAction::Status { id, status }) => {
            done(page.update_status(session, id, *status, Timestamp::now()))?;
        }
        Some(RecommendationsAction::Notifications) => {
            show_notifications(session);
            return Ok(());
        }
    }
    render(&page, session);
    Ok(())
}

fn render(page: &RecommendationsPage, session: &Session) {
    output::header("Rekomendasi");
    if page.recommendations.is_empty() {
        println!("  Belum ada rekomendasi.");
    }
    for status in [
        RecommendationStatus::Pending,
        RecommendationStatus::InProgress,
        RecommendationStatus::Completed,
    ] {
        let items = page.by_status(status);
        if items.is_empty() {
            continue;
        }
        println!("\n  {} ({})", status.label().bold(), items.len());
        for rec in items {
            println!(
                "    {}  {}",
                page.clause_label(&rec.clause_id).cyan(),
                rec.id.dimmed()
            );
            println!("      {}", rec.recommendation_text);
            let mut dates = format!("Tenggat: {}", rec.deadline.date_string());
            if let Some(completed) = rec.completed_at {
                dates.push_str(&format!("  Selesai: {}", completed.date_string()));
            }
            println!("      {}", dates.dimmed());
        }
    }
    if can(session, Capability::AddRecommendation) {
        println!(
            "\n  Tambah: smk3 recommendations add --clause <id> --text <teks> --deadline YYYY-MM-DD"
        );
    }
}

fn show_notifications(session: &Session) {
    let items = notifications(session);
    output::header("Tenggat dalam 7 hari");
    if items.is_empty() {
        println!("  Tidak ada rekomendasi yang mendekati tenggat.");
        return;
    }
    for n in items {
        let days = format!("{} hari lagi", n.days_left);
        let days = match n.urgency {
            Urgency::Critical => days.red(),
            Urgency::Warning => days.yellow(),
        };
        println!(
            "  {} {}: {}  {} ({})",
            n.clause_number,
            n.clause_title,
            n.recommendation,
            days,
            n.deadline.date_string()
        );
    }
}
