use colored::Colorize;

use super::{can, done};
use crate::cli::{ClausesAction, output};
use crate::core::errors::{Result, Smk3Error};
use crate::core::models::clause::NewClause;
use crate::core::models::user::Capability;
use crate::core::services::clauses_page::ClausesPage;
use crate::core::services::session::Session;

/// Execute the `smk3 clauses` command.
pub fn execute(action: Option<&ClausesAction>, session: &mut Session) -> Result<()> {
    let mut page = ClausesPage::default();
    match action {
        None => done(page.mount(session, None))?,
        Some(ClausesAction::List { criteria }) => {
            done(page.mount(session, criteria.as_deref()))?;
        }
        Some(ClausesAction::Add {
            criteria,
            number,
            title,
            description,
        }) => {
            let form = NewClause {
                criteria_id: criteria.clone(),
                clause_number: number.clone(),
                title: title.clone(),
                description: description.clone(),
            };
            page.filter = Some(criteria.clone());
            done(page.create(session, &form))?;
        }
        Some(ClausesAction::KnowledgeBase { clause, text, file }) => {
            let text = match (text, file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => {
                    if !path.exists() {
                        return Err(Smk3Error::FileNotFound { path: path.clone() });
                    }
                    std::fs::read_to_string(path)?
                }
                (None, None) => {
                    return Err(Smk3Error::Validation {
                        detail: "Berikan --text atau --file".into(),
                    });
                }
            };
            done(page.update_knowledge_base(session, clause, &text))?;
        }
    }
    render(&page, session);
    Ok(())
}

fn render(page: &ClausesPage, session: &Session) {
    output::header("Klausul");
    let groups = page.grouped();
    if groups.is_empty() {
        println!("  Belum ada kriteria.");
        return;
    }
    for (criteria, clauses) in groups {
        let heading = criteria
            .map(|c| c.name.clone())
            .unwrap_or_else(|| page.filter.clone().unwrap_or_default());
        println!("\n  {}", heading.bold());
        if clauses.is_empty() {
            println!("    {}", "Belum ada klausul".dimmed());
            continue;
        }
        for clause in clauses {
            let kb = if clause.has_knowledge_base() {
                "KB".green()
            } else {
                "KB".dimmed()
            };
            println!(
                "    {:<8} {}  {} {}",
                clause.clause_number,
                clause.title,
                kb,
                clause.id.dimmed()
            );
        }
    }
    if can(session, Capability::EditKnowledgeBase) {
        println!("\n  Ubah knowledge base: smk3 clauses knowledge-base <id> --file <path>");
    }
}
