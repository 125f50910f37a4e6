use colored::Colorize;

use super::io_helpers::confirm;
use super::{can, done};
use crate::cli::{CriteriaAction, output};
use crate::core::errors::Result;
use crate::core::models::criteria::NewCriteria;
use crate::core::models::user::Capability;
use crate::core::services::criteria_page::CriteriaPage;
use crate::core::services::session::Session;

/// Execute the `smk3 criteria` command.
pub fn execute(action: Option<&CriteriaAction>, session: &mut Session) -> Result<()> {
    let mut page = CriteriaPage::default();
    match action {
        None | Some(CriteriaAction::List) => {
            done(page.mount(session))?;
        }
        Some(CriteriaAction::Add {
            name,
            description,
            order,
        }) => {
            let form = NewCriteria {
                name: name.clone(),
                description: description.clone(),
                order: *order,
            };
            done(page.create(session, &form))?;
        }
        Some(CriteriaAction::Delete { id, yes }) => {
            if !confirm(&format!("Hapus kriteria {id}?"), *yes)? {
                output::info("Dibatalkan");
                return Ok(());
            }
            done(page.delete(session, id))?;
        }
        Some(CriteriaAction::Seed) => {
            done(page.mount(session))?;
            done(page.seed(session))?;
        }
    }
    render(&page, session);
    Ok(())
}

fn render(page: &CriteriaPage, session: &Session) {
    output::header("Kriteria");
    if page.criteria.is_empty() {
        println!("  Belum ada kriteria.");
        if can(session, Capability::SeedData) {
            println!("  Muat data standar SMK3: smk3 criteria seed");
        }
        return;
    }
    for c in &page.criteria {
        println!("  {:>3}. {}  {}", c.order, c.name.bold(), c.id.dimmed());
        if !c.description.is_empty() {
            println!("       {}", c.description.dimmed());
        }
    }
}
