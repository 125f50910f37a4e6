pub mod audit;
pub mod auth;
pub mod clauses;
pub mod criteria;
pub mod dashboard;
pub mod io_helpers;
pub mod recommendations;
pub mod report;

use crate::cli::{Commands, layout, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, Smk3Error};
use crate::core::models::user::Capability;
use crate::core::services::router::{Navigation, Route, guard};
use crate::core::services::session::Session;

/// Run one command as a page load: guard the route, draw the layout, then
/// let the page handle the action.
pub fn execute(command: &Commands, session: &mut Session, config: &AppConfig) -> Result<()> {
    let Some(route) = command.route()? else {
        return match command {
            Commands::Auth { action } => auth::session_action(action, session),
            _ => Ok(()),
        };
    };

    match guard(route, session.guard_state()) {
        Navigation::Loading => {
            output::info("Memuat...");
            Ok(())
        }
        Navigation::Redirect(Route::Auth) => Err(Smk3Error::NotAuthenticated),
        Navigation::Redirect(target) => {
            let name = session.user().map(|u| u.name.as_str()).unwrap_or_default();
            output::info(&format!("Sudah login sebagai {name}"));
            layout::render(target, session.user());
            show(target, session, config)
        }
        Navigation::Render(route) => {
            if route.is_protected() {
                layout::render(route, session.user());
            }
            match command {
                Commands::Auth { action } => auth::execute(action, session),
                Commands::Dashboard { action } => dashboard::execute(action.as_ref(), session, config),
                Commands::Criteria { action } => criteria::execute(action.as_ref(), session),
                Commands::Clauses { action } => clauses::execute(action.as_ref(), session),
                Commands::Audit { action } => audit::execute(action.as_ref(), session, config),
                Commands::Recommendations { action } => {
                    recommendations::execute(action.as_ref(), session)
                }
                Commands::Report { action } => report::execute(action.as_ref(), session, config),
                Commands::Open { .. } => show(route, session, config),
            }
        }
    }
}

/// The default view of a page, what opening it without an action shows.
fn show(route: Route, session: &mut Session, config: &AppConfig) -> Result<()> {
    match route {
        Route::Auth => {
            auth::show();
            Ok(())
        }
        Route::Dashboard => dashboard::execute(None, session, config),
        Route::Criteria => criteria::execute(None, session),
        Route::Clauses => clauses::execute(None, session),
        Route::Audit => audit::execute(None, session, config),
        Route::Recommendations => recommendations::execute(None, session),
        Route::Reports => report::execute(None, session, config),
    }
}

/// Whether the signed-in user's role is offered an action, without
/// notifying a refusal. Used to decide which hints to print.
pub(crate) fn can(session: &Session, capability: Capability) -> bool {
    session.user().is_some_and(|u| u.role.allows(capability))
}

/// Map a controller outcome to the command result. The controller has
/// already notified the failure.
pub(crate) fn done(ok: bool) -> Result<()> {
    if ok { Ok(()) } else { Err(Smk3Error::ActionFailed) }
}
