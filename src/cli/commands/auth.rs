use colored::Colorize;

use super::done;
use super::io_helpers::password;
use crate::cli::{AuthAction, output};
use crate::core::errors::{Result, Smk3Error};
use crate::core::services::auth_page::{LoginForm, RegisterForm, submit_login, submit_register};
use crate::core::services::session::Session;

/// Execute the `smk3 auth login|register` page actions.
pub fn execute(action: &AuthAction, session: &mut Session) -> Result<()> {
    match action {
        AuthAction::Login { email, password: given } => {
            let form = LoginForm {
                email: email.clone(),
                password: password(given.as_deref())?,
            };
            done(submit_login(session, &form))?;
            if let Some(user) = session.user() {
                output::success(&format!("Masuk sebagai {} ({})", user.name, user.role.label()));
            }
            Ok(())
        }
        AuthAction::Register {
            email,
            name,
            role,
            password: given,
        } => {
            let mut form = RegisterForm {
                email: email.clone(),
                password: password(given.as_deref())?,
                name: name.clone(),
                role: *role,
            };
            done(submit_register(session, &mut form))?;
            println!("\n  Next: smk3 auth login --email {email}");
            Ok(())
        }
        AuthAction::Logout | AuthAction::Whoami => session_action(action, session),
    }
}

/// Layout-level session actions that are not tied to a page.
pub fn session_action(action: &AuthAction, session: &mut Session) -> Result<()> {
    match action {
        AuthAction::Logout => {
            if session.is_authenticated() {
                session.logout();
            } else {
                session.api().clear_token();
                output::info("Tidak ada sesi aktif");
            }
            Ok(())
        }
        AuthAction::Whoami => {
            let user = session.user().ok_or(Smk3Error::NotAuthenticated)?;
            output::header(&user.name);
            println!("  Email: {}", user.email.cyan());
            println!("  Peran: {}", user.role.label().cyan());
            if let Some(created) = user.created_at {
                println!("  Terdaftar: {}", created.date_string());
            }
            Ok(())
        }
        AuthAction::Login { .. } | AuthAction::Register { .. } => Ok(()),
    }
}

/// The auth page without an action.
pub fn show() {
    output::header("Masuk");
    println!("  smk3 auth login --email <email>");
    println!("  smk3 auth register --email <email> --name <nama> [--role auditee|auditor|admin]");
}
