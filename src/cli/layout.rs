use colored::Colorize;

use crate::cli::output;
use crate::core::models::user::User;
use crate::core::services::router::Route;

const TITLE: &str = "SMK3 Audit · Sistem Audit K3";

/// Navigation entries with the active page bracketed.
fn nav_entries(active: Route) -> Vec<(String, bool)> {
    Route::NAVIGATION
        .iter()
        .map(|route| {
            let is_active = *route == active;
            let label = if is_active {
                format!("[{}]", route.title())
            } else {
                route.title().to_string()
            };
            (label, is_active)
        })
        .collect()
}

fn user_badge(user: &User) -> String {
    format!("{} ({})", user.name, user.role.label())
}

/// Print the chrome around a protected page: title, navigation and the
/// signed-in user.
pub fn render(active: Route, user: Option<&User>) {
    if output::is_quiet() {
        return;
    }
    println!("{}", TITLE.bold());
    let nav: Vec<String> = nav_entries(active)
        .into_iter()
        .map(|(label, is_active)| {
            if is_active {
                label.cyan().bold().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect();
    println!("  {}", nav.join("  "));
    if let Some(user) = user {
        println!("  {}", user_badge(user).dimmed());
    }
}
