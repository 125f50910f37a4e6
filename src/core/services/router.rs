use crate::core::errors::{Result, Smk3Error};

/// Every page of the client and its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Auth,
    Dashboard,
    Criteria,
    Clauses,
    Audit,
    Recommendations,
    Reports,
}

impl Route {
    /// Landing page after login.
    pub const DEFAULT: Route = Route::Dashboard;

    /// Entries of the navigation chrome, in display order.
    pub const NAVIGATION: [Route; 6] = [
        Route::Dashboard,
        Route::Criteria,
        Route::Clauses,
        Route::Audit,
        Route::Recommendations,
        Route::Reports,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Auth => "/auth",
            Route::Dashboard => "/",
            Route::Criteria => "/criteria",
            Route::Clauses => "/clauses",
            Route::Audit => "/audit",
            Route::Recommendations => "/recommendations",
            Route::Reports => "/reports",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Auth => "Masuk",
            Route::Dashboard => "Dashboard",
            Route::Criteria => "Kriteria",
            Route::Clauses => "Klausul",
            Route::Audit => "Audit",
            Route::Recommendations => "Rekomendasi",
            Route::Reports => "Laporan",
        }
    }

    /// Everything but the auth page needs a signed-in user.
    pub fn is_protected(self) -> bool {
        self != Route::Auth
    }

    /// Resolve a path. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Result<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::all()
            .into_iter()
            .find(|r| r.path() == normalized)
            .ok_or_else(|| Smk3Error::UnknownRoute {
                path: trimmed.to_string(),
                known: Self::all().map(Route::path).join(", "),
            })
    }

    fn all() -> [Route; 7] {
        [
            Route::Auth,
            Route::Dashboard,
            Route::Criteria,
            Route::Clauses,
            Route::Audit,
            Route::Recommendations,
            Route::Reports,
        ]
    }
}

/// Authentication state as seen by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// The stored session has not been checked yet.
    Loading,
    Authenticated,
    Unauthenticated,
}

/// What the router does with a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show the loading indicator; nothing else renders yet.
    Loading,
    Render(Route),
    Redirect(Route),
}

/// Route guard: unauthenticated users only reach the auth page,
/// authenticated users never see it.
pub fn guard(route: Route, state: GuardState) -> Navigation {
    match state {
        GuardState::Loading => Navigation::Loading,
        GuardState::Unauthenticated if route.is_protected() => Navigation::Redirect(Route::Auth),
        GuardState::Authenticated if !route.is_protected() => Navigation::Redirect(Route::DEFAULT),
        _ => Navigation::Render(route),
    }
}
