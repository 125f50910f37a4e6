use std::sync::Arc;

use crate::core::errors::{Result, Smk3Error};
use crate::core::models::user::{Capability, Credentials, NewAccount, Role, TokenResponse, User};
use crate::core::services::api_client::ApiClient;
use crate::core::services::router::GuardState;
use crate::core::traits::notifier::Notifier;

/// Single source of truth for authentication state.
///
/// Starts in the loading phase; `restore` resolves it to signed in or
/// signed out. Every page reaches the backend through `api()`.
pub struct Session {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    user: Option<User>,
    loading: bool,
}

impl Session {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            user: None,
            loading: true,
        }
    }

    /// Resume a persisted session: with a stored token, fetch `/auth/me`;
    /// any failure ends the session.
    pub fn restore(&mut self) {
        if self.api.token().is_some() {
            match self.api.get::<User>("/auth/me") {
                Ok(user) => {
                    tracing::debug!(user = %user.email, "session restored");
                    self.user = Some(user);
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        tracing::debug!(error = %e, "stored token rejected");
                    } else {
                        tracing::warn!(error = %e, "could not fetch current user");
                    }
                    self.end(!self.api.redirected_to_auth());
                }
            }
        }
        self.loading = false;
    }

    /// Sign in. Never fails to the caller: problems become a notification
    /// and `false`.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let credentials = Credentials { email, password };
        let outcome = self
            .api
            .post::<_, TokenResponse>("/auth/login", &credentials)
            .and_then(|token| {
                self.api.store_token(&token.access_token)?;
                Ok(token.user)
            });

        match outcome {
            Ok(user) => {
                tracing::debug!(user = %user.email, "logged in");
                self.user = Some(user);
                self.loading = false;
                self.notifier.success("Login berhasil!");
                true
            }
            Err(e) => {
                self.notifier.error(&e.notice("Login gagal"));
                false
            }
        }
    }

    /// Create an account. Registration does not sign in.
    pub fn register(&mut self, email: &str, password: &str, name: &str, role: Role) -> bool {
        let account = NewAccount {
            email,
            password,
            name,
            role,
        };
        match self.api.post::<_, User>("/auth/register", &account) {
            Ok(_) => {
                self.notifier
                    .success("Registrasi berhasil! Silakan login.");
                true
            }
            Err(e) => {
                self.notifier.error(&e.notice("Registrasi gagal"));
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.end(true);
    }

    fn end(&mut self, announce: bool) {
        self.api.clear_token();
        self.user = None;
        self.loading = false;
        if announce {
            self.notifier.info("Anda telah logout");
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn guard_state(&self) -> GuardState {
        match (&self.user, self.loading) {
            (_, true) => GuardState::Loading,
            (Some(_), false) => GuardState::Authenticated,
            (None, false) => GuardState::Unauthenticated,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Role gate for presentation only. Returns the user when the action
    /// is offered to their role.
    pub fn require(&self, capability: Capability) -> Result<&User> {
        let user = self.user.as_ref().ok_or(Smk3Error::NotAuthenticated)?;
        if user.role.allows(capability) {
            Ok(user)
        } else {
            Err(Smk3Error::NotPermitted {
                action: capability.name().to_string(),
                role: user.role.label().to_string(),
            })
        }
    }

    /// `require` that reports a refusal as a notification.
    pub fn offers(&self, capability: Capability) -> bool {
        match self.require(capability) {
            Ok(_) => true,
            Err(e) => {
                self.notifier.error(&e.to_string());
                false
            }
        }
    }
}
