use std::path::PathBuf;

/// All domain errors for the SMK3 client.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum Smk3Error {
    #[error(
        "Cannot reach the SMK3 backend: {reason}\n\n  \
         Check that the server is running and that the backend URL is right.\n  \
         Override it with --backend-url or SMK3_BACKEND_URL."
    )]
    Transport { reason: String },

    #[error("Unauthorized{}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Unauthorized { detail: Option<String> },

    #[error("Request rejected ({status}){}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Rejected { status: u16, detail: Option<String> },

    #[error("Server error ({status})")]
    Server { status: u16, detail: Option<String> },

    #[error(
        "Not logged in\n\n  \
         Sign in first: smk3 auth login --email <email>"
    )]
    NotAuthenticated,

    #[error("Action '{action}' is not available for role {role}")]
    NotPermitted { action: String, role: String },

    #[error("{detail}")]
    Validation { detail: String },

    #[error(
        "Unknown page '{path}'\n\n  \
         Known pages: {known}"
    )]
    UnknownRoute { path: String, known: String },

    #[error("Unexpected response from {endpoint}: {reason}")]
    InvalidPayload { endpoint: String, reason: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Token store error: {detail}")]
    TokenStore { detail: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The failure was already shown to the user as a notification.
    #[error("action failed")]
    ActionFailed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Smk3Error {
    /// Message shown in a notification for a failed backend call.
    ///
    /// Client errors surface the server's `detail`; transport failures and
    /// 5xx responses fall back to the page's generic message.
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            Smk3Error::Unauthorized {
                detail: Some(detail),
            }
            | Smk3Error::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Smk3Error::Validation { detail } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether this error came back from the backend as a 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Smk3Error::Unauthorized { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Smk3Error>;
