pub mod commands;
pub mod context;
pub mod layout;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::errors::Result;
use crate::core::models::audit_result::AuditorStatus;
use crate::core::models::recommendation::RecommendationStatus;
use crate::core::models::user::Role;
use crate::core::services::router::Route;

/// Audit workplace safety management (SMK3) from the terminal.
#[derive(Parser, Debug)]
#[command(name = "smk3", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (the API lives under /api)
    #[arg(long, global = true, env = "SMK3_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Directory holding config.toml and the session token
    #[arg(long, global = true, env = "SMK3_HOME")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, register or sign out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Audit progress overview and deadline notifications
    Dashboard {
        #[command(subcommand)]
        action: Option<DashboardAction>,
    },

    /// Manage audit criteria
    Criteria {
        #[command(subcommand)]
        action: Option<CriteriaAction>,
    },

    /// Manage clauses and their knowledge base
    Clauses {
        #[command(subcommand)]
        action: Option<ClausesAction>,
    },

    /// Evidence documents, AI analysis and auditor assessment
    Audit {
        #[command(subcommand)]
        action: Option<AuditAction>,
    },

    /// Remediation recommendations
    Recommendations {
        #[command(subcommand)]
        action: Option<RecommendationsAction>,
    },

    /// Generate the audit report PDF
    Report {
        #[command(subcommand)]
        action: Option<ReportAction>,
    },

    /// Open a page by path (/, /criteria, /clauses, /audit, ...)
    Open {
        /// Page path
        path: String,
    },
}

impl Commands {
    /// The page this command runs on. `None` for session actions that live
    /// in the layout rather than on a page.
    pub fn route(&self) -> Result<Option<Route>> {
        let route = match self {
            Commands::Auth { action } => match action {
                AuthAction::Login { .. } | AuthAction::Register { .. } => Route::Auth,
                AuthAction::Logout | AuthAction::Whoami => return Ok(None),
            },
            Commands::Dashboard { .. } => Route::Dashboard,
            Commands::Criteria { .. } => Route::Criteria,
            Commands::Clauses { .. } => Route::Clauses,
            Commands::Audit { .. } => Route::Audit,
            Commands::Recommendations { .. } => Route::Recommendations,
            Commands::Report { .. } => Route::Reports,
            Commands::Open { path } => Route::from_path(path)?,
        };
        Ok(Some(route))
    }
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Sign in and keep the session token
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "SMK3_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account (does not sign in)
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = Role::Auditee)]
        role: Role,
        #[arg(long, env = "SMK3_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the session token
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum DashboardAction {
    /// Open (or save) the evidence archive
    Evidence {
        /// Only this criteria's evidence
        #[arg(long)]
        criteria: Option<String>,
        /// Download through the client instead of opening the link
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CriteriaAction {
    /// List criteria
    List,
    /// Add a criteria (admin)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0)]
        order: i64,
    },
    /// Delete a criteria (admin)
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Load the standard SMK3 catalogue into an empty backend (admin)
    Seed,
}

#[derive(Subcommand, Debug)]
pub enum ClausesAction {
    /// List clauses grouped by criteria
    List {
        #[arg(long)]
        criteria: Option<String>,
    },
    /// Add a clause (admin)
    Add {
        #[arg(long)]
        criteria: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Replace a clause's knowledge base (admin, auditor)
    KnowledgeBase {
        clause: String,
        /// New text
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Read the new text from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuditAction {
    /// Show a clause's documents and audit result
    Show {
        #[arg(long)]
        criteria: Option<String>,
        #[arg(long)]
        clause: Option<String>,
    },
    /// Upload an evidence document
    Upload {
        #[arg(long)]
        clause: String,
        file: PathBuf,
    },
    /// Delete an evidence document
    DeleteDoc {
        #[arg(long)]
        clause: String,
        document: String,
        #[arg(long)]
        yes: bool,
    },
    /// Preview a PDF or image in the system viewer
    Preview {
        #[arg(long)]
        clause: String,
        document: String,
    },
    /// Download a document into the download directory
    Download {
        #[arg(long)]
        clause: String,
        document: String,
    },
    /// Open the zip of every document of a clause
    DownloadAll {
        #[arg(long)]
        clause: String,
    },
    /// Run the AI analysis (auditor)
    Analyze {
        #[arg(long)]
        clause: String,
    },
    /// Record the auditor's decision (auditor)
    Assess {
        #[arg(long)]
        clause: String,
        #[arg(long, value_enum)]
        status: Option<AuditorStatus>,
        /// Agreed date, YYYY-MM-DD
        #[arg(long)]
        agreed_date: Option<chrono::NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete every document, result and recommendation (admin)
    HardReset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecommendationsAction {
    /// List recommendations
    List {
        #[arg(long)]
        clause: Option<String>,
        #[arg(long, value_enum)]
        status: Option<RecommendationStatus>,
    },
    /// Add a recommendation (auditor)
    Add {
        #[arg(long)]
        clause: String,
        #[arg(long)]
        text: String,
        /// Deadline, YYYY-MM-DD
        #[arg(long)]
        deadline: chrono::NaiveDate,
    },
    /// Change a recommendation's status
    Status {
        id: String,
        #[arg(value_enum)]
        status: RecommendationStatus,
    },
    /// Recommendations due within a week
    Notifications,
}

#[derive(Subcommand, Debug)]
pub enum ReportAction {
    /// Build the PDF and save it into the download directory
    Generate,
}
