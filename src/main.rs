mod adapters;
mod cli;
mod config;
mod core;

use std::sync::Arc;

use clap::Parser;

use crate::adapters::http::reqwest_transport::ReqwestTransport;
use crate::adapters::token_stores::file_token_store::FileTokenStore;
use crate::cli::Cli;
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, Smk3Error};
use crate::core::services::api_client::ApiClient;
use crate::core::services::session::Session;
use crate::core::traits::notifier::Notifier;

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        if !matches!(e, Smk3Error::ActionFailed) {
            cli::output::error(&format!("Error: {e}"));
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("SMK3_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Cli) -> Result<()> {
    cli::context::init(args.config_dir.as_deref());
    cli::output::set_quiet(args.quiet);

    let config =
        AppConfig::load(cli::context::config_dir())?.with_backend_url(args.backend_url.as_deref())?;
    tracing::debug!(backend = %config.server.backend_url, "configuration loaded");

    let notifier: Arc<dyn Notifier> = Arc::new(cli::output::ConsoleNotifier);
    let transport = ReqwestTransport::new(&config.server.backend_url)?;
    let tokens = FileTokenStore::new(cli::context::token_path());
    tracing::debug!(path = %tokens.path().display(), "token store");
    let api = ApiClient::new(Box::new(transport), Box::new(tokens), notifier.clone());

    let mut session = Session::new(api, notifier);
    session.restore();

    cli::commands::execute(&args.command, &mut session, &config)
}
