use super::io_helpers::save_file;
use crate::cli::output::{self, Spinner};
use crate::cli::ReportAction;
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, Smk3Error};
use crate::core::services::reports_page::generate;
use crate::core::services::session::Session;

/// Execute the `smk3 report` command.
pub fn execute(action: Option<&ReportAction>, session: &mut Session, config: &AppConfig) -> Result<()> {
    match action {
        None => {
            output::header("Laporan");
            println!("  Laporan audit SMK3 lengkap dalam format PDF.");
            println!("  Buat dan unduh: smk3 report generate");
            println!(
                "  Disimpan ke: {}",
                config.output.download_dir.display()
            );
            Ok(())
        }
        Some(ReportAction::Generate) => {
            let spinner = Spinner::start("Membuat laporan...");
            let file = generate(session);
            spinner.finish();
            let file = file.ok_or(Smk3Error::ActionFailed)?;

            let path = save_file(&config.output.download_dir, &file.filename, &file.bytes)?;
            session.notifier().success("Laporan berhasil diunduh!");
            output::info(&path.display().to_string());
            Ok(())
        }
    }
}
