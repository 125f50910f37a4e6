use crate::core::models::report::GeneratedReport;
use crate::core::services::session::Session;

/// A decoded report ready to be written to disk.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Ask the backend to build the audit PDF and decode it.
pub fn generate(session: &Session) -> Option<ReportFile> {
    let decoded = session
        .api()
        .post_empty::<GeneratedReport>("/reports/generate")
        .and_then(|report| {
            let bytes = report.decode()?;
            Ok(ReportFile {
                filename: report.filename,
                bytes,
            })
        });
    match decoded {
        Ok(file) => Some(file),
        Err(e) => {
            tracing::warn!(error = %e, "report generation failed");
            session.notifier().error(&e.notice("Gagal membuat laporan"));
            None
        }
    }
}
