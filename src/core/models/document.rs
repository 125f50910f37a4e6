use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// An evidence file attached to a clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub clause_id: String,
    pub filename: String,
    pub size: u64,
    pub uploaded_at: Timestamp,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
}

impl Document {
    pub fn preview_kind(&self) -> PreviewKind {
        PreviewKind::from_filename(&self.filename)
    }
}

/// Response of `DELETE /documents/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteOutcome {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub remaining_documents: Option<u64>,
    #[serde(default)]
    pub audit_result_deleted: bool,
}

/// How a document can be previewed, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Rendered inline by a PDF viewer.
    Pdf,
    Image,
    /// Only downloadable.
    None,
}

impl PreviewKind {
    const IMAGE_EXTENSIONS: [&'static str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

    pub fn from_filename(filename: &str) -> Self {
        let Some((_, ext)) = filename.rsplit_once('.') else {
            return PreviewKind::None;
        };
        let ext = ext.to_ascii_lowercase();
        if ext == "pdf" {
            PreviewKind::Pdf
        } else if Self::IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            PreviewKind::Image
        } else {
            PreviewKind::None
        }
    }

    pub fn is_previewable(self) -> bool {
        self != PreviewKind::None
    }
}

/// Best-effort MIME type for an upload, from the file extension.
pub fn mime_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Human-readable byte size (`12.3 KB`).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
