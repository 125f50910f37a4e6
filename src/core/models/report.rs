use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::core::errors::{Result, Smk3Error};

/// Response of `POST /reports/generate`: a PDF carried as base64 in JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedReport {
    pub filename: String,
    pub content: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    "application/pdf".to_string()
}

impl GeneratedReport {
    /// Decode the payload into the exact bytes the server encoded.
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.content.trim())
            .map_err(|e| Smk3Error::InvalidPayload {
                endpoint: "/reports/generate".into(),
                reason: format!("report content is not valid base64: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_byte_exact() {
        let bytes: Vec<u8> = (0..=255u8).chain(b"%PDF-1.4\n%\xe2\xe3".iter().copied()).collect();
        let report = GeneratedReport {
            filename: "Laporan_Audit_SMK3_20260101_120000.pdf".into(),
            content: STANDARD.encode(&bytes),
            content_type: "application/pdf".into(),
        };
        assert_eq!(report.decode().unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_garbage() {
        let report = GeneratedReport {
            filename: "x.pdf".into(),
            content: "not*base64".into(),
            content_type: "application/pdf".into(),
        };
        assert!(matches!(
            report.decode(),
            Err(Smk3Error::InvalidPayload { .. })
        ));
    }

    #[test]
    fn content_type_defaults_to_pdf() {
        let report: GeneratedReport =
            serde_json::from_str(r#"{"filename":"a.pdf","content":""}"#).unwrap();
        assert_eq!(report.content_type, "application/pdf");
        assert!(report.decode().unwrap().is_empty());
    }
}
