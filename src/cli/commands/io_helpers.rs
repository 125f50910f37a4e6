use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::context::validate_simple_filename;
use crate::cli::output;
use crate::core::errors::Result;

/// Read one trimmed line from stdin after printing `prompt`.
pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("  {prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Use the given password or ask for it on stdin.
pub fn password(given: Option<&str>) -> Result<String> {
    match given {
        Some(password) => Ok(password.to_string()),
        None => prompt_line("Password: "),
    }
}

/// Ask a yes/no question defaulting to no. `assume_yes` skips the prompt.
pub fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let answer = prompt_line(&format!("{question} [y/N]: "))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "ya" | "yes"))
}

/// Write downloaded bytes to `dir/filename`. Only bare file names are
/// accepted.
pub fn save_file(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    validate_simple_filename(filename, "file name")?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "saved download");
    Ok(path)
}

/// Write preview bytes to a temporary file kept after exit and hand it to
/// the system viewer.
pub fn open_preview(filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let suffix = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let mut file = tempfile::Builder::new()
        .prefix("smk3-preview-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    let (_, path) = file.keep().map_err(|e| e.error)?;

    output::info(&format!("Pratinjau: {}", path.display()));
    if let Err(e) = open::that(&path) {
        output::warning(&format!("Tidak dapat membuka penampil: {e}"));
    }
    Ok(path)
}

/// Print a backend link and try to open it in the browser.
pub fn open_link(url: &str) {
    output::info(url);
    if let Err(e) = open::that(url) {
        tracing::warn!(error = %e, url, "could not open browser");
        output::warning("Tidak dapat membuka browser. Buka tautan di atas secara manual.");
    }
}
