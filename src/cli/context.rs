use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{Result, Smk3Error};

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global config directory.
/// If `custom` is provided, uses that path; otherwise `<config dir>/smk3`.
pub fn init(custom: Option<&Path>) {
    let dir = custom
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_dir);
    let _ = CONFIG_DIR.set(dir);
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smk3")
}

/// Get the current config directory.
pub fn config_dir() -> &'static Path {
    CONFIG_DIR.get_or_init(default_config_dir).as_path()
}

/// Path of the persisted session token.
pub fn token_path() -> PathBuf {
    config_dir().join("token")
}

/// Reject names that would escape the target directory.
///
/// Server-supplied file names are written under the download directory,
/// so only a bare file name is accepted.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(Smk3Error::Validation {
            detail: format!("Invalid {what} '{name}': must be a plain file name"),
        });
    }
    Ok(())
}
