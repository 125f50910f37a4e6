use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, Smk3Error};
use crate::core::traits::token_store::TokenStore;

/// Token store keeping the bearer token in a single file.
///
/// The parent directory is created `0700` and the file written `0600` on
/// Unix.
#[derive(Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| Smk3Error::TokenStore {
            detail: format!("read {}: {e}", self.path.display()),
        })?;
        let token = content.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Smk3Error::TokenStore {
                detail: format!("mkdir {}: {e}", parent.display()),
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(error) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700))
                {
                    tracing::warn!(%error, "failed to chmod 0700 {}", parent.display());
                }
            }
        }

        fs::write(&self.path, token).map_err(|e| Smk3Error::TokenStore {
            detail: format!("write {}: {e}", self.path.display()),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                Smk3Error::TokenStore {
                    detail: format!("chmod {}: {e}", self.path.display()),
                }
            })?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| Smk3Error::TokenStore {
                detail: format!("delete {}: {e}", self.path.display()),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileTokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("smk3").join("token"));
        (dir, store)
    }

    #[test]
    fn missing_file_means_no_token() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let (_dir, store) = temp_store();
        store.save("eyJhbGciOiJIUzI1NiJ9.test").unwrap();
        assert_eq!(
            store.load().unwrap().as_deref(),
            Some("eyJhbGciOiJIUzI1NiJ9.test")
        );
    }

    #[test]
    fn blank_file_means_no_token() {
        let (_dir, store) = temp_store();
        store.save("  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clear_removes_and_is_idempotent() {
        let (_dir, store) = temp_store();
        store.save("tok").unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        store.save("tok").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
