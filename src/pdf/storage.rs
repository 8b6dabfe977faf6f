use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

const FALLBACK_EXTENSION: &str = "pdf";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not create upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not save upload to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Upload directory for drawings received over HTTP.
///
/// Every upload gets its own file, named `<uuid>_<sanitized client name>`,
/// so concurrent requests with the same filename never overwrite each other.
/// Files are left in place after the request.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Write uploaded bytes and return the path they were written to
    pub fn persist(&self, client_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.dir.join(self.artifact_name(client_name));

        fs::write(&path, bytes).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved upload: {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    fn artifact_name(&self, client_name: &str) -> String {
        let id = Uuid::new_v4();
        let sanitized = sanitize_filename(client_name);

        if sanitized.is_empty() {
            format!("{}.{}", id, FALLBACK_EXTENSION)
        } else {
            format!("{}_{}", id, sanitized)
        }
    }
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Path separators and whitespace runs become `_`, accents are folded
/// to ASCII, anything outside `[A-Za-z0-9_.-]` is dropped and leading or
/// trailing dots/underscores are stripped. May return an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let flattened = ascii.replace(['/', '\\'], " ");

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}
