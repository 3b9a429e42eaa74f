//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use minibundle_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{BundleError, BundleResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Writes land in a sibling temporary file first and are renamed into place,
/// so readers never observe a truncated bundle.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> BundleResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn create_dir_all(&self, path: &Path) -> BundleResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> BundleResult<()> {
        let tmp = temp_sibling(path);
        trace!(tmp = %tmp.display(), "Writing temporary file");

        let result = std::fs::write(&tmp, content)
            .map_err(|e| map_io_error(&tmp, e, "write file"))
            .and_then(|()| {
                std::fs::rename(&tmp, path).map_err(|e| map_io_error(path, e, "replace file"))
            });
        // Either step can leave the temp file behind.
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp);
        }
        result
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// `lib/arbor.js` → `lib/.arbor.js.<pid>.tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> BundleError {
    match e.kind() {
        io::ErrorKind::NotFound if operation == "read file" => ApplicationError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into(),
        _ => ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to {}: {}", operation, e),
        }
        .into(),
    }
}
