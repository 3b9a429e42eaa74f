//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the build pipeline needs from the outside world.
//! The `minibundle-adapters` crate provides implementations.

use std::path::Path;

use crate::error::BundleResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `minibundle_adapters::filesystem::LocalFilesystem` (production)
/// - `minibundle_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Read a whole UTF-8 file.
    ///
    /// Missing files must map to `ApplicationError::FileNotFound`.
    fn read_to_string(&self, path: &Path) -> BundleResult<String>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BundleResult<()>;

    /// Write content to a file, replacing it.
    ///
    /// Implementations must never leave a partially written file behind.
    fn write_file(&self, path: &Path, content: &str) -> BundleResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the external minifier.
///
/// Implemented by:
/// - `minibundle_adapters::minifier::CommandMinifier` (subprocess, e.g. `uglifyjs`)
pub trait Minifier: Send + Sync {
    /// Minify `source`. `file` names the input in error messages.
    fn minify(&self, file: &str, source: &str) -> BundleResult<String>;

    /// Human-readable command line, for logs and errors.
    fn describe(&self) -> String;
}

/// Progress callbacks fired by the build service.
///
/// Every method has an empty default so observers only implement what
/// they display.
pub trait BuildObserver {
    /// A bundle is about to be assembled.
    fn target_started(&self, _name: &str, _sources: usize) {}

    /// One fragment went through the minifier.
    fn fragment_compiled(&self, _title: &str) {}

    /// A bundle was rendered (and written unless this is a dry run).
    fn target_finished(&self, _name: &str, _bytes: usize, _written: bool) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl BuildObserver for SilentObserver {}
