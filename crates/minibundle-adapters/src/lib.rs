//! Infrastructure adapters for minibundle.
//!
//! This crate implements the ports defined in `minibundle-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_targets;
pub mod filesystem;
pub mod manifest_loader;
pub mod minifier;

// Re-export commonly used adapters
pub use builtin_targets::{BUILTIN_MANIFEST, builtin_manifest};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest_loader::{MANIFEST_FILE, Manifest, ManifestError, ManifestLoader, ManifestSource};
pub use minifier::CommandMinifier;
