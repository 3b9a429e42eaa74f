//! Application layer errors.
//!
//! These errors represent failures while running the pipeline (files, the
//! minifier process), not invalid bundle definitions. Those are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while building bundles.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// An input file (source, template, license, worker driver) is missing.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Any other filesystem failure.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The minifier process could not be started or talked to.
    #[error("Could not run minifier '{command}': {reason}")]
    MinifierSpawn { command: String, reason: String },

    /// The minifier exited unsuccessfully.
    #[error("{command} failed on {file} (exit code: {})", code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    MinifierFailed {
        file: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The minifier succeeded but printed nothing.
    #[error("{command} produced no output for {file}")]
    MinifierEmptyOutput { file: String, command: String },

    /// The minifier printed something that is not UTF-8.
    #[error("{command} produced non UTF-8 output for {file}")]
    MinifierInvalidOutput { file: String, command: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileNotFound { path } => vec![
                format!("Missing: {}", path.display()),
                "Check the [paths] section of minibundle.toml".into(),
                "Sources are resolved against the source root, templates are named after the bundle".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
            ],
            Self::MinifierSpawn { command, .. } => vec![
                format!("Ensure '{}' is installed and in your PATH", command),
                "Pick another one: minibundle build --minifier <program> -- [flags...]".into(),
            ],
            Self::MinifierFailed { file, .. } => vec![
                "The minifier rejected the input".into(),
                format!("Check {} for syntax errors", file),
            ],
            Self::MinifierEmptyOutput { .. } | Self::MinifierInvalidOutput { .. } => vec![
                "The minifier must write the minified source to stdout".into(),
                "Check the flags passed to it".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::MinifierSpawn { .. }
            | Self::MinifierFailed { .. }
            | Self::MinifierEmptyOutput { .. }
            | Self::MinifierInvalidOutput { .. } => ErrorCategory::ExternalTool,
        }
    }
}
