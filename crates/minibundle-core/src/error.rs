//! Top-level error for the core crate.
//!
//! `BundleError` is what every port and service returns. It keeps the layer a
//! failure came from (domain validation or a build step) and adds the two
//! kinds that belong to neither: bad configuration and bugs.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BundleError {
    /// A target table, target, or path failed validation.
    #[error("Invalid bundle definition: {0}")]
    Domain(#[from] DomainError),

    /// A file or minifier step failed while building.
    #[error("Build error: {0}")]
    Application(#[from] ApplicationError),

    /// Manifest or settings could not be used.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl BundleError {
    /// Hints shown under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Fix: {message}"),
                "Check minibundle.toml and the minibundle config file".into(),
            ],
            Self::Internal { .. } => vec!["Please report this with the -vv log attached".into()],
        }
    }

    /// Coarse kind, used by the CLI for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// The external minifier could not run or failed.
    ExternalTool,
    Internal,
}

pub type BundleResult<T> = Result<T, BundleError>;
