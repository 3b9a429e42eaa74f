// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports can be kept after the run)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid target '{name}': {reason}")]
    InvalidTarget { name: String, reason: String },

    #[error("Target '{target}' lists '{source_path}' more than once")]
    DuplicateSource { target: String, source_path: String },

    #[error("Target '{name}' is declared more than once")]
    DuplicateTarget { name: String },

    #[error("Path leaves the source root: {path}")]
    PathOutsideRoot { path: String },

    #[error("Invalid worker configuration: {0}")]
    InvalidWorker(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown target '{name}'")]
    UnknownTarget {
        name: String,
        available: Vec<String>,
    },

    #[error("No targets defined")]
    NoTargets,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTarget { name, reason } => vec![
                format!("Check the definition of target '{}'", name),
                format!("Details: {}", reason),
            ],
            Self::DuplicateSource { target, source_path } => vec![
                format!("Remove the repeated '{}' from '{}'", source_path, target),
            ],
            Self::DuplicateTarget { name } => vec![
                format!("Each [[targets]] entry needs a unique name; '{}' repeats", name),
            ],
            Self::PathOutsideRoot { path } => vec![
                format!("'{}' must be relative and must not use '..'", path),
            ],
            Self::UnknownTarget { available, .. } => {
                let mut out = vec!["Available targets:".to_string()];
                out.extend(available.iter().map(|t| format!("  • {}", t)));
                out.push("Try: minibundle list".into());
                out
            }
            Self::NoTargets => vec![
                "Add at least one [[targets]] entry to minibundle.toml".into(),
                "Or run 'minibundle init' to write the built-in table".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTarget { .. }
            | Self::DuplicateSource { .. }
            | Self::DuplicateTarget { .. }
            | Self::PathOutsideRoot { .. }
            | Self::InvalidWorker(_)
            | Self::UnknownTarget { .. } => ErrorCategory::Validation,
            Self::NoTargets => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
