//! Errors as the user sees them.
//!
//! Every failure ends up as a [`CliError`], which knows its exit code, a
//! few hints worth printing, and how to render itself for a terminal or a
//! pipe.

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use minibundle_core::error::BundleError;

pub use minibundle_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// `init` would overwrite an existing manifest.
    #[error("Manifest already exists at {}", path.display())]
    ManifestExists { path: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration value could not be read or serialised.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `minibundle-core` or its adapters.
    #[error("{0}")]
    Core(#[from] BundleError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::ManifestExists { path } => vec![
                format!("'{}' is already there", path.display()),
                "Use --force to overwrite it".into(),
                "Edit the existing manifest instead".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'minibundle config list' to see the effective values".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    /// Category used for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::ManifestExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::ExternalTool => ErrorCategory::ExternalTool,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | External tool |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::ExternalTool => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Coloured report for a terminal.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same report without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color {
                style(text)
            } else {
                text.to_owned()
            }
        };
        let mut out = String::new();

        let heading = paint("Error:", |t| t.red().bold().to_string());
        let message = paint(&self.to_string(), |t| t.red().to_string());
        let _ = writeln!(out, "\n{heading} {message}");

        // The minifier's own diagnostics, verbatim.
        if let Some(stderr) = self.tool_output() {
            out.push('\n');
            let gutter = paint("|", |t| t.dimmed().to_string());
            for line in stderr.lines() {
                let _ = writeln!(out, "  {gutter} {line}");
            }
        }

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let cause_text = paint(&err.to_string(), |t| t.dimmed().to_string());
                let _ = writeln!(out, "  caused by: {cause_text}");
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let title = paint("Suggestions:", |t| t.yellow().bold().to_string());
            let _ = writeln!(out, "\n{title}");
            for hint in &suggestions {
                let _ = writeln!(out, "  {hint}");
            }
        }

        if !verbose {
            let hint = paint("Run with -v for more detail.", |t| t.dimmed().to_string());
            let _ = writeln!(out, "\n{hint}");
        }

        out
    }

    /// Record the failure in the log; user mistakes only warn.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, "{self}");
            }
            _ => tracing::error!(?category, "{self}"),
        }
        let mut cause = self.source();
        while let Some(err) = cause {
            tracing::debug!("caused by: {err}");
            cause = err.source();
        }
    }

    /// Captured stderr of a failed minifier run, if any.
    fn tool_output(&self) -> Option<&str> {
        use minibundle_core::application::ApplicationError;

        match self {
            Self::Core(BundleError::Application(ApplicationError::MinifierFailed {
                stderr, ..
            })) if !stderr.is_empty() => Some(stderr.as_str()),
            _ => None,
        }
    }
}

/// Decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flags, unknown target names, an existing manifest.
    UserError,
    /// A source, template or license file is missing.
    NotFound,
    /// Settings file, environment or `minibundle.toml`.
    Configuration,
    /// The external minifier could not run or failed.
    ExternalTool,
    /// I/O failures and anything unexpected.
    Internal,
}

/// `.with_cli_context(|| "...")` for I/O results in command code.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
