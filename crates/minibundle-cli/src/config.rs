//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `MINIBUNDLE_<SECTION>__<KEY>`, e.g.
//!    `MINIBUNDLE_MINIFIER__PROGRAM=esbuild`,
//!    `MINIBUNDLE_MINIFIER__ARGS="--minify --target=es5"`
//! 3. Config file (`--config`, or [`AppConfig::config_path`] if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use minibundle_adapters::minifier::{DEFAULT_ARGS, DEFAULT_PROGRAM};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "MINIBUNDLE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// External minifier command.
    pub minifier: MinifierConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifierConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            minifier: MinifierConfig {
                program: DEFAULT_PROGRAM.into(),
                args: DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is read when present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(config_file: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to seed default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let env = env
            .prefix_separator("_")
            .separator("__")
            .list_separator(" ")
            .with_list_parse_key("minifier.args")
            .try_parsing(true);

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.minibundle.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "minibundle")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".minibundle.toml"))
    }

    /// Look up one dotted key, as printed by `config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "minifier.program" => Some(self.minifier.program.clone()),
            "minifier.args" => Some(self.minifier.args.join(" ")),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            _ => None,
        }
    }

    /// Every key understood by [`Self::get`].
    pub const KEYS: &'static [&'static str] = &[
        "minifier.program",
        "minifier.args",
        "output.no_color",
        "output.format",
    ];

    /// Full minifier command line, program first.
    pub fn minifier_command(&self) -> Vec<String> {
        std::iter::once(self.minifier.program.clone())
            .chain(self.minifier.args.iter().cloned())
            .collect()
    }
}
