//! Command line surface of `minibundle`, declared with clap derive.
//!
//! Flag names, aliases and help strings live here and nowhere else; the
//! `commands` modules receive the parsed structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(
    name    = "minibundle",
    bin_name = "minibundle",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Concatenate, minify and wrap JavaScript sources into bundles",
    long_about = "minibundle builds one file per bundle: every source is piped \
                  through a minifier, prefixed with a header comment, and \
                  substituted into the bundle's wrapper template together with \
                  the license. Running it without a subcommand builds everything.",
    after_help = "EXAMPLES:\n\
        \x20 minibundle\n\
        \x20 minibundle build -t arbor.js --dry-run\n\
        \x20 minibundle build -- --beautify\n\
        \x20 minibundle build --minifier esbuild -- --minify\n\
        \x20 minibundle list --format json\n\
        \x20 minibundle completions bash > /usr/share/bash-completion/completions/minibundle",
)]
pub struct Cli {
    /// `-v`, `-q`, `--config` and friends, accepted after any subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; `build` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// What to do; `Build` when no subcommand is given.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build bundles.
    #[command(
        visible_alias = "b",
        about = "Build bundles (default)",
        after_help = "EXAMPLES:\n\
            \x20 minibundle build\n\
            \x20 minibundle build -C path/to/project --target arbor.js\n\
            \x20 minibundle build --year 2012 -- --compress"
    )]
    Build(BuildArgs),

    /// List the target table.
    #[command(
        visible_alias = "ls",
        about = "List bundles and their sources",
        after_help = "EXAMPLES:\n\
            \x20 minibundle list\n\
            \x20 minibundle list --format list\n\
            \x20 minibundle list --format json"
    )]
    List(ListArgs),

    /// Write a project manifest.
    #[command(
        about = "Write minibundle.toml with the built-in targets",
        after_help = "EXAMPLES:\n\
            \x20 minibundle init\n\
            \x20 minibundle init -C path/to/project --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 minibundle completions bash > ~/.local/share/bash-completion/completions/minibundle\n\
            \x20 minibundle completions zsh  > ~/.zfunc/_minibundle\n\
            \x20 minibundle completions fish > ~/.config/fish/completions/minibundle.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 minibundle config get minifier.program\n\
            \x20 minibundle config list\n\
            \x20 minibundle config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where the project lives.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArgs {
    /// Project root.
    #[arg(
        short = 'C',
        long = "root",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub root: Option<PathBuf>,

    /// Manifest file.
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        help = "Manifest file (default: <root>/minibundle.toml, else built-in targets)"
    )]
    pub manifest: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `minibundle build`.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Restrict the build to these bundles.
    #[arg(
        short = 't',
        long = "target",
        value_name = "NAME",
        help = "Only build this bundle (repeatable)"
    )]
    pub targets: Vec<String>,

    /// Render without writing.
    #[arg(long = "dry-run", help = "Render bundles without writing them")]
    pub dry_run: bool,

    /// Year for the license header.
    #[arg(
        long = "year",
        value_name = "YEAR",
        help = "License year (default: current year)"
    )]
    pub year: Option<i32>,

    /// Minifier executable; replaces `minifier.program`.
    #[arg(
        long = "minifier",
        value_name = "PROGRAM",
        help = "Run PROGRAM instead of the configured minifier (flags come only from after --)"
    )]
    pub program: Option<String>,

    /// Minifier flags; replace `minifier.args`.
    #[arg(
        last = true,
        value_name = "FLAGS",
        help = "Minifier flags (default: --compress --mangle)"
    )]
    pub minifier_args: Vec<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `minibundle list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "table, list or json"
    )]
    pub format: ListFormat,
}

/// How `minibundle list` prints the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Name, output path and sources per bundle.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `minibundle init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Overwrite an existing manifest.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing manifest")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `minibundle completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell whose completion syntax to emit.
    #[arg(value_enum, help = "bash, zsh, fish, powershell or elvish")]
    pub shell: Shell,
}

/// Shells `clap_complete` can target.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `minibundle config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one setting after layering.
    Get {
        /// Dotted key path, e.g. `minifier.program`.
        key: String,
    },
    /// Print every setting as TOML.
    List,
    /// Print where the per-user settings file is looked for.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
