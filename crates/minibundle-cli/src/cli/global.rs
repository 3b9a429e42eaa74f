//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so `minibundle list -vv`
//! and `minibundle -vv list` mean the same thing.

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Log verbosity: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "More log output on stderr:
    (none)  - warnings and errors
    -v      - one line per bundle
    -vv     - one line per fragment and minifier run
    -vvv    - everything"
    )]
    pub verbose: u8,

    /// Only errors; summaries and spinners are suppressed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// No ANSI styling. Also set by a non-empty `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable ANSI colours"
    )]
    pub no_color: bool,

    /// Settings file read instead of the per-user one.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE"
    )]
    pub config: Option<PathBuf>,

    /// How results are printed on stdout.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Result format on stdout"
    )]
    pub output_format: OutputFormat,

    /// Copy of the log, without colours, never rotated.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Also write logs to FILE"
    )]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise.
    #[default]
    Auto,
    /// Symbols and colours.
    Human,
    /// Symbols, no colours.
    Plain,
    /// Build report or target list as JSON; logs become JSON lines on stderr.
    Json,
}
