//! Everything the CLI prints on stdout goes through [`OutputManager`].
//!
//! Logs and the progress spinner use stderr; stdout only carries results,
//! so `minibundle list --format json | jq` keeps working.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kind of status line.
#[derive(Debug, Clone, Copy)]
enum Status {
    Done,
    Note,
    Caution,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Self::Done => "\u{2713}",    // ✓
            Self::Note => "\u{2139}",    // ℹ
            Self::Caution => "\u{26a0}", // ⚠
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format`; `auto` picks by terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match (args.output_format, parse_format(&config.output.format)) {
            (OutputFormat::Auto, OutputFormat::Auto) if io::stdout().is_terminal() => {
                OutputFormat::Human
            }
            (OutputFormat::Auto, OutputFormat::Auto) => OutputFormat::Plain,
            (OutputFormat::Auto, configured) => configured,
            (flag, _) => flag,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// A line of text; dropped with `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ msg`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Done, msg)
    }

    /// `ℹ msg`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Note, msg)
    }

    /// `⚠ msg`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Caution, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.color {
            self.print(&text.cyan().bold().to_string())
        } else {
            self.print(text)
        }
    }

    /// Pretty JSON. Printed even with `--quiet`, since it is the result.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Secondary text, dimmed when colours are on.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Whether a spinner may be drawn on stderr.
    pub fn wants_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Human && io::stderr().is_terminal()
    }

    fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        let symbol = status.symbol();
        if !self.color {
            return self.print(&format!("{symbol} {msg}"));
        }
        let line = match status {
            Status::Done => format!("{} {}", symbol.green().bold(), msg.green()),
            Status::Note => format!("{} {}", symbol.blue().bold(), msg),
            Status::Caution => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
        };
        self.print(&line)
    }
}

fn parse_format(s: &str) -> OutputFormat {
    match s.to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}
