//! `minibundle`: build JavaScript bundles from a target table.
//!
//! Each source is piped through a minifier, given a padded header comment,
//! and substituted into the bundle's wrapper template with the license.
//! Without a subcommand every bundle is built.
//!
//! Startup order matters: `.env` is read before clap so `NO_COLOR` and
//! `MINIBUNDLE_*` from it apply, and logging is up before the config file
//! is read so config problems are logged too.
//!
//! | Exit | Meaning                    |
//! |------|----------------------------|
//! |  0   | success                    |
//! |  1   | internal or I/O failure    |
//! |  2   | bad arguments or targets   |
//! |  3   | an input file is missing   |
//! |  4   | configuration or manifest  |
//! |  5   | minifier missing or failed |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here too, as non-error kinds.
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Flushes the --log-file writer on drop.
    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("minibundle: cannot set up logging: {e:#}");
            return ExitCode::from(1);
        }
    };
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        format = ?cli.global.output_format,
        "Arguments parsed"
    );

    let verbose = cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return report_failure(err, verbose);
        }
    };
    let output = OutputManager::new(&cli.global, &config);

    match run(cli, config, output) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(e, verbose),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        None => commands::build::execute(BuildArgs::default(), config, output),
        Some(Commands::Build(cmd)) => commands::build::execute(cmd, config, output),
        Some(Commands::List(cmd)) => commands::list::execute(cmd, output),
        Some(Commands::Init(cmd)) => commands::init::execute(cmd, output),
        Some(Commands::Completions(cmd)) => commands::completions::execute(cmd),
        Some(Commands::Config(cmd)) => commands::config::execute(cmd, config, output),
    }
}

/// Log the error, print it on stderr, and pick the exit code.
fn report_failure(err: CliError, verbose: bool) -> ExitCode {
    err.log();
    let text = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{text}");
    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
