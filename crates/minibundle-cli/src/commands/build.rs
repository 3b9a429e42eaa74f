//! `minibundle build`: assemble the selected bundles.

use chrono::Datelike;
use tracing::{info, instrument};

use minibundle_adapters::{CommandMinifier, LocalFilesystem, ManifestLoader};
use minibundle_core::application::{BuildOptions, BuildReport, BuildService};

use crate::{
    cli::{BuildArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    progress::SpinnerObserver,
};

#[instrument(skip_all, fields(root = %args.project.root().display()))]
pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let loader = ManifestLoader::new(args.project.root()).with_manifest(args.project.manifest.clone());
    let (plan, source) = loader.load_plan()?;
    info!(manifest = %source, targets = plan.targets().len(), "Loaded build plan");

    let minifier = resolve_minifier(&args, &config)?;
    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());

    let options = BuildOptions {
        year,
        targets: args.targets,
        dry_run: args.dry_run,
    };

    let service = BuildService::new(Box::new(LocalFilesystem::new()), Box::new(minifier));
    let observer = SpinnerObserver::new(output.wants_progress());
    let result = service.build(&plan, &options, &observer);
    observer.finish();
    let report = result?;

    report_outcome(&report, options.dry_run, &output)
}

/// Words after `--` replace the configured flags and keep the configured
/// program. `--minifier` swaps the program; the configured flags belong to
/// the configured program, so they are dropped with it.
fn resolve_minifier(args: &BuildArgs, config: &AppConfig) -> CliResult<CommandMinifier> {
    let words = match (&args.program, args.minifier_args.is_empty()) {
        (Some(program), _) => std::iter::once(program.clone())
            .chain(args.minifier_args.iter().cloned())
            .collect(),
        (None, true) => config.minifier_command(),
        (None, false) => std::iter::once(config.minifier.program.clone())
            .chain(args.minifier_args.iter().cloned())
            .collect(),
    };
    Ok(CommandMinifier::from_command_line(words)?)
}

fn report_outcome(report: &BuildReport, dry_run: bool, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(report)?;
        return Ok(());
    }

    for bundle in &report.bundles {
        let detail = output.dim(&format!(
            "({} fragments, {} bytes)",
            bundle.fragments, bundle.bytes
        ));
        if bundle.written {
            output.success(&format!("{} {detail}", bundle.output.display()))?;
        } else {
            output.info(&format!("{} {detail}", bundle.name))?;
        }
    }

    let count = report.bundles.len();
    let noun = if count == 1 { "bundle" } else { "bundles" };
    if dry_run {
        output.print(&format!(
            "Dry run: {count} {noun} rendered, {} bytes, nothing written",
            report.total_bytes()
        ))?;
    } else {
        output.print(&format!(
            "Built {count} {noun}, {} bytes",
            report.total_bytes()
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_words_replace_flags_only() {
        let args = BuildArgs {
            minifier_args: vec!["--beautify".into()],
            ..BuildArgs::default()
        };
        let m = resolve_minifier(&args, &AppConfig::default()).unwrap();
        assert_eq!(m.program(), "uglifyjs");
        assert_eq!(m.args(), ["--beautify"]);
    }

    #[test]
    fn trailing_flags_keep_configured_program() {
        let mut config = AppConfig::default();
        config.minifier.program = "terser".into();
        let args = BuildArgs {
            minifier_args: vec!["-c".into(), "-m".into()],
            ..BuildArgs::default()
        };
        let m = resolve_minifier(&args, &config).unwrap();
        assert_eq!(m.program(), "terser");
        assert_eq!(m.args(), ["-c", "-m"]);
    }

    #[test]
    fn minifier_flag_swaps_program_and_drops_configured_flags() {
        let args = BuildArgs {
            program: Some("esbuild".into()),
            ..BuildArgs::default()
        };
        let m = resolve_minifier(&args, &AppConfig::default()).unwrap();
        assert_eq!(m.program(), "esbuild");
        assert!(m.args().is_empty());

        let args = BuildArgs {
            program: Some("esbuild".into()),
            minifier_args: vec!["--minify".into()],
            ..BuildArgs::default()
        };
        let m = resolve_minifier(&args, &AppConfig::default()).unwrap();
        assert_eq!(m.args(), ["--minify"]);
    }

    #[test]
    fn config_minifier_is_the_fallback() {
        let m = resolve_minifier(&BuildArgs::default(), &AppConfig::default()).unwrap();
        assert_eq!(m.program(), "uglifyjs");
        assert_eq!(m.args(), ["--compress", "--mangle"]);
    }

    #[test]
    fn empty_configured_program_is_a_config_error() {
        let mut config = AppConfig::default();
        config.minifier.program.clear();
        config.minifier.args.clear();
        let err = resolve_minifier(&BuildArgs::default(), &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
