//! `minibundle init`: write a project manifest.

use std::fs;

use minibundle_adapters::{BUILTIN_MANIFEST, ManifestLoader};

use crate::{
    cli::InitArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the built-in targets to `<root>/minibundle.toml` (or `--manifest`).
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let loader = ManifestLoader::new(args.project.root());
    let path = args
        .project
        .manifest
        .clone()
        .unwrap_or_else(|| loader.default_path());

    if path.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is a directory, not a manifest file", path.display()),
            source: None,
        });
    }
    if path.exists() {
        if !args.force {
            return Err(CliError::ManifestExists { path });
        }
        output.warning(&format!("Overwriting {}", path.display()))?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(&path, BUILTIN_MANIFEST)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;

    output.success(&format!("Wrote {}", path.display()))?;
    Ok(())
}
