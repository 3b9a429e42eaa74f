//! `minibundle list`: show the target table.

use serde::Serialize;

use minibundle_adapters::ManifestLoader;
use minibundle_core::domain::BuildPlan;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

/// One row of the listing, also the JSON shape.
#[derive(Debug, Serialize)]
struct TargetRow {
    name: String,
    output: String,
    sources: Vec<String>,
    worker: bool,
}

fn rows(plan: &BuildPlan) -> Vec<TargetRow> {
    plan.targets()
        .iter()
        .map(|t| TargetRow {
            name: t.name().to_string(),
            output: plan.layout().output_path(t.name()).display().to_string(),
            sources: t.sources().iter().map(ToString::to_string).collect(),
            worker: t.needs_worker(plan.worker()),
        })
        .collect()
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let (plan, source) = ManifestLoader::new(args.project.root())
        .with_manifest(args.project.manifest.clone())
        .load_plan()?;
    let rows = rows(&plan);

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Bundles ({source}):"))?;
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for row in &rows {
                let worker = if row.worker { " + worker" } else { "" };
                output.print(&format!(
                    "  {:<width$}  {} {}",
                    row.name,
                    output.dim(&format!("{} sources{worker}", row.sources.len())),
                    output.dim(&format!("-> {}", row.output)),
                ))?;
                for src in &row.sources {
                    output.print(&format!("  {:<width$}    {src}", ""))?;
                }
            }
        }
        ListFormat::List => {
            for row in &rows {
                output.print(&row.name)?;
            }
        }
        ListFormat::Json => output.json(&rows)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rows_mark_only_arbor_with_worker() {
        let plan = minibundle_adapters::builtin_manifest()
            .unwrap()
            .into_plan("proj")
            .unwrap();
        let rows = rows(&plan);

        let flags: Vec<_> = rows.iter().map(|r| (r.name.as_str(), r.worker)).collect();
        assert_eq!(
            flags,
            [
                ("arbor.js", true),
                ("arbor-tween.js", false),
                ("arbor-graphics.js", false)
            ]
        );
        assert!(rows[0].output.ends_with("arbor.js"));
        assert_eq!(
            rows[1].sources,
            ["etc.js", "graphics/colors.js", "tween/easing.js", "tween/tween.js"]
        );
    }
}
