//! Build Service - main application orchestrator.
//!
//! This service runs the whole pipeline for each selected target:
//! 1. Compile every source (read → rewrite → minify → header)
//! 2. Assemble the worker driver when the bundle holds the kernel
//! 3. Render the wrapper template with deps, worker and license
//! 4. Write the bundle (skipped on dry runs)
//!
//! A bundle is rendered completely in memory before anything is written, so
//! a failure never produces a half-built bundle. Bundles written before the
//! failure stay on disk.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildObserver, Filesystem, Minifier},
    },
    domain::{
        BuildPlan, Fragment, License, RelativePath, RenderContext, Target, WrapperTemplate,
        transforms,
    },
    error::BundleResult,
};

/// Per-run knobs that are not part of the project definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Substituted for `{{YEAR}}` in the license.
    pub year: i32,
    /// Bundle names to build; empty means all.
    pub targets: Vec<String>,
    /// Render without touching the output directory.
    pub dry_run: bool,
}

impl BuildOptions {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            targets: Vec::new(),
            dry_run: false,
        }
    }
}

/// What one compiler step reads.
#[derive(Debug, Clone, Copy)]
pub enum SourceInput<'a> {
    /// A file under the source root; its base name becomes the title.
    File(&'a RelativePath),
    /// In-memory text with an optional title.
    Inline {
        text: &'a str,
        title: Option<&'a str>,
    },
}

/// A fully rendered bundle, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBundle {
    pub name: String,
    pub text: String,
    pub fragments: usize,
}

/// Outcome for one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSummary {
    pub name: String,
    pub output: PathBuf,
    pub bytes: usize,
    pub fragments: usize,
    pub written: bool,
}

/// Outcome of a whole run, in build order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub bundles: Vec<BundleSummary>,
}

impl BuildReport {
    pub fn total_bytes(&self) -> usize {
        self.bundles.iter().map(|b| b.bytes).sum()
    }
}

/// Main build service.
pub struct BuildService {
    filesystem: Box<dyn Filesystem>,
    minifier: Box<dyn Minifier>,
}

impl BuildService {
    /// Create a new build service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, minifier: Box<dyn Minifier>) -> Self {
        Self {
            filesystem,
            minifier,
        }
    }

    /// Build every selected target of `plan`, in table order.
    ///
    /// Stops at the first failure.
    #[instrument(
        skip_all,
        fields(
            root = %plan.layout().root().display(),
            dry_run = options.dry_run,
            minifier = %self.minifier.describe()
        )
    )]
    pub fn build(
        &self,
        plan: &BuildPlan,
        options: &BuildOptions,
        observer: &dyn BuildObserver,
    ) -> BundleResult<BuildReport> {
        let selected = plan.targets().select(options.targets.as_slice())?;
        info!(targets = selected.len(), "Build started");

        if !options.dry_run {
            self.filesystem
                .create_dir_all(&plan.layout().output_dir())?;
        }

        let mut report = BuildReport::default();
        for target in selected {
            report
                .bundles
                .push(self.build_target(plan, target, options, observer)?);
        }

        info!(
            bundles = report.bundles.len(),
            bytes = report.total_bytes(),
            "Build completed"
        );
        Ok(report)
    }

    /// Render one target and write it.
    #[instrument(skip_all, fields(target = %target.name()))]
    pub fn build_target(
        &self,
        plan: &BuildPlan,
        target: &Target,
        options: &BuildOptions,
        observer: &dyn BuildObserver,
    ) -> BundleResult<BundleSummary> {
        observer.target_started(target.name(), target.sources().len());

        let rendered = self.render_target(plan, target, options.year, observer)?;
        let output = plan.layout().output_path(target.name());

        if options.dry_run {
            debug!(output = %output.display(), "Dry run, not writing");
        } else {
            self.filesystem.write_file(&output, &rendered.text)?;
            info!(output = %output.display(), bytes = rendered.text.len(), "Bundle written");
        }

        observer.target_finished(target.name(), rendered.text.len(), !options.dry_run);

        Ok(BundleSummary {
            name: rendered.name,
            output,
            bytes: rendered.text.len(),
            fragments: rendered.fragments,
            written: !options.dry_run,
        })
    }

    /// Compile, assemble and render one target without writing it.
    pub fn render_target(
        &self,
        plan: &BuildPlan,
        target: &Target,
        year: i32,
        observer: &dyn BuildObserver,
    ) -> BundleResult<RenderedBundle> {
        let width = target.header_width(plan.worker());

        let mut fragments = Vec::with_capacity(target.sources().len());
        for source in target.sources() {
            let fragment = self.compile(SourceInput::File(source), plan, target.name(), width)?;
            observer.fragment_compiled(fragment.title().unwrap_or_default());
            fragments.push(fragment);
        }
        let deps = Fragment::concat(&fragments);

        let worker = self.assemble_worker(plan, target, width)?;
        if let Some(w) = &worker {
            observer.fragment_compiled(w.title().unwrap_or_default());
        }

        let text = self.render_bundle(
            plan,
            target.name(),
            &deps,
            &worker.as_ref().map(ToString::to_string).unwrap_or_default(),
            year,
        )?;

        Ok(RenderedBundle {
            name: target.name().to_string(),
            text,
            fragments: fragments.len() + usize::from(worker.is_some()),
        })
    }

    /// The per-file compiler step.
    ///
    /// `bundle` is the bundle being built; the kernel's worker path is
    /// rewritten to point at it.
    pub fn compile(
        &self,
        input: SourceInput<'_>,
        plan: &BuildPlan,
        bundle: &str,
        width: usize,
    ) -> BundleResult<Fragment> {
        let (text, title) = match input {
            SourceInput::File(source) => {
                let path = plan.layout().source_path(source);
                (
                    self.filesystem.read_to_string(&path)?,
                    Some(source.file_name().to_string()),
                )
            }
            SourceInput::Inline { text, title } => (text.to_string(), title.map(str::to_string)),
        };

        let label = title.as_deref().unwrap_or("<inline>");
        let text = match (plan.worker(), title.as_deref()) {
            (Some(worker), Some(t)) if t.contains(worker.kernel_marker()) => {
                transforms::rewrite_worker_path(&text, bundle).into_owned()
            }
            _ => text,
        };

        debug!(file = label, bytes = text.len(), "Minifying");
        let minified = self.minifier.minify(label, &text)?;
        let minified = minified.trim();

        if minified.is_empty() {
            return Err(ApplicationError::MinifierEmptyOutput {
                file: label.to_string(),
                command: self.minifier.describe(),
            }
            .into());
        }

        Ok(Fragment::new(title, width, minified))
    }

    /// Worker driver assembly; `None` when the bundle has no kernel.
    pub fn assemble_worker(
        &self,
        plan: &BuildPlan,
        target: &Target,
        width: usize,
    ) -> BundleResult<Option<Fragment>> {
        let Some(worker) = plan.worker().filter(|_| target.needs_worker(plan.worker())) else {
            return Ok(None);
        };

        let path = plan.layout().source_path(worker.driver());
        let driver = self.filesystem.read_to_string(&path)?;
        let driver = transforms::prepare_worker_driver(&driver);
        debug!(driver = %path.display(), "Worker driver prepared");

        self.compile(
            SourceInput::Inline {
                text: &driver,
                title: Some(worker.title()),
            },
            plan,
            target.name(),
            width,
        )
        .map(Some)
    }

    /// Fill the bundle's wrapper template.
    pub fn render_bundle(
        &self,
        plan: &BuildPlan,
        bundle: &str,
        deps: &str,
        worker: &str,
        year: i32,
    ) -> BundleResult<String> {
        let layout = plan.layout();
        let template = WrapperTemplate::new(
            bundle,
            self.filesystem.read_to_string(&layout.template_path(bundle))?,
        );
        let license = License::from_template(
            &self.filesystem.read_to_string(&layout.license_path())?,
            year,
        );

        let ctx = RenderContext::new()
            .with_variable("DEPS", deps)
            .with_variable("WORKER", worker)
            .with_variable("WORKER_DEPS", "")
            .with_variable("LICENSE", license.for_bundle(bundle, plan.license_policy()));

        Ok(template.render(&ctx))
    }
}
