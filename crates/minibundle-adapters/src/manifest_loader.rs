//! Project manifest loading.
//!
//! Parses `minibundle.toml` into a domain [`BuildPlan`].
//!
//! # `minibundle.toml` format
//!
//! ```toml
//! [paths]                      # optional, these are the defaults
//! src       = "src"
//! templates = "build/tmpl"
//! license   = "build/tmpl/LICENSE"
//! output    = "lib"
//!
//! [worker]                     # optional; omit to disable worker assembly
//! kernel = "kernel.js"         # bundles listing this file get the worker
//! driver = "physics/worker.js" # relative to src
//! title  = "worker.js"
//!
//! [license]                    # optional; omit to never filter
//! exclude_marker = "springy.js"
//! exclude_for    = ["graphics", "tween"]
//!
//! [[targets]]                  # at least one, built in this order
//! name    = "arbor.js"
//! sources = ["etc.js", "kernel.js"]
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use minibundle_core::{
    application::ApplicationError,
    domain::{BuildPlan, LicensePolicy, ProjectLayout, Target, TargetTable, WorkerSpec},
    error::{BundleError, BundleResult},
};

use crate::builtin_targets::builtin_manifest;

/// File name looked up at the project root.
pub const MANIFEST_FILE: &str = "minibundle.toml";

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<ManifestError> for BundleError {
    fn from(e: ManifestError) -> Self {
        match e {
            ManifestError::NotFound { path } => ApplicationError::FileNotFound { path }.into(),
            ManifestError::Read { path, source } => ApplicationError::FilesystemError {
                path,
                reason: source.to_string(),
            }
            .into(),
            other => BundleError::Configuration {
                message: other.to_string(),
            },
        }
    }
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of `minibundle.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseSection>,
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
}

/// `[paths]`, all relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    pub src: PathBuf,
    pub templates: PathBuf,
    pub license: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            src: "src".into(),
            templates: "build/tmpl".into(),
            license: "build/tmpl/LICENSE".into(),
            output: "lib".into(),
        }
    }
}

/// `[worker]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkerSection {
    pub kernel: String,
    pub driver: String,
    #[serde(default = "default_worker_title")]
    pub title: String,
}

fn default_worker_title() -> String {
    "worker.js".into()
}

/// `[license]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseSection {
    pub exclude_marker: String,
    #[serde(default)]
    pub exclude_for: Vec<String>,
}

/// One `[[targets]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetEntry {
    pub name: String,
    pub sources: Vec<String>,
}

impl Manifest {
    pub fn from_toml_str(raw: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ManifestError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ManifestError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_toml_str(&raw)
    }

    /// Validate and convert into a plan rooted at `root`.
    pub fn into_plan(self, root: impl Into<PathBuf>) -> BundleResult<BuildPlan> {
        let targets = self
            .targets
            .into_iter()
            .map(|t| Target::new(t.name, t.sources))
            .collect::<Result<Vec<_>, _>>()?;

        let layout = ProjectLayout::new(root)
            .with_sources(self.paths.src)
            .with_templates(self.paths.templates)
            .with_license(self.paths.license)
            .with_output(self.paths.output);

        let mut plan = BuildPlan::new(layout, TargetTable::new(targets)?);
        if let Some(w) = self.worker {
            plan = plan.with_worker(WorkerSpec::new(w.kernel, w.driver, w.title)?);
        }
        if let Some(l) = self.license {
            plan = plan.with_license_policy(LicensePolicy::new(l.exclude_marker, l.exclude_for));
        }
        Ok(plan)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Where the manifest in use came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Builtin => f.write_str("<built-in>"),
        }
    }
}

/// Resolves the manifest for a project root.
///
/// An explicit path must exist. Otherwise `<root>/minibundle.toml` is used
/// when present, and the built-in manifest when not.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    root: PathBuf,
    explicit: Option<PathBuf>,
}

impl ManifestLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            explicit: None,
        }
    }

    /// Use this file instead of looking under the root.
    pub fn with_manifest(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/minibundle.toml`
    pub fn default_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self) -> BundleResult<(Manifest, ManifestSource)> {
        if let Some(path) = &self.explicit {
            debug!(manifest = %path.display(), "Loading explicit manifest");
            return Ok((Manifest::load(path)?, ManifestSource::File(path.clone())));
        }

        let path = self.default_path();
        if path.is_file() {
            debug!(manifest = %path.display(), "Loading project manifest");
            return Ok((Manifest::load(&path)?, ManifestSource::File(path)));
        }

        debug!("No project manifest, using built-in targets");
        Ok((builtin_manifest()?, ManifestSource::Builtin))
    }

    /// Load and convert into a plan rooted at the loader's root.
    pub fn load_plan(&self) -> BundleResult<(BuildPlan, ManifestSource)> {
        let (manifest, source) = self.load()?;
        Ok((manifest.into_plan(self.root.clone())?, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minibundle_core::domain::DomainError;
    use tempfile::TempDir;

    #[test]
    fn minimal_manifest_uses_default_paths() {
        let manifest = Manifest::from_toml_str(
            r#"
            [[targets]]
            name = "app.js"
            sources = ["a.js"]
            "#,
        )
        .unwrap();

        assert_eq!(manifest.paths, PathsSection::default());
        assert!(manifest.worker.is_none());

        let plan = manifest.into_plan("/proj").unwrap();
        assert!(plan.worker().is_none());
        assert!(!plan.license_policy().applies_to("app-graphics.js"));
    }

    #[test]
    fn missing_targets_is_an_error() {
        let manifest = Manifest::from_toml_str("[paths]\nsrc = \"js\"\n").unwrap();
        let err = manifest.into_plan(".").unwrap_err();
        assert_eq!(err, BundleError::Domain(DomainError::NoTargets));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Manifest::from_toml_str("[paths]\nsource = \"js\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(matches!(
            BundleError::from(err),
            BundleError::Configuration { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_source_is_rejected() {
        let manifest = Manifest::from_toml_str(
            "[[targets]]\nname = \"a.js\"\nsources = [\"/etc/passwd\"]\n",
        )
        .unwrap();
        let err = manifest.into_plan(".").unwrap_err();
        assert!(matches!(
            err,
            BundleError::Domain(DomainError::PathOutsideRoot { .. })
        ));
    }

    #[test]
    fn serialises_back_to_equivalent_toml() {
        let manifest = builtin_manifest().unwrap();
        let text = manifest.to_toml_string().unwrap();
        assert_eq!(Manifest::from_toml_str(&text).unwrap(), manifest);
    }

    #[test]
    fn loader_prefers_project_manifest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[[targets]]\nname = \"only.js\"\nsources = [\"a.js\"]\n",
        )
        .unwrap();

        let (plan, source) = ManifestLoader::new(dir.path()).load_plan().unwrap();
        assert_eq!(source, ManifestSource::File(dir.path().join(MANIFEST_FILE)));
        assert_eq!(plan.targets().names(), vec!["only.js".to_string()]);
        assert_eq!(plan.layout().root(), dir.path());
    }

    #[test]
    fn loader_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let (plan, source) = ManifestLoader::new(dir.path()).load_plan().unwrap();
        assert_eq!(source, ManifestSource::Builtin);
        assert_eq!(plan.targets().len(), 3);
    }

    #[test]
    fn explicit_manifest_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("other.toml");
        let err = ManifestLoader::new(dir.path())
            .with_manifest(Some(missing.clone()))
            .load()
            .unwrap_err();
        assert_eq!(
            err,
            BundleError::Application(ApplicationError::FileNotFound { path: missing })
        );
    }
}
