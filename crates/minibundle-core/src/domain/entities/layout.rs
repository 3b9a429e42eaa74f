use std::path::{Path, PathBuf};

use crate::domain::entities::common::RelativePath;

/// Where inputs live and outputs go, relative to a project root.
///
/// | Entry       | Default              |
/// |-------------|----------------------|
/// | sources     | `src`                |
/// | templates   | `build/tmpl`         |
/// | license     | `build/tmpl/LICENSE` |
/// | output      | `lib`                |
///
/// Absolute entries are used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    sources: PathBuf,
    templates: PathBuf,
    license: PathBuf,
    output: PathBuf,
}

impl ProjectLayout {
    /// Default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sources: PathBuf::from("src"),
            templates: PathBuf::from("build").join("tmpl"),
            license: PathBuf::from("build").join("tmpl").join("LICENSE"),
            output: PathBuf::from("lib"),
        }
    }

    pub fn with_sources(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sources = dir.into();
        self
    }

    pub fn with_templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = dir.into();
        self
    }

    pub fn with_license(mut self, file: impl Into<PathBuf>) -> Self {
        self.license = file.into();
        self
    }

    pub fn with_output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output = dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.sources)
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root.join(&self.templates)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.output)
    }

    pub fn license_path(&self) -> PathBuf {
        self.root.join(&self.license)
    }

    pub fn source_path(&self, source: &RelativePath) -> PathBuf {
        source.resolve(&self.source_dir())
    }

    /// Wrapper template for a bundle, named after the bundle itself.
    pub fn template_path(&self, bundle: &str) -> PathBuf {
        self.template_dir().join(bundle)
    }

    pub fn output_path(&self, bundle: &str) -> PathBuf {
        self.output_dir().join(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn defaults_resolve_under_root() {
        let layout = ProjectLayout::new("/proj");
        assert_eq!(layout.output_path("arbor.js"), Path::new("/proj/lib/arbor.js"));
        assert_eq!(
            layout.template_path("arbor.js"),
            Path::new("/proj/build/tmpl/arbor.js")
        );
        assert_eq!(layout.license_path(), Path::new("/proj/build/tmpl/LICENSE"));

        let src = RelativePath::try_new("physics/atoms.js").unwrap();
        assert_eq!(layout.source_path(&src), Path::new("/proj/src/physics/atoms.js"));
    }

    #[test]
    fn overrides_apply() {
        let layout = ProjectLayout::new("p")
            .with_output("dist")
            .with_sources("js");
        assert_eq!(layout.output_dir(), Path::new("p").join("dist"));
        assert_eq!(layout.source_dir(), Path::new("p").join("js"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_override_ignores_root() {
        let layout = ProjectLayout::new("p").with_output("/tmp/out");
        assert_eq!(layout.output_dir(), Path::new("/tmp/out"));
    }
}
