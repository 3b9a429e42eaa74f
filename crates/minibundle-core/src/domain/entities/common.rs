use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// Path below a root directory (the source root or the project root).
///
/// Absolute paths and `..` components are refused, so resolving never
/// leaves the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path.has_root()
            || path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes {
            return Err(DomainError::PathOutsideRoot {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Last component, e.g. `atoms.js` for `physics/atoms.js`. Used as the
    /// fragment title.
    pub fn file_name(&self) -> &str {
        match self.0.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => self.0.to_str().unwrap_or_default(),
        }
    }

    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}
