//! The `Target` descriptor and the ordered `TargetTable`.
//!
//! A `Target` names one output bundle and the ordered list of source files
//! concatenated into it. Once a `Target` exists it is guaranteed consistent;
//! the table adds the cross-target rule that bundle names are unique.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::collections::HashSet;
use std::fmt;

use crate::domain::{
    entities::{common::RelativePath, worker::WorkerSpec},
    error::DomainError,
};

// ── Target ────────────────────────────────────────────────────────────────────

/// One output bundle: its file name and the sources it is assembled from.
///
/// Invariants:
/// - `name` is non-empty and contains no path separator
/// - `sources` is non-empty, relative, and free of duplicates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    name: String,
    sources: Vec<RelativePath>,
}

impl Target {
    /// Build a validated target.
    pub fn new<I, S>(name: impl Into<String>, sources: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let sources = sources
            .into_iter()
            .map(|s| RelativePath::try_new(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let target = Self { name, sources };
        target.validate()?;
        Ok(target)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &[RelativePath] {
        &self.sources
    }

    /// `true` if any source has the given base name.
    pub fn includes(&self, file_name: &str) -> bool {
        self.sources.iter().any(|s| s.file_name() == file_name)
    }

    /// `true` when this bundle needs the worker driver compiled in.
    pub fn needs_worker(&self, worker: Option<&WorkerSpec>) -> bool {
        worker.is_some_and(|w| self.includes(w.kernel()))
    }

    /// Width fragment headers are right-aligned to.
    ///
    /// The longest source base name, widened to the worker title when the
    /// worker fragment is part of this bundle.
    pub fn header_width(&self, worker: Option<&WorkerSpec>) -> usize {
        let longest = self
            .sources
            .iter()
            .map(|s| s.file_name().chars().count())
            .max()
            .unwrap_or(0);

        match worker {
            Some(w) if self.needs_worker(Some(w)) => longest.max(w.title().chars().count()),
            _ => longest,
        }
    }

    /// Re-check the invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidTarget {
                name: self.name.clone(),
                reason: "bundle name cannot be empty".into(),
            });
        }
        if self.name.contains('/') || self.name.contains('\\') {
            return Err(DomainError::InvalidTarget {
                name: self.name.clone(),
                reason: "bundle name cannot contain path separators".into(),
            });
        }
        if self.sources.is_empty() {
            return Err(DomainError::InvalidTarget {
                name: self.name.clone(),
                reason: "at least one source file is required".into(),
            });
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.as_path()) {
                return Err(DomainError::DuplicateSource {
                    target: self.name.clone(),
                    source_path: source.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} sources)", self.name, self.sources.len())
    }
}

// ── TargetTable ───────────────────────────────────────────────────────────────

/// The static, ordered mapping from bundle name to its sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    targets: Vec<Target>,
}

impl TargetTable {
    /// Build a table, rejecting duplicate bundle names and empty tables.
    pub fn new(targets: Vec<Target>) -> Result<Self, DomainError> {
        if targets.is_empty() {
            return Err(DomainError::NoTargets);
        }

        let mut seen = HashSet::new();
        for t in &targets {
            if !seen.insert(t.name()) {
                return Err(DomainError::DuplicateTarget {
                    name: t.name().to_string(),
                });
            }
        }

        Ok(Self { targets })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.name().to_string()).collect()
    }

    /// Select targets by name, keeping table order.
    ///
    /// An empty selection means "everything".
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&Target>, DomainError> {
        if names.is_empty() {
            return Ok(self.targets.iter().collect());
        }

        if let Some(unknown) = names.iter().find(|n| self.get(n.as_ref()).is_none()) {
            return Err(DomainError::UnknownTarget {
                name: unknown.as_ref().to_string(),
                available: self.names(),
            });
        }

        Ok(self
            .targets
            .iter()
            .filter(|t| names.iter().any(|n| n.as_ref() == t.name()))
            .collect())
    }
}
