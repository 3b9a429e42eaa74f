//! Bundle building without any I/O of its own.
//!
//! `domain` holds the target table, fragment headers, wrapper templates and
//! the license policy. `application` holds [`BuildService`](application::BuildService),
//! which walks a [`BuildPlan`](domain::BuildPlan) and talks to the outside
//! world only through the traits in `application::ports`. The concrete
//! filesystem and minifier live in `minibundle-adapters`.
//!
//! ```text
//!  minibundle-cli ──> BuildService ──> ports::{Filesystem, Minifier, BuildObserver}
//!                          │                        ^
//!                          v                        │ implemented in
//!                       domain               minibundle-adapters
//! ```
//!
//! ```rust,ignore
//! use minibundle_core::prelude::*;
//!
//! let table = TargetTable::new(vec![Target::new("app.js", ["etc.js", "app.js"])?])?;
//! let plan = BuildPlan::new(ProjectLayout::new("."), table);
//!
//! let service = BuildService::new(Box::new(filesystem), Box::new(minifier));
//! let report = service.build(&plan, &BuildOptions::new(2024), &SilentObserver)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Names the adapters, the CLI and the tests import.
pub mod prelude {
    pub use crate::application::{
        BuildOptions, BuildReport, BuildService, BundleSummary,
        ports::{BuildObserver, Filesystem, Minifier, SilentObserver},
    };
    pub use crate::domain::{
        BuildPlan, Fragment, License, LicensePolicy, ProjectLayout, RelativePath, Target,
        TargetTable, WorkerSpec,
    };
    pub use crate::error::{BundleError, BundleResult, ErrorCategory};
}
