//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build every bundle" or "render one target".

pub mod build_service;

pub use build_service::{
    BuildOptions, BuildReport, BuildService, BundleSummary, RenderedBundle, SourceInput,
};
