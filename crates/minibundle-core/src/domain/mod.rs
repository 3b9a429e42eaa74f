//! Core domain layer for minibundle.
//!
//! Pure text and path logic: targets, fragments, wrapper templates, license
//! filtering, and the source rewrites applied before minification. All I/O
//! and the minifier process are reached through ports defined in the
//! application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: All domain objects are Clone + PartialEq
pub mod entities;
pub mod error;
pub mod transforms;

pub use entities::{
    common::RelativePath,
    fragment::Fragment,
    layout::ProjectLayout,
    license::{License, LicensePolicy},
    plan::BuildPlan,
    target::{Target, TargetTable},
    template::{RenderContext, WrapperTemplate},
    worker::WorkerSpec,
};

pub use error::{DomainError, ErrorCategory};
