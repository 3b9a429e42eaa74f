//! The build use case and the traits it needs from outside.
//!
//! Text rules (headers, templates, the worker rewrite) stay in
//! `crate::domain`; this layer sequences them and does the reading, the
//! minifying and the writing through [`ports`].

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BuildOptions, BuildReport, BuildService, BundleSummary, RenderedBundle, SourceInput,
};

pub use ports::{BuildObserver, Filesystem, Minifier, SilentObserver};

pub use error::ApplicationError;
