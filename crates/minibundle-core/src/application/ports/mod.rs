//! Traits the build service calls and the adapters implement.
//!
//! [`Filesystem`] reads sources and writes bundles, [`Minifier`] runs the
//! external tool on one source at a time, and [`BuildObserver`] hears about
//! progress. The CLI supplies a spinner as its observer.

pub mod output;

pub use output::{BuildObserver, Filesystem, Minifier, SilentObserver};
