//! Minifier adapters.

mod command;

pub use command::{CommandMinifier, DEFAULT_ARGS, DEFAULT_PROGRAM};
