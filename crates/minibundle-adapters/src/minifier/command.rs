//! Minifier that pipes source through an external program.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, instrument};

use minibundle_core::{
    application::{ApplicationError, ports::Minifier},
    error::{BundleError, BundleResult},
};

pub const DEFAULT_PROGRAM: &str = "uglifyjs";
pub const DEFAULT_ARGS: &[&str] = &["--compress", "--mangle"];

/// Runs `program args...` once per source, source on stdin, result on stdout.
///
/// No shell is involved; arguments are passed through as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMinifier {
    program: String,
    args: Vec<String>,
}

impl CommandMinifier {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `uglifyjs --compress --mangle`
    pub fn uglifyjs() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_ARGS.iter().copied())
    }

    /// Build from a full command line, program first.
    pub fn from_command_line<I, S>(words: I) -> BundleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter().map(Into::into);
        match words.next() {
            Some(program) if !program.trim().is_empty() => Ok(Self {
                program,
                args: words.collect(),
            }),
            _ => Err(BundleError::Configuration {
                message: "minifier command is empty".into(),
            }),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for CommandMinifier {
    fn default() -> Self {
        Self::uglifyjs()
    }
}

impl Minifier for CommandMinifier {
    #[instrument(skip(self, source), fields(bytes = source.len()))]
    fn minify(&self, file: &str, source: &str) -> BundleResult<String> {
        let spawn_error = |e: io::Error| ApplicationError::MinifierSpawn {
            command: self.describe(),
            reason: e.to_string(),
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin from a helper thread while stdout/stderr drain below;
        // writing everything first deadlocks once the pipes fill up.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = source.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(spawn_error)?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                // The program may exit without reading everything; its exit
                // status decides.
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(spawn_error(e).into()),
                Err(_) => {
                    return Err(BundleError::Internal {
                        message: "minifier stdin writer panicked".into(),
                    });
                }
            }
        }

        if !output.status.success() {
            return Err(ApplicationError::MinifierFailed {
                file: file.to_string(),
                command: self.describe(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        debug!(out_bytes = output.stdout.len(), "Minifier finished");

        String::from_utf8(output.stdout).map_err(|_| {
            ApplicationError::MinifierInvalidOutput {
                file: file.to_string(),
                command: self.describe(),
            }
            .into()
        })
    }

    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
