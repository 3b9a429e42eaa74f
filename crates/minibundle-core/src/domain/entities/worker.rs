use std::path::Path;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Where the off-main-thread worker driver comes from and how it is labelled.
///
/// A bundle whose sources include `kernel` gets the driver at `driver`
/// (relative to the source root) compiled in as a fragment titled `title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSpec {
    kernel: String,
    driver: RelativePath,
    title: String,
}

impl WorkerSpec {
    pub fn new(
        kernel: impl Into<String>,
        driver: impl AsRef<str>,
        title: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let kernel = kernel.into();
        let title = title.into();

        if kernel.trim().is_empty() {
            return Err(DomainError::InvalidWorker("kernel file name is empty".into()));
        }
        if title.trim().is_empty() {
            return Err(DomainError::InvalidWorker("fragment title is empty".into()));
        }

        Ok(Self {
            kernel,
            driver: RelativePath::try_new(driver.as_ref())?,
            title,
        })
    }

    /// Base name of the kernel source, e.g. `kernel.js`.
    pub fn kernel(&self) -> &str {
        &self.kernel
    }

    pub fn driver(&self) -> &RelativePath {
        &self.driver
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Substring of a fragment title that marks the kernel source.
    ///
    /// The kernel's file stem, so `kernel.js` yields `kernel`.
    pub fn kernel_marker(&self) -> &str {
        Path::new(&self.kernel)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.kernel)
    }
}
