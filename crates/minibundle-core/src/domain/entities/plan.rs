use crate::domain::entities::{
    layout::ProjectLayout, license::LicensePolicy, target::TargetTable, worker::WorkerSpec,
};

/// Everything a build needs to know about a project, independent of I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    layout: ProjectLayout,
    targets: TargetTable,
    worker: Option<WorkerSpec>,
    license: LicensePolicy,
}

impl BuildPlan {
    pub fn new(layout: ProjectLayout, targets: TargetTable) -> Self {
        Self {
            layout,
            targets,
            worker: None,
            license: LicensePolicy::default(),
        }
    }

    pub fn with_worker(mut self, worker: WorkerSpec) -> Self {
        self.worker = Some(worker);
        self
    }

    pub fn with_license_policy(mut self, policy: LicensePolicy) -> Self {
        self.license = policy;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn targets(&self) -> &TargetTable {
        &self.targets
    }

    pub fn worker(&self) -> Option<&WorkerSpec> {
        self.worker.as_ref()
    }

    pub fn license_policy(&self) -> &LicensePolicy {
        &self.license
    }
}
