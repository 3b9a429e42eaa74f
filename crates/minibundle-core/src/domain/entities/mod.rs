pub mod common;
pub mod fragment;
pub mod layout;
pub mod license;
pub mod plan;
pub mod target;
pub mod template;
pub mod worker;

pub use crate::domain::DomainError;
pub use fragment::Fragment;
pub use plan::BuildPlan;
pub use target::{Target, TargetTable};
pub use template::{RenderContext, WrapperTemplate};
