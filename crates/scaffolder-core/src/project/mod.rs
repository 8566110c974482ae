//! Project naming and target directory handling

pub mod name;
pub mod target;

pub use name::{validate_project_name, NameError, ProjectName};
pub use target::TargetDirectory;
