//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library provides the core functionality for generating a new project
//! from a template tree that ships alongside the CLI. A product binary
//! (e.g. `create-starkon-template`) supplies a [`ProductConfig`] and the
//! library does the rest: name validation, target directory handling,
//! copying, `package.json` rewriting and best-effort git initialization.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, template copying, manifest rewriting, git
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and [`Scaffolder`] over the
//!   [`Prompter`] and [`ProgressReporter`] seams
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{NoopProgress, ScaffoldRequest, Scaffolder};
//!
//! let scaffolder = Scaffolder::new(&MyConfig, "/opt/my-template", std::env::current_dir()?);
//! let request = ScaffoldRequest {
//!     project_directory: Some("my-app".into()),
//!     ..Default::default()
//! };
//! scaffolder.create_project(&request, &mut MyPrompter, &mut NoopProgress).await?;
//! ```

pub mod config;
pub mod product;
pub mod project;
pub mod report;
pub mod runtime;
pub mod scaffold;
pub mod style;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use product::ProductConfig;
pub use project::{validate_project_name, NameError, ProjectName, TargetDirectory};
pub use runtime::{GitInitializer, GitOutcome};
pub use scaffold::{
    CreatedProject, NoopProgress, ProgressReporter, Prompter, ScaffoldError, ScaffoldOutcome,
    ScaffoldRequest, Scaffolder,
};
pub use templates::{copy_template, customize_manifest, CopyReport, ExclusionList};

#[cfg(feature = "tui")]
pub use tui::run;
