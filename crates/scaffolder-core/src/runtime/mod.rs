//! External tool integration
//!
//! This module provides:
//! - Best-effort git repository initialization for generated projects

pub mod git;

pub use git::{GitInitializer, GitOutcome};
