//! Best-effort git repository initialization
//!
//! Runs `git init`, `git add .` and `git commit` in the generated project.
//! Any failure, including git not being installed, is reported as
//! [`GitOutcome::Unavailable`] and never as an error.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Result of the git step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitOutcome {
    /// Repository created with one commit
    Initialized,
    /// Git missing or one of the commands failed
    Unavailable,
}

impl GitOutcome {
    pub fn is_initialized(&self) -> bool {
        matches!(self, GitOutcome::Initialized)
    }
}

/// Runs the git binary inside a project directory
#[derive(Debug, Clone)]
pub struct GitInitializer {
    program: OsString,
}

impl Default for GitInitializer {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitInitializer {
    /// Use a specific git executable
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Create a repository with a single commit holding every file
    pub async fn init(&self, dir: &Path, commit_message: &str) -> GitOutcome {
        let steps: [&[&str]; 3] = [
            &["init"],
            &["add", "."],
            &["commit", "-m", commit_message],
        ];

        for args in steps {
            if !self.run(dir, args).await {
                return GitOutcome::Unavailable;
            }
        }

        GitOutcome::Initialized
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> bool {
        TokioCommand::new(&self.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
