//! Target directory resolution and lifecycle

use super::name::ProjectName;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Absolute directory a project is generated into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDirectory {
    path: PathBuf,
}

impl TargetDirectory {
    /// Resolve a project name against the working directory
    pub fn resolve(cwd: &Path, name: &ProjectName) -> Self {
        Self {
            path: cwd.join(name.as_str()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries already present, zero when the directory is missing
    pub async fn existing_entries(&self) -> Result<usize> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(0);
        }

        let mut entries = fs::read_dir(&self.path)
            .await
            .with_context(|| format!("Failed to read directory: {}", self.path.display()))?;
        let mut count = 0;
        while entries.next_entry().await?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Create the directory and any missing parents
    pub async fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .await
            .with_context(|| format!("Failed to create directory: {}", self.path.display()))
    }

    /// Remove the directory and everything in it
    pub async fn remove(&self) -> Result<()> {
        fs::remove_dir_all(&self.path)
            .await
            .with_context(|| format!("Failed to remove directory: {}", self.path.display()))
    }
}
