//! Template tree copying with exclusion filtering

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use walkdir::WalkDir;

/// Errors raised while copying the template tree
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Target directory {target} is inside the template source {source_dir}")]
    TargetInsideSource { source_dir: PathBuf, target: PathBuf },

    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| CopyError::Io {
            action,
            path,
            source,
        }
    }
}

/// Entries that never leave the template tree
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    entries: Vec<String>,
}

impl ExclusionList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Add one more entry (e.g. the running executable's file name)
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Check a `/`-separated path relative to the template root.
    ///
    /// Matching is a plain string prefix on the relative path, so `dist`
    /// also excludes `distribution/`, and `.git` also excludes `.gitignore`.
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        self.entries
            .iter()
            .any(|entry| relative_path.starts_with(entry.as_str()) || file_name == entry)
    }
}

/// What a copy run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

/// Relative path with `/` separators regardless of platform
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Copy every non-excluded entry of `source_dir` into `target_dir`, then
/// write the fixed `.gitignore`.
///
/// Files already present in the target are overwritten; unrelated files are
/// left alone.
pub async fn copy_template(
    source_dir: &Path,
    target_dir: &Path,
    exclusions: &ExclusionList,
    gitignore: &str,
) -> Result<CopyReport, CopyError> {
    let source_root = fs::canonicalize(source_dir)
        .await
        .map_err(CopyError::io("resolve", source_dir))?;
    fs::create_dir_all(target_dir)
        .await
        .map_err(CopyError::io("create directory", target_dir))?;
    let target_root = fs::canonicalize(target_dir)
        .await
        .map_err(CopyError::io("resolve", target_dir))?;

    if target_root.starts_with(&source_root) {
        return Err(CopyError::TargetInsideSource {
            source_dir: source_root,
            target: target_root,
        });
    }

    let mut report = CopyReport::default();

    let walker = WalkDir::new(&source_root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match relative_key(&source_root, entry.path()) {
            Some(key) => !exclusions.is_excluded(&key),
            None => true,
        });

    for entry in walker {
        let entry = entry?;
        let Some(key) = relative_key(&source_root, entry.path()) else {
            continue;
        };
        // `key` is lossy; the destination keeps the original name bytes
        let Ok(relative) = entry.path().strip_prefix(&source_root) else {
            continue;
        };
        let destination = target_root.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .await
                .map_err(CopyError::io("create directory", &destination))?;
            report.directories.push(key);
        } else {
            // Parents normally exist already since walkdir yields directories first
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(CopyError::io("create directory", parent))?;
            }
            fs::copy(entry.path(), &destination)
                .await
                .map_err(CopyError::io("copy", entry.path()))?;
            report.files.push(key);
        }
    }

    let gitignore_path = target_root.join(".gitignore");
    fs::write(&gitignore_path, gitignore)
        .await
        .map_err(CopyError::io("write", &gitignore_path))?;

    Ok(report)
}
