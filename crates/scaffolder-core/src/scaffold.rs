//! Project creation pipeline
//!
//! Stages run strictly in order: resolve name, resolve target directory,
//! confirm overwrite, create directory, copy templates, customize the
//! manifest, then optionally initialize git. Once the target directory has
//! been created, a failing stage removes it again before the error is
//! returned.
//!
//! An interrupt flag (set from a Ctrl+C handler) is checked between stages;
//! once set, the run stops with [`ScaffoldError::Interrupted`] and the same
//! rollback applies.
//!
//! User interaction and progress display go through the [`Prompter`] and
//! [`ProgressReporter`] traits so the pipeline runs the same under cliclack
//! and in tests.

use crate::product::ProductConfig;
use crate::project::{validate_project_name, NameError, ProjectName, TargetDirectory};
use crate::runtime::git::{GitInitializer, GitOutcome};
use crate::templates::{self, CopyError, CopyReport, ExclusionList, ManifestError};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// What the user asked for on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldRequest {
    /// Positional project directory, prompted for when absent
    pub project_directory: Option<String>,
    pub skip_git: bool,
    pub verbose: bool,
}

/// A project that was generated successfully
#[derive(Debug, Clone)]
pub struct CreatedProject {
    pub name: ProjectName,
    pub path: PathBuf,
    pub copied: CopyReport,
    /// `None` when git was skipped
    pub git: Option<GitOutcome>,
}

/// How a run ended without error
#[derive(Debug, Clone)]
pub enum ScaffoldOutcome {
    Created(CreatedProject),
    /// The user declined a prompt; nothing was changed
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    InvalidName(#[from] NameError),

    #[error("Prompt failed: {0}")]
    Prompt(#[source] io::Error),

    #[error("Failed to prepare {}: {source:#}", path.display())]
    TargetDirectory {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Template dosyaları kopyalanamadı")]
    TemplateCopy(#[source] CopyError),

    #[error("Package.json güncellenemedi")]
    Manifest(#[source] ManifestError),

    #[error("Interrupted before the project was complete")]
    Interrupted,
}

/// Interactive questions asked during scaffolding
pub trait Prompter {
    /// Ask for a project name. Returns `None` when the user cancels.
    ///
    /// `validate` must be applied to the answer before it is returned.
    fn project_name(
        &mut self,
        default: &str,
        validate: fn(&str) -> Result<(), NameError>,
    ) -> io::Result<Option<String>>;

    /// Ask whether to continue into a directory that already has entries
    fn confirm_overwrite(&mut self, dir: &Path, existing_entries: usize) -> io::Result<bool>;
}

/// Progress display for the running pipeline
pub trait ProgressReporter {
    /// A new stage started
    fn set_stage(&mut self, label: &str);

    /// Extra detail, e.g. the error behind a failed stage
    fn note(&mut self, message: &str);

    fn succeed(&mut self, message: &str);

    fn fail(&mut self, message: &str);
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn set_stage(&mut self, _label: &str) {}
    fn note(&mut self, _message: &str) {}
    fn succeed(&mut self, _message: &str) {}
    fn fail(&mut self, _message: &str) {}
}

/// Everything the pipeline needs besides the request itself
pub struct Scaffolder<'a, C: ProductConfig> {
    config: &'a C,
    template_dir: PathBuf,
    cwd: PathBuf,
    exclusions: ExclusionList,
    git: GitInitializer,
    interrupted: Arc<AtomicBool>,
}

impl<'a, C: ProductConfig> Scaffolder<'a, C> {
    pub fn new(config: &'a C, template_dir: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            config,
            template_dir: template_dir.into(),
            cwd: cwd.into(),
            exclusions: templates::exclusions_for(config),
            git: GitInitializer::default(),
            interrupted: Arc::default(),
        }
    }

    /// Skip one more entry while copying
    pub fn exclude(mut self, entry: impl Into<String>) -> Self {
        self.exclusions.push(entry);
        self
    }

    /// Use a different git executable
    pub fn with_git(mut self, git: GitInitializer) -> Self {
        self.git = git;
        self
    }

    /// Stop between stages once `flag` is set
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    fn check_interrupt(&self) -> Result<(), ScaffoldError> {
        if self.interrupted.load(Ordering::SeqCst) {
            Err(ScaffoldError::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Run the whole pipeline
    pub async fn create_project<P, R>(
        &self,
        request: &ScaffoldRequest,
        prompter: &mut P,
        progress: &mut R,
    ) -> Result<ScaffoldOutcome, ScaffoldError>
    where
        P: Prompter + ?Sized,
        R: ProgressReporter + ?Sized,
    {
        let name = match &request.project_directory {
            Some(arg) => ProjectName::parse(arg.as_str())?,
            None => {
                let answer = prompter
                    .project_name(self.config.default_project_name(), validate_project_name)
                    .map_err(ScaffoldError::Prompt)?;
                match answer {
                    Some(answer) if !answer.trim().is_empty() => ProjectName::parse(answer)?,
                    _ => return Ok(ScaffoldOutcome::Cancelled),
                }
            }
        };

        let target = TargetDirectory::resolve(&self.cwd, &name);

        let existing = target
            .existing_entries()
            .await
            .map_err(|source| ScaffoldError::TargetDirectory {
                path: target.path().to_path_buf(),
                source,
            })?;
        if existing > 0 {
            let proceed = prompter
                .confirm_overwrite(target.path(), existing)
                .map_err(ScaffoldError::Prompt)?;
            if !proceed {
                return Ok(ScaffoldOutcome::Cancelled);
            }
        }

        self.check_interrupt()?;
        progress.set_stage("Creating project directory...");
        target
            .ensure_exists()
            .await
            .map_err(|source| ScaffoldError::TargetDirectory {
                path: target.path().to_path_buf(),
                source,
            })?;

        match self.populate(&name, &target, request, progress).await {
            Ok(project) => {
                progress.succeed(&format!(
                    "Created {} in {}",
                    project.name,
                    project.path.display()
                ));
                Ok(ScaffoldOutcome::Created(project))
            }
            Err(err) => {
                progress.fail(&err.to_string());
                if let Err(cleanup) = target.remove().await {
                    progress.note(&format!("Cleanup failed: {:#}", cleanup));
                }
                Err(err)
            }
        }
    }

    /// Stages that run inside the created directory
    async fn populate<R>(
        &self,
        name: &ProjectName,
        target: &TargetDirectory,
        request: &ScaffoldRequest,
        progress: &mut R,
    ) -> Result<CreatedProject, ScaffoldError>
    where
        R: ProgressReporter + ?Sized,
    {
        self.check_interrupt()?;
        progress.set_stage("Copying template files...");
        let copied = templates::copy_template(
            &self.template_dir,
            target.path(),
            &self.exclusions,
            self.config.gitignore(),
        )
        .await
        .map_err(|err| {
            progress.note(&err.to_string());
            ScaffoldError::TemplateCopy(err)
        })?;

        self.check_interrupt()?;
        progress.set_stage("Updating package.json...");
        let overrides = templates::overrides_for(self.config, name.as_str());
        templates::customize_manifest(target.path(), &overrides)
            .await
            .map_err(|err| {
                progress.note(&err.to_string());
                ScaffoldError::Manifest(err)
            })?;

        let git = if request.skip_git {
            None
        } else {
            self.check_interrupt()?;
            progress.set_stage("Initializing git repository...");
            Some(
                self.git
                    .init(target.path(), self.config.initial_commit_message())
                    .await,
            )
        };
        // A Ctrl+C during `git` also kills the child processes
        self.check_interrupt()?;

        Ok(CreatedProject {
            name: name.clone(),
            path: target.path().to_path_buf(),
            copied,
            git,
        })
    }
}
