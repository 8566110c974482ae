//! Charm-style CLI prompts using cliclack

use crate::config::resolve_template_dir;
use crate::product::ProductConfig;
use crate::project::NameError;
use crate::report;
use crate::runtime::git::GitOutcome;
use crate::scaffold::{ProgressReporter, Prompter, ScaffoldOutcome, ScaffoldRequest, Scaffolder};
use crate::style;
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory (and name) to create
    pub project_directory: Option<String>,

    /// Local directory to use for templates instead of the install directory
    pub template_dir: Option<PathBuf>,

    /// Skip git repository initialization
    pub skip_git: bool,

    /// Show extra detail while running
    pub verbose: bool,

    /// Raised by the process's Ctrl+C handler
    pub interrupted: Arc<AtomicBool>,
}

impl CreateArgs {
    fn request(&self) -> ScaffoldRequest {
        ScaffoldRequest {
            project_directory: self.project_directory.clone(),
            skip_git: self.skip_git,
            verbose: self.verbose,
        }
    }
}

/// Esc and Ctrl+C surface as `Interrupted` from cliclack
fn is_cancel(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::Interrupted
}

/// Prompter backed by cliclack inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn project_name(
        &mut self,
        default: &str,
        validate: fn(&str) -> Result<(), NameError>,
    ) -> io::Result<Option<String>> {
        let answer = cliclack::input("Project name")
            .placeholder(default)
            .default_input(default)
            .validate(move |input: &String| validate(input).map_err(|e| e.to_string()))
            .interact::<String>();

        match answer {
            Ok(name) => Ok(Some(name.trim().to_string()).filter(|n| !n.is_empty())),
            Err(e) if is_cancel(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn confirm_overwrite(&mut self, dir: &Path, existing_entries: usize) -> io::Result<bool> {
        cliclack::log::warning(format!(
            "{} already has {} existing items",
            dir.display(),
            existing_entries
        ))?;

        match cliclack::confirm("Continue and overwrite matching files?")
            .initial_value(false)
            .interact()
        {
            Ok(confirm) => Ok(confirm),
            Err(e) if is_cancel(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Progress reporter driving a single cliclack spinner
pub struct SpinnerProgress {
    spinner: cliclack::ProgressBar,
    active: bool,
    pending_notes: Vec<String>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self {
            spinner: cliclack::spinner(),
            active: false,
            pending_notes: Vec::new(),
        }
    }

    fn flush_notes(&mut self) {
        for note in self.pending_notes.drain(..) {
            let _ = cliclack::log::error(note);
        }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for SpinnerProgress {
    fn set_stage(&mut self, label: &str) {
        if self.active {
            self.spinner.set_message(label);
        } else {
            self.spinner.start(label);
            self.active = true;
        }
    }

    fn note(&mut self, message: &str) {
        // Logging under a running spinner garbles the line
        if self.active {
            self.pending_notes.push(message.to_string());
        } else {
            let _ = cliclack::log::error(message);
        }
    }

    fn succeed(&mut self, message: &str) {
        if self.active {
            self.spinner.stop(message);
            self.active = false;
        }
        self.flush_notes();
    }

    fn fail(&mut self, message: &str) {
        if self.active {
            self.spinner.error(message);
            self.active = false;
        }
        self.flush_notes();
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<ScaffoldOutcome> {
    cliclack::intro(config.display_name())?;

    let template_dir = resolve_template_dir(config, args.template_dir.as_deref())?;
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let mut scaffolder =
        Scaffolder::new(config, template_dir, cwd).with_interrupt(args.interrupted.clone());

    if args.verbose {
        cliclack::log::info(format!(
            "Using templates from {}",
            scaffolder.template_dir().display()
        ))?;
    }

    // The binary itself never ends up in a generated project
    if let Some(exe_name) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().into_owned()))
    {
        scaffolder = scaffolder.exclude(exe_name);
    }

    let mut prompter = CliclackPrompter;
    let mut progress = SpinnerProgress::new();

    let outcome = scaffolder
        .create_project(&args.request(), &mut prompter, &mut progress)
        .await?;

    match &outcome {
        ScaffoldOutcome::Created(project) => {
            if args.verbose {
                cliclack::log::info(format!(
                    "Copied {} files and {} directories",
                    project.copied.files.len(),
                    project.copied.directories.len()
                ))?;
            }
            if project.git == Some(GitOutcome::Initialized) {
                cliclack::log::success("Initialized a git repository")?;
            }

            let fmt = style::detect_formatter();
            print!(
                "{}",
                report::render_next_steps(config, fmt.as_ref(), project.name.as_str())
            );

            cliclack::outro("Happy coding!")?;
        }
        ScaffoldOutcome::Cancelled => {
            cliclack::outro_cancel("Operation cancelled")?;
        }
    }

    Ok(outcome)
}
