//! create-starkon-template - Project scaffolding for the Starkon Next.js template

use clap::Parser;
use scaffolder_core::report;
use scaffolder_core::style;
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::ProductConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const GITIGNORE: &str = "\
# dependencies
/node_modules
/.pnp
.pnp.js
.yarn/install-state.gz

# testing
/coverage

# next.js
/.next/
/out/

# production
/build
/dist

# misc
.DS_Store
Thumbs.db
*.pem

# debug
npm-debug.log*
yarn-debug.log*
yarn-error.log*
pnpm-debug.log*

# local env files
.env*.local
.env

# vercel
.vercel

# typescript
*.tsbuildinfo
next-env.d.ts

# editors
.vscode/*
!.vscode/extensions.json
.idea
";

const EXAMPLES: &str = "\
Examples:
  create-starkon-template my-app
  create-starkon-template my-app --skip-git";

/// Starkon product configuration
#[derive(Clone)]
pub struct StarkonConfig;

impl ProductConfig for StarkonConfig {
    fn display_name(&self) -> &'static str {
        "Starkon Template"
    }

    fn default_project_name(&self) -> &'static str {
        "my-starkon-app"
    }

    fn package_name(&self) -> &'static str {
        "create-starkon-template"
    }

    fn template_dir_env(&self) -> &'static str {
        "STARKON_TEMPLATE_DIR"
    }

    fn excluded_entries(&self) -> &'static [&'static str] {
        &[
            "index.js",
            "node_modules",
            ".git",
            ".next",
            "dist",
            "coverage",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            ".DS_Store",
            "Thumbs.db",
        ]
    }

    fn gitignore(&self) -> &'static str {
        GITIGNORE
    }

    fn project_description(&self, project_name: &str) -> String {
        format!("{} - Built with Starkon Template", project_name)
    }

    fn project_scripts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("dev", "next dev"),
            ("build", "next build"),
            ("start", "next start"),
            ("lint", "next lint"),
            ("type-check", "tsc --noEmit"),
            ("prettier", "prettier --write ."),
            ("prettier:check", "prettier --check ."),
            ("test", "jest"),
            ("test:watch", "jest --watch"),
            ("test:coverage", "jest --coverage"),
        ]
    }

    fn initial_commit_message(&self) -> &'static str {
        "Initial commit from create-starkon-template"
    }

    fn docs_url(&self) -> &'static str {
        "https://www.npmjs.com/package/create-starkon-template"
    }

    fn next_steps(&self, project_name: &str) -> Vec<String> {
        vec![
            format!("cd {}", project_name),
            "npm install   (or: yarn install)".to_string(),
            "npm run dev   (or: yarn dev)".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-starkon-template")]
#[command(about = "Create a new Next.js project from the Starkon template")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Directory to create the project in (also used as the package name)
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<String>,

    /// Skip git repository initialization
    #[arg(long = "skip-git")]
    pub skip_git: bool,

    /// Print the full error chain on failure
    #[arg(long)]
    pub verbose: bool,

    /// Local directory to copy templates from instead of the install directory (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl Args {
    fn into_create_args(self, interrupted: Arc<AtomicBool>) -> CreateArgs {
        CreateArgs {
            project_directory: self.project_directory,
            template_dir: self.template_dir,
            skip_git: self.skip_git,
            verbose: self.verbose,
            interrupted,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C stops the pipeline at the next stage so the partial project is
    // rolled back; a second Ctrl+C exits right away
    let interrupted = Arc::new(AtomicBool::new(false));
    let handler_flag = interrupted.clone();
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        if handler_flag.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
    })
    .ok();

    let args = Args::parse();
    let verbose = args.verbose;
    let config = StarkonConfig;

    let result = scaffolder_core::run(&config, args.into_create_args(interrupted)).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let fmt = style::detect_formatter();
            eprint!("{}", report::render_error(fmt.as_ref(), &err, verbose));
            ExitCode::FAILURE
        }
    }
}
