//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each product must implement to
//! configure the scaffolding behavior: which files never leave the template
//! tree, how the generated `package.json` looks, and what gets printed once
//! the project exists.

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (display name, default project name)
/// - Template source lookup
/// - Copy exclusions and the generated `.gitignore`
/// - Manifest rewrite values
/// - Documentation links and post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Project name suggested by the interactive prompt
    fn default_project_name(&self) -> &'static str;

    /// npm package name of the installed CLI, used to recognize its install
    /// directory
    fn package_name(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Entries skipped while copying the template tree.
    ///
    /// An entry matches when a relative path starts with it or a file name
    /// equals it.
    fn excluded_entries(&self) -> &'static [&'static str];

    /// Content written to `.gitignore` in every generated project
    fn gitignore(&self) -> &'static str;

    /// Version written into the generated manifest
    fn project_version(&self) -> &'static str {
        "0.1.0"
    }

    /// Description written into the generated manifest
    fn project_description(&self, project_name: &str) -> String;

    /// Scripts that replace the template's own `scripts` map, in order
    fn project_scripts(&self) -> &'static [(&'static str, &'static str)];

    /// Message used for the initial commit
    fn initial_commit_message(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_name: &str) -> Vec<String>;
}
