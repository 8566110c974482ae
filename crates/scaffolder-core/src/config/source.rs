//! Template source directory lookup

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Manifest that marks the root of the installed package
const TEMPLATE_MARKER: &str = "package.json";

/// The fields of an ancestor's `package.json` that identify the installed CLI
#[derive(Debug, Deserialize)]
struct InstallManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bin: Option<Value>,
}

impl InstallManifest {
    /// True when the manifest is this product's package, or when its `bin`
    /// field points at a command named like the executable
    fn belongs_to(&self, package_name: &str, exe_name: Option<&str>) -> bool {
        if self.name.as_deref() == Some(package_name) {
            return true;
        }
        let Some(exe_name) = exe_name else {
            return false;
        };
        match &self.bin {
            // A string `bin` is installed under the package name
            Some(Value::String(_)) => self.name.as_deref() == Some(exe_name),
            Some(Value::Object(commands)) => commands.contains_key(exe_name),
            _ => false,
        }
    }
}

/// Resolve where templates are copied from.
///
/// Order: explicit `--template-dir`, then the product's environment
/// variable, then the install directory of the running executable.
pub fn resolve_template_dir<C: ProductConfig>(
    config: &C,
    explicit: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return checked(dir.to_path_buf());
    }

    if let Ok(dir) = std::env::var(config.template_dir_env()) {
        if !dir.trim().is_empty() {
            return checked(PathBuf::from(dir)).with_context(|| {
                format!("Invalid {} value", config.template_dir_env())
            });
        }
    }

    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    find_install_dir(&exe, config.package_name()).with_context(|| {
        format!(
            "Could not find the template files next to {}. Set {} or pass --template-dir",
            exe.display(),
            config.template_dir_env()
        )
    })
}

/// Nearest ancestor of `exe` whose `package.json` belongs to `package_name`.
///
/// Unrelated or unreadable manifests along the way are skipped, so a stray
/// `package.json` in a home or workspace directory is never taken for the
/// template tree.
pub fn find_install_dir(exe: &Path, package_name: &str) -> Result<PathBuf> {
    let exe_name = exe.file_stem().and_then(|stem| stem.to_str());

    exe.ancestors()
        .skip(1)
        .find(|dir| {
            read_install_manifest(&dir.join(TEMPLATE_MARKER))
                .is_some_and(|manifest| manifest.belongs_to(package_name, exe_name))
        })
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No {} for {} found above {}",
                TEMPLATE_MARKER,
                package_name,
                exe.display()
            )
        })
}

fn read_install_manifest(path: &Path) -> Option<InstallManifest> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn checked(dir: PathBuf) -> Result<PathBuf> {
    if !dir.is_dir() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestProduct;

    #[test]
    fn test_explicit_dir_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let resolved = resolve_template_dir(&TestProduct, Some(tmp.path())).unwrap();
        assert_eq!(resolved, tmp.path());
    }

    #[test]
    fn test_explicit_dir_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(resolve_template_dir(&TestProduct, Some(&missing)).is_err());
    }

    fn write_manifest(dir: &Path, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join("package.json"), content).unwrap();
    }

    #[test]
    fn test_find_install_dir_walks_up() {
        let tmp = tempfile::tempdir().unwrap();
        let package = tmp.path().join("node_modules/create-test-app");
        write_manifest(&package, r#"{"name":"create-test-app","version":"1.0.0"}"#);
        let exe = package.join("bin/create-test-app");

        assert_eq!(find_install_dir(&exe, "create-test-app").unwrap(), package);
    }

    #[test]
    fn test_find_install_dir_matches_bin_entry() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            tmp.path(),
            r#"{"name":"@scope/templates","bin":{"create-test-app":"index.js"}}"#,
        );
        let exe = tmp.path().join("target/release/create-test-app");

        assert_eq!(find_install_dir(&exe, "create-test-app").unwrap(), tmp.path());
    }

    #[test]
    fn test_find_install_dir_skips_unrelated_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(tmp.path(), r#"{"name":"create-test-app"}"#);
        let project = tmp.path().join("work/scratch");
        write_manifest(&project, r#"{"name":"scratch","bin":{"other-tool":"cli.js"}}"#);
        let exe = project.join("bin/create-test-app");

        assert_eq!(find_install_dir(&exe, "create-test-app").unwrap(), tmp.path());
    }

    #[test]
    fn test_find_install_dir_ignores_home_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        write_manifest(&home, r#"{"name":"scratch"}"#);
        std::fs::write(home.join("secrets.env"), "TOKEN=hunter2").unwrap();
        let bin_dir = home.join(".cargo/bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        let exe = bin_dir.join("create-test-app");

        if let Ok(found) = find_install_dir(&exe, "create-test-app") {
            assert!(!found.starts_with(tmp.path()));
        }
    }

    #[test]
    fn test_find_install_dir_skips_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(tmp.path(), r#"{"name":"create-test-app"}"#);
        let inner = tmp.path().join("broken");
        write_manifest(&inner, "not json");
        let exe = inner.join("create-test-app");

        assert_eq!(find_install_dir(&exe, "create-test-app").unwrap(), tmp.path());
    }

    #[test]
    fn test_find_install_dir_without_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let exe = tmp.path().join("bin/create-test-app");
        assert!(find_install_dir(&exe, "create-test-app").is_err());
    }
}
