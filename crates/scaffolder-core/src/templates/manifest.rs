//! `package.json` rewriting for generated projects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Fields that only make sense for the published scaffolder package
pub const CLI_ONLY_FIELDS: &[&str] = &["bin", "files", "main", "module", "types", "sideEffects"];

/// Errors raised while customizing the manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A `package.json` with the fields we rewrite pulled out; everything else
/// is carried through untouched and in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub scripts: Map<String, Value>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PackageManifest {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Pretty-printed with two-space indentation and a trailing newline
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Turn the scaffolder's own manifest into an application manifest
    pub fn apply(&mut self, overrides: &ManifestOverrides) {
        self.name = Some(overrides.name.clone());
        self.version = Some(overrides.version.clone());
        self.description = Some(overrides.description.clone());
        self.private = Some(true);

        for field in CLI_ONLY_FIELDS {
            self.other.shift_remove(*field);
        }

        // Replaced wholesale, not merged
        self.scripts = overrides
            .scripts
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
    }
}

/// Values written into the generated manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOverrides {
    pub name: String,
    pub version: String,
    pub description: String,
    pub scripts: Vec<(String, String)>,
}

/// Rewrite `target_dir/package.json` in place
pub async fn customize_manifest(
    target_dir: &Path,
    overrides: &ManifestOverrides,
) -> Result<PackageManifest, ManifestError> {
    let path = target_dir.join("package.json");

    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;

    let mut manifest =
        PackageManifest::from_json(&content).map_err(|source| ManifestError::Parse {
            path: path.clone(),
            source,
        })?;

    manifest.apply(overrides);

    let rendered = manifest.to_json().map_err(ManifestError::Serialize)?;
    fs::write(&path, rendered)
        .await
        .map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE_MANIFEST: &str = r#"{
  "name": "create-starkon-template",
  "version": "2.4.1",
  "description": "Scaffolder",
  "bin": { "create-starkon-template": "./index.js" },
  "files": ["index.js", "src"],
  "main": "index.js",
  "module": "dist/index.mjs",
  "types": "dist/index.d.ts",
  "sideEffects": false,
  "scripts": {
    "dev": "next dev",
    "release": "np",
    "postinstall": "node scripts/setup.js"
  },
  "dependencies": { "next": "14.2.0", "react": "18.3.1" },
  "engines": { "node": ">=18" }
}"#;

    fn overrides() -> ManifestOverrides {
        ManifestOverrides {
            name: "my-app".to_string(),
            version: "0.1.0".to_string(),
            description: "my-app - generated".to_string(),
            scripts: vec![
                ("dev".to_string(), "next dev".to_string()),
                ("build".to_string(), "next build".to_string()),
                ("test".to_string(), "jest".to_string()),
            ],
        }
    }

    #[test]
    fn test_apply_sets_identity_fields() {
        let mut manifest = PackageManifest::from_json(SOURCE_MANIFEST).unwrap();
        manifest.apply(&overrides());

        assert_eq!(manifest.name.as_deref(), Some("my-app"));
        assert_eq!(manifest.version.as_deref(), Some("0.1.0"));
        assert_eq!(manifest.description.as_deref(), Some("my-app - generated"));
        assert_eq!(manifest.private, Some(true));
    }

    #[test]
    fn test_apply_strips_cli_fields() {
        let mut manifest = PackageManifest::from_json(SOURCE_MANIFEST).unwrap();
        manifest.apply(&overrides());

        for field in CLI_ONLY_FIELDS {
            assert!(!manifest.other.contains_key(*field), "{} kept", field);
        }
        assert!(manifest.other.contains_key("dependencies"));
        assert!(manifest.other.contains_key("engines"));
    }

    #[test]
    fn test_scripts_are_replaced_not_merged() {
        let mut manifest = PackageManifest::from_json(SOURCE_MANIFEST).unwrap();
        manifest.apply(&overrides());

        let keys: Vec<&str> = manifest.scripts.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["dev", "build", "test"]);
        assert!(!manifest.scripts.contains_key("release"));
        assert!(!manifest.scripts.contains_key("postinstall"));
    }

    #[test]
    fn test_minimal_manifest_gains_fields() {
        let mut manifest = PackageManifest::from_json("{}").unwrap();
        manifest.apply(&overrides());
        let json: Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();

        assert_eq!(json["name"], "my-app");
        assert_eq!(json["private"], true);
        assert_eq!(json["scripts"]["build"], "next build");
    }

    #[test]
    fn test_output_uses_two_space_indent() {
        let mut manifest = PackageManifest::from_json(SOURCE_MANIFEST).unwrap();
        manifest.apply(&overrides());
        let out = manifest.to_json().unwrap();

        assert!(out.starts_with("{\n  \"name\": \"my-app\""));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_unknown_fields_keep_their_order() {
        let manifest = PackageManifest::from_json(SOURCE_MANIFEST).unwrap();
        let keys: Vec<&str> = manifest.other.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["bin", "files", "main", "module", "types", "sideEffects", "dependencies", "engines"]
        );
    }

    #[tokio::test]
    async fn test_customize_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), SOURCE_MANIFEST).unwrap();

        customize_manifest(dir.path(), &overrides()).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        let json: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["name"], "my-app");
        assert!(json.get("bin").is_none());
        assert_eq!(json["dependencies"]["next"], "14.2.0");
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = customize_manifest(dir.path(), &overrides())
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[tokio::test]
    async fn test_malformed_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{ not json").unwrap();

        let err = customize_manifest(dir.path(), &overrides())
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
        // Left untouched
        assert_eq!(
            std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
            "{ not json"
        );
    }
}
