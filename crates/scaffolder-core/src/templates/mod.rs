//! Template copying and manifest customization
//!
//! This module provides:
//! - Recursive copying of the template tree with an exclusion list
//! - The fixed `.gitignore` written into every generated project
//! - `package.json` rewriting from a library manifest into an app manifest

pub mod copier;
pub mod manifest;

use crate::product::ProductConfig;

pub use copier::{copy_template, CopyError, CopyReport, ExclusionList};
pub use manifest::{customize_manifest, ManifestError, ManifestOverrides, PackageManifest};

/// Build the exclusion list for a product
pub fn exclusions_for<C: ProductConfig>(config: &C) -> ExclusionList {
    ExclusionList::new(config.excluded_entries().iter().copied())
}

/// Build the manifest overrides for a product and project name
pub fn overrides_for<C: ProductConfig>(config: &C, project_name: &str) -> ManifestOverrides {
    ManifestOverrides {
        name: project_name.to_string(),
        version: config.project_version().to_string(),
        description: config.project_description(project_name),
        scripts: config
            .project_scripts()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestProduct;

    #[test]
    fn test_overrides_follow_product() {
        let overrides = overrides_for(&TestProduct, "my-app");
        assert_eq!(overrides.name, "my-app");
        assert_eq!(overrides.version, "0.1.0");
        assert_eq!(overrides.description, "my-app generated for tests");
        assert_eq!(overrides.scripts.len(), 2);
    }

    #[test]
    fn test_exclusions_follow_product() {
        let exclusions = exclusions_for(&TestProduct);
        assert!(exclusions.is_excluded("index.js"));
        assert!(!exclusions.is_excluded("package.json"));
    }
}
