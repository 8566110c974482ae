//! Project name validation

use std::fmt;
use thiserror::Error;

/// Names that collide with tooling or template directories
const RESERVED_NAMES: &[&str] = &["test", "react", "node_modules", ".git", "src", "public"];

/// Why a project name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Project name cannot be empty")]
    Empty,

    #[error("Project name can only contain letters, numbers, dots, hyphens and underscores")]
    InvalidCharacters,

    #[error("Project name '{0}' is reserved, please choose another name")]
    Reserved(String),
}

/// Check a candidate project name against the naming rules
pub fn validate_project_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(NameError::InvalidCharacters);
    }

    let lowered = name.to_lowercase();
    if RESERVED_NAMES.contains(&lowered.as_str()) {
        return Err(NameError::Reserved(name.to_string()));
    }

    Ok(())
}

/// A project name that passed [`validate_project_name`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        validate_project_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_names() {
        for name in ["my-app", "my_app", "app.v2", "MyApp", "a", "123"] {
            assert_eq!(validate_project_name(name), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(validate_project_name(""), Err(NameError::Empty));
        assert_eq!(validate_project_name("   "), Err(NameError::Empty));
    }

    #[test]
    fn test_rejects_invalid_characters() {
        for name in ["bad name!", "my app", "app/sub", "über", " padded "] {
            assert_eq!(
                validate_project_name(name),
                Err(NameError::InvalidCharacters),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_reserved_names_are_case_insensitive() {
        assert_eq!(
            validate_project_name("Test"),
            Err(NameError::Reserved("Test".to_string()))
        );
        assert!(validate_project_name("REACT").is_err());
        assert!(validate_project_name("node_modules").is_err());
        assert!(validate_project_name(".GIT").is_err());
        assert!(validate_project_name("Public").is_err());
    }

    #[test]
    fn test_reserved_list_is_not_extended() {
        // Only the listed names are reserved
        assert!(validate_project_name("node").is_ok());
        assert!(validate_project_name("npm").is_ok());
        assert!(validate_project_name("next").is_ok());
        assert!(validate_project_name("tests").is_ok());
    }

    #[test]
    fn test_reasons_are_readable() {
        let reason = validate_project_name("Test").unwrap_err().to_string();
        assert!(reason.contains("reserved"));

        let reason = validate_project_name("bad name!").unwrap_err().to_string();
        assert!(reason.contains("letters, numbers"));
    }

    #[test]
    fn test_project_name_parse() {
        let name = ProjectName::parse("my-app").unwrap();
        assert_eq!(name.as_str(), "my-app");
        assert_eq!(name.to_string(), "my-app");
        assert!(ProjectName::parse("src").is_err());
    }
}
