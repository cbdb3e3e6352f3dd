//! Analysis configuration.
//!
//! A config file is plain YAML; every field is optional:
//!
//! ```yaml
//! root: ./web
//! extensions: [ts, tsx, js]
//! include_dev_dependencies: false
//! extra_packages: ["@internal/ui"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::manifest::PackageJson;
use crate::resolver::Resolver;
use crate::types::DEFAULT_EXTENSIONS;

/// Conventional name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "modgraph.yaml";

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root; module identities are relative to it
    pub root: PathBuf,

    /// Recognized source extensions, highest priority first, without dots
    pub extensions: Vec<String>,

    /// Whether `devDependencies` count as declared packages
    pub include_dev_dependencies: bool,

    /// Package names treated as declared in addition to the manifest
    pub extra_packages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            include_dev_dependencies: true,
            extra_packages: Vec::new(),
        }
    }
}

impl Config {
    /// Default configuration rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is malformed or a value is
    /// invalid.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// A relative `root` is taken relative to the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if its content is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;
        if config.root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.root = base.join(&config.root);
        }
        Ok(config)
    }

    /// Write the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that deserialize fine but cannot drive an analysis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(Error::Config(
                "extensions must name at least one extension".to_string(),
            ));
        }

        for ext in &self.extensions {
            if ext.is_empty() {
                return Err(Error::Config("extensions must not be empty strings".to_string()));
            }
            if ext.starts_with('.') {
                return Err(Error::Config(format!(
                    "extension '{ext}' must be given without a leading dot"
                )));
            }
        }

        Ok(())
    }

    /// Resolver using this configuration's extension priority.
    #[must_use]
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.extensions.iter().cloned())
    }

    /// Manifest reader honoring `include_dev_dependencies`.
    #[must_use]
    pub fn package_json(&self) -> PackageJson {
        PackageJson {
            include_dev_dependencies: self.include_dev_dependencies,
        }
    }

    /// Root as an absolute path, relative roots taken from the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the current directory is needed but
    /// unavailable.
    pub fn absolute_root(&self) -> Result<PathBuf> {
        if self.root.is_absolute() {
            Ok(crate::paths::normalize(&self.root))
        } else {
            let cwd = std::env::current_dir()?;
            Ok(crate::paths::normalize(&cwd.join(&self.root)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn default_uses_standard_extensions() {
        let config = Config::default();

        assert_eq!(config.extensions, DEFAULT_EXTENSIONS);
        assert!(config.include_dev_dependencies);
        assert!(config.extra_packages.is_empty());
    }

    #[test]
    fn empty_yaml_is_default_config() {
        let config = Config::from_yaml_str("{}").expect("should parse");

        assert_eq!(config.extensions, Config::default().extensions);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "extensions: [js, ts]\nextra_packages: ['@internal/ui']\n";

        let config = Config::from_yaml_str(yaml).expect("should parse");

        assert_eq!(config.extensions, vec!["js", "ts"]);
        assert_eq!(config.extra_packages, vec!["@internal/ui"]);
        assert!(config.include_dev_dependencies);
        assert_eq!(config.resolver().extensions(), ["js", "ts"]);
    }

    #[rstest]
    #[case::empty_list("extensions: []", "at least one")]
    #[case::leading_dot("extensions: [.ts]", "leading dot")]
    #[case::empty_string("extensions: ['']", "empty strings")]
    #[case::wrong_type("include_dev_dependencies: maybe", "configuration error")]
    fn invalid_yaml_is_rejected(#[case] yaml: &str, #[case] expected_error: &str) {
        let result = Config::from_yaml_str(yaml);

        let err_msg = result.expect_err("config should be rejected").to_string();
        assert!(
            err_msg.contains(expected_error),
            "Expected error to contain '{expected_error}', got: '{err_msg}'"
        );
    }

    #[test]
    fn package_json_follows_dev_dependency_flag() {
        let config = Config {
            include_dev_dependencies: false,
            ..Config::new("/repo")
        };

        assert!(!config.package_json().include_dev_dependencies);
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        let original = Config {
            extensions: vec!["ts".to_string(), "js".to_string()],
            extra_packages: vec!["react".to_string()],
            ..Config::new(temp_dir.path())
        };

        original.save(&config_path).expect("failed to save");
        let loaded = Config::load(&config_path).expect("failed to load");

        assert_eq!(loaded, original);
    }

    #[test]
    fn load_resolves_relative_root_against_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "root: web\n").expect("failed to write config");

        let config = Config::load(&config_path).expect("failed to load");

        assert_eq!(config.root, temp_dir.path().join("web"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");

        let result = Config::load(&temp_dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn absolute_root_normalizes() {
        let config = Config::new("/repo/web/../app");

        assert_eq!(
            config.absolute_root().expect("absolute root needs no cwd"),
            PathBuf::from("/repo/app")
        );
    }
}
