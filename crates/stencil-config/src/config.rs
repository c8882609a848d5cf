//! Configuration types and loading for stencil.
//!
//! The main entry point is [`StencilConfig`], which represents the contents of
//! `.stencil.yaml`. Configuration is loaded with [`load_config`], which layers
//! `STENCIL_` environment variables over the file, and saved with
//! [`save_config`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};
use stencil_core::template::CONVENTIONAL_SECTIONS;
use stencil_core::validation::LintRules;
use thiserror::Error;

use crate::template_dir::DEFAULT_TEMPLATE_DIR;

/// File name of the stencil configuration file.
pub const CONFIG_FILE_NAME: &str = ".stencil.yaml";

/// Prefix for environment overrides. Nested keys use `__`
/// (`STENCIL_LINT__STRICT_SECTIONS=true`).
pub const ENV_PREFIX: &str = "STENCIL_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized.
    #[error("failed to write config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The layered configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Extract(Box<figment::Error>),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Lint configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Headings every template is expected to carry, in order.
    #[serde(default = "default_expected_sections", rename = "expected-sections")]
    pub expected_sections: Vec<String>,

    /// Warn about headings outside `expected-sections`.
    #[serde(default, rename = "strict-sections")]
    pub strict_sections: bool,

    /// Warn when a template's `about` is empty.
    #[serde(default = "default_true", rename = "require-about")]
    pub require_about: bool,

    /// Treat warnings as failures in `stencil lint`.
    #[serde(default, rename = "deny-warnings")]
    pub deny_warnings: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            expected_sections: default_expected_sections(),
            strict_sections: false,
            require_about: true,
            deny_warnings: false,
        }
    }
}

impl LintConfig {
    /// The lint rules this section describes.
    pub fn rules(&self) -> LintRules {
        LintRules {
            expected_sections: self.expected_sections.clone(),
            strict_sections: self.strict_sections,
            require_about: self.require_about,
        }
    }
}

fn default_expected_sections() -> Vec<String> {
    CONVENTIONAL_SECTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// Defaults for `stencil new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewConfig {
    /// Comma-separated labels for new templates.
    #[serde(default, rename = "default-labels")]
    pub default_labels: String,

    /// Comma-separated assignees for new templates.
    #[serde(default, rename = "default-assignees")]
    pub default_assignees: String,
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full stencil configuration, corresponding to `.stencil.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified file
/// yields sensible values for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StencilConfig {
    /// Template directory, relative to the directory holding the config file.
    #[serde(default = "default_template_dir", rename = "template-dir")]
    pub template_dir: PathBuf,

    /// Lint configuration.
    #[serde(default)]
    pub lint: LintConfig,

    /// Scaffolding defaults.
    #[serde(default)]
    pub new: NewConfig,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            lint: LintConfig::default(),
            new: NewConfig::default(),
        }
    }
}

fn default_template_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_DIR)
}

impl StencilConfig {
    /// Check values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty template directory
    /// or a blank or repeated expected section.
    pub fn validate(&self) -> Result<()> {
        if self.template_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "template-dir".into(),
                reason: "must not be empty".into(),
            });
        }
        let mut seen = HashSet::new();
        for heading in &self.lint.expected_sections {
            if heading.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "lint.expected-sections".into(),
                    reason: "section headings must not be blank".into(),
                });
            }
            if !seen.insert(heading.as_str()) {
                return Err(ConfigError::InvalidValue {
                    key: "lint.expected-sections".into(),
                    reason: format!("'{}' is listed twice", heading),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the layered configuration: the YAML file (if any), then
/// `STENCIL_` environment variables.
///
/// A missing or empty file contributes nothing.
pub fn figment(config_file: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::new();

    if let Some(path) = config_file {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            if !content.trim().is_empty() {
                figment = figment.merge(Yaml::string(&content));
            }
        }
    }

    Ok(figment.merge(
        Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replace("__", ".").replace('_', "-").into()),
    ))
}

/// Load configuration from `config_file` with environment overrides.
///
/// If the file does not exist, defaults (plus environment) are returned.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// [`ConfigError::Extract`] if it or the environment holds invalid values, or
/// [`ConfigError::InvalidValue`] if validation fails.
pub fn load_config(config_file: Option<&Path>) -> Result<StencilConfig> {
    let config: StencilConfig = figment(config_file)?.extract()?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to `path`, creating parent directories as needed.
pub fn save_config(path: &Path, config: &StencilConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Walk up from `start` looking for a `.stencil.yaml` file.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = StencilConfig::default();
        assert_eq!(cfg.template_dir, PathBuf::from(".github/ISSUE_TEMPLATE"));
        assert_eq!(cfg.lint.expected_sections.len(), 6);
        assert!(cfg.lint.require_about);
        assert!(!cfg.lint.strict_sections);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config_returns_default() {
        Jail::expect_with(|_jail| {
            let cfg = load_config(Some(Path::new("/nonexistent/.stencil.yaml"))).unwrap();
            assert_eq!(cfg, StencilConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(".stencil.yaml", "lint:\n  strict-sections: true\n")?;
            let cfg = load_config(Some(Path::new(".stencil.yaml"))).unwrap();
            assert!(cfg.lint.strict_sections);
            assert!(cfg.lint.require_about);
            assert_eq!(cfg.template_dir, PathBuf::from(".github/ISSUE_TEMPLATE"));
            Ok(())
        });
    }

    #[test]
    fn test_empty_file_is_default() {
        Jail::expect_with(|jail| {
            jail.create_file(".stencil.yaml", "\n")?;
            let cfg = load_config(Some(Path::new(".stencil.yaml"))).unwrap();
            assert_eq!(cfg, StencilConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".stencil.yaml", "template-dir: templates\n")?;
            jail.set_env("STENCIL_TEMPLATE_DIR", "other");
            jail.set_env("STENCIL_LINT__DENY_WARNINGS", "true");
            let cfg = load_config(Some(Path::new(".stencil.yaml"))).unwrap();
            assert_eq!(cfg.template_dir, PathBuf::from("other"));
            assert!(cfg.lint.deny_warnings);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                ".stencil.yaml",
                "lint:\n  expected-sections: [Overview, Overview]\n",
            )?;
            let err = load_config(Some(Path::new(".stencil.yaml"))).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
            Ok(())
        });
    }

    #[test]
    fn test_bad_type_is_extract_error() {
        Jail::expect_with(|jail| {
            jail.create_file(".stencil.yaml", "lint:\n  strict-sections: [1, 2]\n")?;
            let err = load_config(Some(Path::new(".stencil.yaml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Extract(_)), "{err}");
            Ok(())
        });
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut cfg = StencilConfig::default();
        cfg.new.default_labels = "enhancement".to_string();
        cfg.lint.expected_sections = vec!["Overview".into(), "Goals".into()];

        save_config(&path, &cfg).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: StencilConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_lint_rules_from_config() {
        let mut lint = LintConfig::default();
        lint.strict_sections = true;
        let rules = lint.rules();
        assert!(rules.strict_sections);
        assert_eq!(rules.expected_sections, lint.expected_sections);
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        let child = dir.path().join("a").join("b");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_config_file(&child).unwrap();
        assert_eq!(
            found.canonicalize().unwrap(),
            dir.path().join(CONFIG_FILE_NAME).canonicalize().unwrap()
        );
    }
}
