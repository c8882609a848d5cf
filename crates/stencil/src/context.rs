//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: the
//! resolved configuration, the template directory and the global flags.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use stencil_config::config::{StencilConfig, find_config_file, load_config};
use stencil_config::template_dir::resolve_template_dir;
use stencil_store::{FileError, TemplateSet};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Working directory the command was started from.
    pub cwd: PathBuf,

    /// Config file in effect, if one was given or discovered.
    pub config_file: Option<PathBuf>,

    /// Layered configuration (file + environment).
    pub config: StencilConfig,

    /// Resolved template directory (may not exist yet).
    pub template_dir: PathBuf,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Config file priority: `--config` > `.stencil.yaml` found walking up from
    /// the working directory > none (defaults plus `STENCIL_` environment).
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to get current directory")?;

        let config_file = match &global.config {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                Some(path)
            }
            None => find_config_file(&cwd),
        };

        let config = load_config(config_file.as_deref()).with_context(|| match &config_file {
            Some(path) => format!("failed to load config from {}", path.display()),
            None => "failed to load config from environment".to_string(),
        })?;

        let template_dir =
            resolve_template_dir(global.dir.as_deref(), &config, config_file.as_deref(), &cwd);
        debug!(
            config = ?config_file,
            template_dir = %template_dir.display(),
            "resolved runtime context"
        );

        Ok(Self {
            cwd,
            config_file,
            config,
            template_dir,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// Load the template store, failing if any document is invalid.
    pub fn load_store(&self) -> Result<TemplateSet> {
        TemplateSet::load_dir(&self.template_dir).with_context(|| {
            format!(
                "failed to load templates from {}",
                self.template_dir.display()
            )
        })
    }

    /// Load the template store, keeping valid templates and returning the
    /// failures of the rest.
    pub fn load_store_lenient(&self) -> Result<(TemplateSet, Vec<FileError>)> {
        TemplateSet::load_dir_lenient(&self.template_dir).with_context(|| {
            format!(
                "failed to load templates from {}",
                self.template_dir.display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(dir: Option<PathBuf>, config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            dir,
            config,
            json: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn explicit_dir_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = RuntimeContext::from_global_args(&global(Some(tmp.path().to_path_buf()), None))
            .unwrap();
        assert_eq!(ctx.template_dir, tmp.path());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.yaml");
        let err = RuntimeContext::from_global_args(&global(None, Some(missing))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_sets_template_root() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = tmp.path().join("custom.yaml");
        std::fs::write(&cfg, "template-dir: tpl\n").unwrap();
        let ctx = RuntimeContext::from_global_args(&global(None, Some(cfg))).unwrap();
        assert_eq!(ctx.template_dir, tmp.path().join("tpl"));
    }
}
