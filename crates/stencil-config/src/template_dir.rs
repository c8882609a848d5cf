//! Discovery and creation of the issue template directory.
//!
//! By default templates live in `.github/ISSUE_TEMPLATE`. The directory is
//! resolved from an explicit path, from the location of `.stencil.yaml`, or
//! by walking up from the working directory.

use std::path::{Path, PathBuf};

use crate::config::{ConfigError, StencilConfig};

/// Template directory used when nothing else is configured.
pub const DEFAULT_TEMPLATE_DIR: &str = ".github/ISSUE_TEMPLATE";

/// Walk up the directory tree from `start` looking for `relative`.
///
/// Returns the first `<ancestor>/<relative>` that is a directory, or `None`
/// if the filesystem root is reached without finding one.
///
/// # Examples
///
/// ```no_run
/// use stencil_config::template_dir::{find_template_dir, DEFAULT_TEMPLATE_DIR};
/// use std::path::Path;
///
/// if let Some(dir) = find_template_dir(Path::new("."), Path::new(DEFAULT_TEMPLATE_DIR)) {
///     println!("Found templates at {}", dir.display());
/// }
/// ```
pub fn find_template_dir(start: &Path, relative: &Path) -> Option<PathBuf> {
    if relative.is_absolute() {
        return relative.is_dir().then(|| relative.to_path_buf());
    }
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.is_dir())
}

/// Resolve the template directory for a run.
///
/// Priority: `explicit` (flag or `STENCIL_DIR`) > `template-dir` relative to
/// the config file's directory > walking up from `cwd` > `cwd/<template-dir>`.
/// The result may not exist; loading reports that.
pub fn resolve_template_dir(
    explicit: Option<&Path>,
    config: &StencilConfig,
    config_file: Option<&Path>,
    cwd: &Path,
) -> PathBuf {
    if let Some(dir) = explicit {
        return if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            cwd.join(dir)
        };
    }

    if config.template_dir.is_absolute() {
        return config.template_dir.clone();
    }

    if let Some(root) = config_file.and_then(Path::parent) {
        return root.join(&config.template_dir);
    }

    find_template_dir(cwd, &config.template_dir).unwrap_or_else(|| cwd.join(&config.template_dir))
}

/// Ensure the template directory exists under `root`.
///
/// Returns the path to the directory.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if directory creation fails.
pub fn ensure_template_dir(root: &Path, relative: &Path) -> Result<PathBuf, ConfigError> {
    let dir = root.join(relative);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
