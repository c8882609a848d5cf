//! Store error types.

use std::path::PathBuf;

use stencil_core::error::TemplateError;

/// A template failure attributed to the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {error}", .path.display())]
pub struct FileError {
    /// Source document path (or the label given to an in-memory document).
    pub path: PathBuf,
    #[source]
    pub error: TemplateError,
}

/// Errors that can occur while loading or querying a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No template with the requested name exists.
    #[error("template not found: {name}")]
    NotFound {
        /// The name or file stem that was looked up.
        name: String,
    },

    /// The template directory does not exist.
    #[error("template directory not found: {}", .0.display())]
    DirNotFound(PathBuf),

    /// One or more documents failed to parse or validate.
    #[error("{} template file(s) failed to load", .0.len())]
    Load(Vec<FileError>),

    /// Reading the template directory failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the store crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Creates a [`StoreError::NotFound`] for the given name.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns `true` if this is a [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Per-file failures carried by a [`StoreError::Load`], empty otherwise.
    pub fn file_errors(&self) -> &[FileError] {
        match self {
            Self::Load(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_counts_files() {
        let err = StoreError::Load(vec![FileError {
            path: PathBuf::from("bug.md"),
            error: TemplateError::MissingRequiredField("name".into()),
        }]);
        assert_eq!(err.to_string(), "1 template file(s) failed to load");
        assert_eq!(
            err.file_errors()[0].to_string(),
            "bug.md: missing required field: name"
        );
        assert!(!err.is_not_found());
        assert!(StoreError::not_found("x").is_not_found());
    }

    #[test]
    fn file_error_exposes_template_error_as_source() {
        use std::error::Error;

        let err = FileError {
            path: PathBuf::from("broken.md"),
            error: TemplateError::malformed("missing closing delimiter"),
        };
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            "malformed metadata: missing closing delimiter"
        );
        assert!(source.is::<TemplateError>());
    }
}
