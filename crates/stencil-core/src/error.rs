//! Template error taxonomy.

/// Errors raised while parsing or validating a template document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The front-matter block is missing a delimiter or a field failed to parse.
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    /// A required metadata field is empty or absent.
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    /// Two templates in one store share the same name.
    #[error("duplicate template name: {0}")]
    DuplicateTemplateName(String),

    /// A section heading appears more than once in one template.
    #[error("duplicate section heading: {0}")]
    DuplicateSection(String),

    /// The document could not be read or is not valid UTF-8.
    #[error("unreadable document: {0}")]
    Unreadable(String),
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, TemplateError>;

impl TemplateError {
    /// Creates a [`TemplateError::MalformedMetadata`] from any displayable reason.
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::MalformedMetadata(reason.to_string())
    }

    /// Returns `true` if this is a [`TemplateError::MalformedMetadata`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedMetadata(_))
    }
}
