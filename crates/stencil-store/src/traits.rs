//! The read-only template store contract.

use stencil_core::template::Template;

use crate::error::{Result, StoreError};

/// Read-only access to a set of named templates.
pub trait TemplateStore {
    /// Template identifiers, sorted.
    fn list(&self) -> Vec<&str>;

    /// Looks up a template by its `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no template has that name.
    fn get(&self, name: &str) -> Result<&Template>;

    /// All templates in identifier order.
    fn templates(&self) -> Vec<&Template>;

    /// Looks up a template by name, falling back to the file stem of its
    /// source document (`feature_request` for `feature_request.md`).
    fn resolve(&self, key: &str) -> Result<&Template> {
        match self.get(key) {
            Ok(t) => Ok(t),
            Err(e) if e.is_not_found() => self
                .templates()
                .into_iter()
                .find(|t| t.file_stem() == Some(key))
                .ok_or_else(|| StoreError::not_found(key)),
            Err(e) => Err(e),
        }
    }
}
