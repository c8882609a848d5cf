//! Template store for stencil.
//!
//! A store holds a set of named templates and exposes read-only lookup via
//! the [`TemplateStore`] trait. [`TemplateSet`] is the in-memory
//! implementation, built from a template directory or from documents.

pub mod error;
pub mod set;
pub mod traits;

pub use error::{FileError, Result, StoreError};
pub use set::TemplateSet;
pub use traits::TemplateStore;
