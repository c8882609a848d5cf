//! Core types for stencil issue templates.
//!
//! An issue template is a markdown document with a `---` delimited front-matter
//! block (name, about, title, labels, assignees) followed by `## ` sections.
//! This crate holds the [`template::Template`] record, the document codec,
//! validation and lint rules, and the rendering of a pre-filled issue draft.

pub mod document;
pub mod error;
pub mod render;
pub mod sections;
pub mod template;
pub mod validation;
