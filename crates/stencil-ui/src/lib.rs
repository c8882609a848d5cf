//! Terminal styling for stencil output.
//!
//! Provides Ayu-themed color helpers and terminal detection. Color is only
//! emitted when the terminal supports it and `NO_COLOR` is unset.

pub mod styles;
pub mod terminal;
