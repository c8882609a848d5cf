//! Configuration management for stencil.
//!
//! This crate handles loading and saving `.stencil.yaml` files, layering
//! `STENCIL_` environment overrides on top, and discovering the issue
//! template directory in the filesystem.

pub mod config;
pub mod template_dir;
