//! `stencil fmt` -- rewrite templates in canonical form.
//!
//! Canonical form is what [`to_document`] produces: known metadata keys in
//! a fixed order, extra keys after them, and one blank line between body
//! blocks. With `--check`, nothing is written and non-canonical files are
//! reported instead.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use stencil_core::document::to_document;
use stencil_store::TemplateStore;
use stencil_ui::styles::{render_pass, render_warn};
use tracing::debug;

use crate::cli::FmtArgs;
use crate::context::RuntimeContext;
use crate::output::{display_file, output_json};

/// Returned by `fmt --check` when at least one file is not canonical.
#[derive(Debug, thiserror::Error)]
#[error("{count} file(s) not in canonical form")]
pub struct CheckFailed {
    pub count: usize,
}

/// Execute the `stencil fmt` command.
pub fn run(ctx: &RuntimeContext, args: &FmtArgs) -> Result<()> {
    let store = ctx.load_store()?;

    let mut changed: Vec<(PathBuf, String)> = Vec::new();
    for template in store.templates() {
        let Some(path) = template.source.as_deref() else {
            continue;
        };
        let current = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let canonical = to_document(template)?;
        if current != canonical {
            debug!(path = %path.display(), "template is not canonical");
            changed.push((path.to_path_buf(), canonical));
        }
    }

    let files: Vec<String> = changed.iter().map(|(p, _)| display_file(p)).collect();

    if args.check {
        if ctx.json {
            output_json(&serde_json::json!({
                "check": true,
                "files": files,
            }));
        } else if !ctx.quiet {
            for file in &files {
                println!("{}", render_warn(&format!("would reformat {}", file)));
            }
        }
        if !changed.is_empty() {
            return Err(CheckFailed {
                count: changed.len(),
            }
            .into());
        }
        if !ctx.json && !ctx.quiet {
            println!("{}", render_pass("All templates are canonical."));
        }
        return Ok(());
    }

    for (path, canonical) in &changed {
        fs::write(path, canonical)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "check": false,
            "files": files,
        }));
    } else if !ctx.quiet {
        for file in &files {
            println!("formatted {}", file);
        }
        println!(
            "{}",
            render_pass(&format!("{} file(s) reformatted.", changed.len()))
        );
    }
    Ok(())
}
