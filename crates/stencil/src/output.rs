//! Output formatting helpers for the `stencil` CLI.
//!
//! Provides JSON output, table formatting and the JSON view model for
//! templates.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use stencil_core::template::Template;

/// A flat view of a template for `list --json`.
///
/// Labels and assignees are split into arrays; sections are reduced to
/// their headings.
#[derive(Debug, Serialize)]
pub struct TemplateView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub about: String,
    pub title: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub sections: Vec<String>,
}

impl TemplateView {
    pub fn from_template(template: &Template) -> Self {
        Self {
            name: template.name.clone(),
            file: template.source.as_deref().map(display_file),
            about: template.about.clone(),
            title: template.title.clone(),
            labels: template.label_list(),
            assignees: template.assignee_list(),
            sections: template.headings().into_iter().map(String::from).collect(),
        }
    }
}

/// File name of a path for display, falling back to the full path.
pub fn display_file(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are computed from the data for alignment; the last column
/// is not padded.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = handle.write_all(format_table(headers, rows).as_bytes());
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        if i < last && i < widths.len() {
            let pad = widths[i].saturating_sub(cell.chars().count());
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}
