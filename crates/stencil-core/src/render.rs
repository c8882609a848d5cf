//! Rendering a template into the issue draft a platform would pre-fill.
//!
//! Templates may carry `{{variable}}` tokens in their title and body. Unknown
//! variables are left verbatim so a maintainer can see what was not filled.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::document::body_markdown;
use crate::template::Template;

/// Options for [`IssueDraft::from_template`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Title supplied by the reporter; replaces the placeholder part of a
    /// tagged template title.
    pub title: Option<String>,

    /// Values for `{{variable}}` tokens.
    pub vars: HashMap<String, String>,
}

/// A pre-filled issue, as produced from one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
    /// Name of the template the draft came from.
    pub template: String,
    pub title: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub body: String,
}

impl IssueDraft {
    /// Build a draft from a template.
    pub fn from_template(template: &Template, opts: &RenderOptions) -> Self {
        let title = match opts.title.as_deref() {
            Some(custom) => apply_title(&template.title, custom),
            None => template.title.clone(),
        };

        Self {
            template: template.name.clone(),
            title: substitute_vars(&title, &opts.vars),
            labels: template.label_list(),
            assignees: template.assignee_list(),
            body: substitute_vars(&body_markdown(template), &opts.vars),
        }
    }

    /// Markdown view of the draft: a `# title` line followed by the body.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n", self.title);
        if !self.labels.is_empty() {
            out.push_str(&format!("\nLabels: {}\n", self.labels.join(", ")));
        }
        if !self.assignees.is_empty() {
            out.push_str(&format!("Assignees: {}\n", self.assignees.join(", ")));
        }
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str(&self.body);
        }
        out
    }
}

/// Returns the tag part of a title like `[Feat]: Title` (`[Feat]:`).
pub fn title_prefix(title: &str) -> Option<&str> {
    if !title.starts_with('[') {
        return None;
    }
    let close = title.find(']')?;
    let end = if title[close + 1..].starts_with(':') {
        close + 2
    } else {
        close + 1
    };
    Some(&title[..end])
}

fn apply_title(template_title: &str, custom: &str) -> String {
    match title_prefix(template_title) {
        Some(prefix) if !custom.starts_with(prefix) => format!("{} {}", prefix, custom),
        _ => custom.to_string(),
    }
}

/// Collect every `{{variable}}` name used in a template, sorted.
pub fn extract_variables(template: &Template) -> Vec<String> {
    let mut vars = BTreeSet::new();
    scan_vars(&template.title, &mut vars);
    scan_vars(&template.preamble, &mut vars);
    for section in &template.sections {
        scan_vars(&section.body, &mut vars);
    }
    vars.into_iter().collect()
}

/// Replace `{{name}}` tokens with values from `vars`; unknown names stay as-is.
pub fn substitute_vars(text: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) if is_var_name(&after[..end]) => {
                match vars.get(&after[..end]) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + end + 4]),
                }
                rest = &after[end + 2..];
            }
            _ => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn scan_vars(text: &str, vars: &mut BTreeSet<String>) {
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) if is_var_name(&after[..end]) => {
                vars.insert(after[..end].to_string());
                rest = &after[end + 2..];
            }
            _ => rest = after,
        }
    }
}

fn is_var_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
