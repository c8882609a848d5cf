//! `stencil show` -- show one template: metadata, sections and variables.

use anyhow::Result;
use stencil_core::render::{extract_variables, title_prefix};
use stencil_core::template::Template;
use stencil_store::TemplateStore;
use stencil_ui::styles::{render_accent, render_category, render_muted};
use stencil_ui::terminal::terminal_width;

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `stencil show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let store = ctx.load_store()?;
    let template = store.resolve(&args.name)?;
    let variables = extract_variables(template);

    if ctx.json {
        let mut val = serde_json::to_value(template)?;
        if let Some(obj) = val.as_object_mut() {
            obj.insert("variables".to_string(), serde_json::to_value(&variables)?);
        }
        output_json(&val);
    } else {
        print!("{}", format_detail(template, &variables, terminal_width()));
    }

    Ok(())
}

/// Multi-line detail view.
fn format_detail(template: &Template, variables: &[String], width: usize) -> String {
    let mut lines = Vec::new();
    lines.push(render_accent(&template.name));
    if let Some(path) = &template.source {
        lines.push(render_muted(&path.display().to_string()));
    }
    lines.push(String::new());

    lines.push(format!("About:     {}", or_unset(&template.about)));
    let title = match title_prefix(&template.title) {
        Some(prefix) => format!("{} (tag {})", template.title, prefix),
        None => or_unset(&template.title),
    };
    lines.push(format!("Title:     {}", title));
    lines.push(format!("Labels:    {}", or_unset(&template.label_list().join(", "))));
    lines.push(format!("Assignees: {}", or_unset(&template.assignee_list().join(", "))));
    for (key, value) in &template.extra {
        if let Some(key) = key.as_str() {
            lines.push(format!("{}: {}", key, inline_value(value)));
        }
    }

    if !template.preamble.is_empty() {
        lines.push(String::new());
        lines.push(template.preamble.clone());
    }

    lines.push(String::new());
    lines.push(render_category("sections"));
    let rule = "\u{2500}".repeat(width.clamp(20, 60));
    if template.sections.is_empty() {
        lines.push(render_muted("(none)"));
    }
    for section in &template.sections {
        lines.push(format!("## {}", section.heading));
        if !section.body.is_empty() {
            lines.push(section.body.clone());
        }
        lines.push(render_muted(&rule));
    }

    lines.push(String::new());
    if variables.is_empty() {
        lines.push("No template variables found.".to_string());
    } else {
        lines.push(render_category("variables"));
        for var in variables {
            lines.push(format!("  {{{{{}}}}}", var));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn or_unset(value: &str) -> String {
    if value.is_empty() {
        render_muted("(unset)")
    } else {
        value.to_string()
    }
}

/// Renders an extra front-matter value on one line.
fn inline_value<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}
