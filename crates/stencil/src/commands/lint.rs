//! `stencil lint` -- validate every template and check section conventions.
//!
//! Reports, per file:
//! - parse failures (missing delimiters, malformed fields, empty `name`)
//! - duplicate template names and duplicate section headings
//! - missing or out-of-order expected sections, an empty `about`
//! - with `--strict`, headings outside the expected section family

use anyhow::Result;
use serde::Serialize;
use stencil_core::validation::{Finding, LintRules, lint};
use stencil_store::TemplateStore;
use stencil_ui::styles::{render_fail, render_pass, render_pass_icon};

use crate::cli::LintArgs;
use crate::context::RuntimeContext;
use crate::output::{display_file, output_json};

/// Returned when lint finds errors (or warnings under `--deny-warnings`).
#[derive(Debug, thiserror::Error)]
#[error("lint failed: {errors} error(s), {warnings} warning(s)")]
pub struct LintFailed {
    pub errors: usize,
    pub warnings: usize,
}

/// Findings for one template file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<String>,
    findings: Vec<Finding>,
}

/// Execute the `stencil lint` command.
pub fn run(ctx: &RuntimeContext, args: &LintArgs) -> Result<()> {
    let (store, failures) = ctx.load_store_lenient()?;

    let mut rules: LintRules = ctx.config.lint.rules();
    rules.strict_sections |= args.strict;
    let deny_warnings = args.deny_warnings || ctx.config.lint.deny_warnings;

    let mut reports: Vec<FileReport> = failures
        .iter()
        .map(|f| FileReport {
            file: display_file(&f.path),
            template: None,
            findings: vec![Finding::from_error(&f.error)],
        })
        .collect();
    for template in store.templates() {
        reports.push(FileReport {
            file: template
                .source
                .as_deref()
                .map(display_file)
                .unwrap_or_default(),
            template: Some(template.name.clone()),
            findings: lint(template, &rules),
        });
    }
    reports.sort_by(|a, b| a.file.cmp(&b.file));

    let all = reports.iter().flat_map(|r| r.findings.iter());
    let errors = all.clone().filter(|f| f.is_error()).count();
    let warnings = all.filter(|f| !f.is_error()).count();

    if ctx.json {
        output_json(&serde_json::json!({
            "directory": ctx.template_dir.display().to_string(),
            "files": reports,
            "errors": errors,
            "warnings": warnings,
        }));
    } else {
        print_reports(ctx, &reports);
        if !ctx.quiet {
            let summary = format!(
                "{} file(s) checked: {} error(s), {} warning(s)",
                reports.len(),
                errors,
                warnings
            );
            if errors > 0 {
                println!("{}", render_fail(&summary));
            } else {
                println!("{} {}", render_pass_icon(), render_pass(&summary));
            }
        }
    }

    if errors > 0 || (deny_warnings && warnings > 0) {
        return Err(LintFailed { errors, warnings }.into());
    }
    Ok(())
}

fn print_reports(ctx: &RuntimeContext, reports: &[FileReport]) {
    for report in reports {
        if report.findings.is_empty() {
            if ctx.verbose {
                println!("{}: ok", report.file);
            }
            continue;
        }
        match &report.template {
            Some(name) => println!("{} ({})", report.file, name),
            None => println!("{}", report.file),
        }
        for finding in &report.findings {
            println!("  {}", stencil_ui::styles::render_finding(finding));
        }
        println!();
    }
}
