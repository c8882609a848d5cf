//! `stencil init` -- create the template directory with a starter feature
//! template, and a `.stencil.yaml` in the working directory unless one is
//! already in effect.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stencil_config::config::{CONFIG_FILE_NAME, StencilConfig, save_config};
use stencil_config::template_dir::ensure_template_dir;
use stencil_core::document::to_document;
use stencil_core::template::{CONVENTIONAL_SECTIONS, Section, Template};

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// File name of the starter template.
const STARTER_FILE: &str = "feature_request.md";

/// Execute the `stencil init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let dir = ensure_template_dir(&ctx.cwd, &ctx.template_dir)
        .with_context(|| format!("failed to create directory: {}", ctx.template_dir.display()))?;

    let mut created = Vec::new();
    let mut skipped = Vec::new();

    let template_path = dir.join(STARTER_FILE);
    if write_if_absent(&template_path, &to_document(&starter_template())?, args.force)? {
        created.push(template_path);
    } else {
        skipped.push(template_path);
    }

    let config_path = ctx
        .config_file
        .clone()
        .unwrap_or_else(|| ctx.cwd.join(CONFIG_FILE_NAME));
    if args.force || !config_path.exists() {
        let base = config_path.parent().unwrap_or(ctx.cwd.as_path());
        let config = StencilConfig {
            template_dir: config_template_dir(base, &dir),
            ..ctx.config.clone()
        };
        save_config(&config_path, &config)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        created.push(config_path);
    } else {
        skipped.push(config_path);
    }

    if ctx.json {
        let paths = |list: &[std::path::PathBuf]| -> Vec<String> {
            list.iter().map(|p| p.display().to_string()).collect()
        };
        output_json(&serde_json::json!({
            "directory": dir.display().to_string(),
            "created": paths(&created),
            "skipped": paths(&skipped),
        }));
    } else if !ctx.quiet {
        for path in &created {
            println!("Created {}", path.display());
        }
        for path in &skipped {
            println!("Skipped {} (already exists, use --force to overwrite)", path.display());
        }
        println!();
        println!("Run `stencil lint` to check your templates.");
    }

    Ok(())
}

/// The starter feature-request template.
fn starter_template() -> Template {
    let sections = CONVENTIONAL_SECTIONS
        .iter()
        .map(|heading| Section::new(*heading, format!("<!-- {} -->", guidance(heading))))
        .collect();
    Template {
        name: "Feature issue template".into(),
        about: "Suggest a new feature for this project".into(),
        title: "[Feat]: Title".into(),
        sections,
        ..Template::default()
    }
}

fn guidance(heading: &str) -> &'static str {
    match heading {
        "Overview" => "Briefly describe the feature and the problem it solves.",
        "Goals" => "List what this feature should achieve.",
        "Implementation Details" => "Outline how the feature could be built.",
        "Challenges" => "Note risks, open questions or trade-offs.",
        "Related Issues" => "Link related issues or pull requests.",
        _ => "Anything else reviewers should know.",
    }
}

/// Template directory as stored in the config file: relative to the config
/// file's directory when it lies inside it.
fn config_template_dir(base: &Path, dir: &Path) -> std::path::PathBuf {
    dir.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| dir.to_path_buf())
}

/// Write `content` to `path` unless it exists and `force` is off.
fn write_if_absent(path: &Path, content: &str, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_core::document::parse_document;
    use stencil_core::validation::{LintRules, lint};

    #[test]
    fn starter_template_is_lint_clean() {
        let t = starter_template();
        assert!(lint(&t, &LintRules::default()).is_empty());
    }

    #[test]
    fn starter_template_round_trips() {
        let t = starter_template();
        let parsed = parse_document(&to_document(&t).unwrap()).unwrap();
        assert_eq!(parsed, t);
        assert_eq!(
            parsed.section("Goals").map(|s| s.body.as_str()),
            Some("<!-- List what this feature should achieve. -->")
        );
    }

    #[test]
    fn config_dir_is_relative_inside_cwd() {
        let cwd = Path::new("/work/repo");
        assert_eq!(
            config_template_dir(cwd, &cwd.join(".github/ISSUE_TEMPLATE")),
            Path::new(".github/ISSUE_TEMPLATE")
        );
        assert_eq!(
            config_template_dir(cwd, Path::new("/elsewhere/tpl")),
            Path::new("/elsewhere/tpl")
        );
    }
}
