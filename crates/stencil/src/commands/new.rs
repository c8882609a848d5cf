//! `stencil new` -- scaffold a new template file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use stencil_config::config::StencilConfig;
use stencil_config::template_dir::ensure_template_dir;
use stencil_core::document::to_document;
use stencil_core::error::TemplateError;
use stencil_core::template::{Section, Template};
use stencil_core::validation::validate;
use stencil_store::{TemplateSet, TemplateStore};

use crate::cli::NewArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `stencil new` command.
pub fn run(ctx: &RuntimeContext, args: &NewArgs) -> Result<()> {
    let template = build_template(args, &ctx.config);
    validate(&template)?;

    let dir = &ctx.template_dir;
    let path = dir.join(file_name(&args.file));
    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if dir.is_dir() {
        // Broken siblings are lint's business; only the name matters here.
        let (existing, _) = TemplateSet::load_dir_lenient(dir)?;
        if let Ok(other) = existing.get(&template.name) {
            if other.source.as_deref() != Some(path.as_path()) {
                return Err(TemplateError::DuplicateTemplateName(template.name).into());
            }
        }
    }

    ensure_template_dir(&ctx.cwd, dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    fs::write(&path, to_document(&template)?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "created": path.display().to_string(),
            "name": template.name,
        }));
    } else if !ctx.quiet {
        println!("Created {}", path.display());
    }
    Ok(())
}

/// Assemble the new template from flags, falling back to config defaults.
fn build_template(args: &NewArgs, config: &StencilConfig) -> Template {
    let headings: Vec<String> = match &args.sections {
        Some(list) => list
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => config.lint.expected_sections.clone(),
    };

    Template {
        name: args.name.trim().to_string(),
        about: args.about.clone(),
        title: args.title.clone(),
        labels: args
            .labels
            .clone()
            .unwrap_or_else(|| config.new.default_labels.clone()),
        assignees: args
            .assignees
            .clone()
            .unwrap_or_else(|| config.new.default_assignees.clone()),
        sections: headings
            .into_iter()
            .map(|h| Section::new(h, ""))
            .collect(),
        ..Template::default()
    }
}

/// `feature_request` -> `feature_request.md`; names with an extension are kept.
fn file_name(stem: &str) -> PathBuf {
    let path = Path::new(stem);
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(name: &str) -> NewArgs {
        NewArgs {
            file: "feature_request".into(),
            name: name.into(),
            about: String::new(),
            title: String::new(),
            labels: None,
            assignees: None,
            sections: None,
            force: false,
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let mut config = StencilConfig::default();
        config.new.default_labels = "enhancement".into();
        config.new.default_assignees = "SL9-1994".into();
        let t = build_template(&args("Feature issue template"), &config);
        assert_eq!(t.labels, "enhancement");
        assert_eq!(t.assignees, "SL9-1994");
        assert_eq!(t.headings().len(), config.lint.expected_sections.len());
        assert!(t.sections.iter().all(|s| s.body.is_empty()));
    }

    #[test]
    fn flags_override_config() {
        let mut config = StencilConfig::default();
        config.new.default_labels = "enhancement".into();
        let mut a = args("Bug");
        a.labels = Some(String::new());
        a.sections = Some(vec!["Steps".into(), " ".into(), "Expected".into()]);
        let t = build_template(&a, &config);
        assert_eq!(t.labels, "");
        assert_eq!(t.headings(), vec!["Steps", "Expected"]);
    }

    #[test]
    fn blank_name_fails_validation() {
        let t = build_template(&args("  "), &StencilConfig::default());
        assert_eq!(
            validate(&t),
            Err(TemplateError::MissingRequiredField("name".into()))
        );
    }

    #[test]
    fn file_name_adds_markdown_extension() {
        assert_eq!(file_name("feature_request"), PathBuf::from("feature_request.md"));
        assert_eq!(file_name("bug.markdown"), PathBuf::from("bug.markdown"));
    }
}
