//! `stencil list` -- list the templates in the template directory.

use anyhow::Result;
use stencil_store::TemplateStore;

use crate::context::RuntimeContext;
use crate::output::{TemplateView, display_file, output_json, output_table};

/// Execute the `stencil list` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let store = ctx.load_store()?;
    let templates = store.templates();

    if ctx.json {
        let views: Vec<TemplateView> = templates
            .iter()
            .map(|t| TemplateView::from_template(t))
            .collect();
        output_json(&views);
    } else if templates.is_empty() {
        if !ctx.quiet {
            println!("No templates found in {}.", ctx.template_dir.display());
        }
    } else {
        let headers = &["NAME", "FILE", "TITLE", "ABOUT"];
        let rows: Vec<Vec<String>> = templates
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    t.source.as_deref().map(display_file).unwrap_or_default(),
                    t.title.clone(),
                    t.about.clone(),
                ]
            })
            .collect();
        output_table(headers, &rows);
    }

    Ok(())
}
