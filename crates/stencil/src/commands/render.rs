//! `stencil render` -- print the issue a template pre-fills.

use std::collections::HashMap;

use anyhow::{Result, bail};
use stencil_core::render::{IssueDraft, RenderOptions};
use stencil_store::TemplateStore;

use crate::cli::RenderArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `stencil render` command.
pub fn run(ctx: &RuntimeContext, args: &RenderArgs) -> Result<()> {
    let vars = parse_vars(&args.vars)?;
    let store = ctx.load_store()?;
    let template = store.resolve(&args.name)?;

    let opts = RenderOptions {
        title: args.title.clone(),
        vars,
    };
    let draft = IssueDraft::from_template(template, &opts);

    if ctx.json {
        output_json(&draft);
    } else {
        print!("{}", draft.to_markdown());
    }
    Ok(())
}

/// Parse `key=value` pairs. The value may itself contain `=`.
fn parse_vars(raw: &[String]) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    for pair in raw {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid variable {:?}: expected KEY=VALUE", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid variable {:?}: empty key", pair);
        }
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vars_splits_on_first_equals() {
        let vars = parse_vars(&["a=1".into(), "query=x=y".into()]).unwrap();
        assert_eq!(vars["a"], "1");
        assert_eq!(vars["query"], "x=y");
    }

    #[test]
    fn parse_vars_rejects_missing_equals() {
        let err = parse_vars(&["component".into()]).unwrap_err();
        assert!(err.to_string().contains("expected KEY=VALUE"));
    }

    #[test]
    fn parse_vars_rejects_empty_key() {
        assert!(parse_vars(&["=value".into()]).is_err());
    }
}
