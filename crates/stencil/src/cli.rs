//! Clap CLI definitions for the `stencil` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// stencil -- issue template toolkit.
///
/// Lists, validates, formats and renders the issue templates a repository
/// ships for its issue tracker.
#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    about = "Issue template toolkit",
    long_about = "Lists, validates, formats and renders the issue templates a repository ships for its issue tracker.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Template directory (default: discover .github/ISSUE_TEMPLATE).
    #[arg(long, global = true, env = "STENCIL_DIR")]
    pub dir: Option<PathBuf>,

    /// Config file (default: discover .stencil.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available templates.
    #[command(alias = "ls")]
    List,

    /// Show one template: metadata, sections and variables.
    Show(ShowArgs),

    /// Validate every template and check section conventions.
    Lint(LintArgs),

    /// Print the issue a template pre-fills.
    Render(RenderArgs),

    /// Rewrite templates in canonical form.
    Fmt(FmtArgs),

    /// Scaffold a new template file.
    New(NewArgs),

    /// Create the template directory with a starter feature template.
    Init(InitArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Arguments for `stencil show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Template name or file stem.
    pub name: String,
}

/// Arguments for `stencil lint`.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Also warn about headings outside the expected section family.
    #[arg(long)]
    pub strict: bool,

    /// Exit non-zero when any warning is reported.
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Arguments for `stencil render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template name or file stem.
    pub name: String,

    /// Issue title; replaces the placeholder in tagged titles like `[Feat]: Title`.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Variable substitution (key=value), repeatable.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

/// Arguments for `stencil fmt`.
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Report files that are not canonical instead of rewriting them.
    #[arg(long)]
    pub check: bool,
}

/// Arguments for `stencil new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// File stem of the new document (`feature_request` -> `feature_request.md`).
    pub file: String,

    /// Template name shown in the chooser.
    #[arg(short = 'n', long)]
    pub name: String,

    /// Short description.
    #[arg(short = 'a', long, default_value = "")]
    pub about: String,

    /// Default issue title.
    #[arg(short = 't', long, default_value = "")]
    pub title: String,

    /// Comma-separated labels (default: config `new.default-labels`).
    #[arg(short = 'l', long)]
    pub labels: Option<String>,

    /// Comma-separated assignees (default: config `new.default-assignees`).
    #[arg(long)]
    pub assignees: Option<String>,

    /// Comma-separated section headings (default: config `lint.expected-sections`).
    #[arg(short = 's', long, value_delimiter = ',')]
    pub sections: Option<Vec<String>>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `stencil init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite existing starter files.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `stencil completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_vars() {
        let cli = Cli::parse_from([
            "stencil", "render", "feature", "--title", "Add export", "--var", "a=1", "--var", "b=2",
        ]);
        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.name, "feature");
                assert_eq!(args.title.as_deref(), Some("Add export"));
                assert_eq!(args.vars, vec!["a=1", "b=2"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_new_sections_list() {
        let cli = Cli::parse_from([
            "stencil", "new", "bug_report", "--name", "Bug", "--sections", "Overview,Steps",
        ]);
        match cli.command {
            Some(Commands::New(args)) => {
                assert_eq!(args.sections, Some(vec!["Overview".into(), "Steps".into()]));
                assert_eq!(args.about, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
