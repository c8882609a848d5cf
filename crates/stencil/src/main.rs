//! `stencil` -- issue template toolkit.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use stencil_core::error::TemplateError;
use stencil_store::StoreError;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::lint::LintFailed;
use context::RuntimeContext;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "STENCIL_LOG";

/// Exit code for invalid templates (lint errors, load failures).
const EXIT_INVALID: i32 = 2;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    let result = match cli.command {
        Some(Commands::Completion(args)) => commands::completion::run(&args),
        Some(Commands::Version) => commands::version::run(cli.global.json),
        Some(command) => RuntimeContext::from_global_args(&cli.global)
            .and_then(|ctx| dispatch(&ctx, command)),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        report_error(&e, cli.global.json);
        std::process::exit(exit_code(&e));
    }
}

fn dispatch(ctx: &RuntimeContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::List => commands::list::run(ctx),
        Commands::Show(args) => commands::show::run(ctx, &args),
        Commands::Lint(args) => commands::lint::run(ctx, &args),
        Commands::Render(args) => commands::render::run(ctx, &args),
        Commands::Fmt(args) => commands::fmt::run(ctx, &args),
        Commands::New(args) => commands::new::run(ctx, &args),
        Commands::Init(args) => commands::init::run(ctx, &args),
        Commands::Completion(args) => commands::completion::run(&args),
        Commands::Version => commands::version::run(ctx.json),
    }
}

/// Logging goes to stderr, enabled by `--verbose` or a `STENCIL_LOG` filter.
fn init_logging(verbose: bool) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::new(directive),
        _ if verbose => EnvFilter::new("stencil=debug,stencil_store=debug,stencil_config=debug"),
        _ => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(e: &anyhow::Error, json: bool) {
    let files: Vec<String> = e
        .chain()
        .filter_map(|cause| cause.downcast_ref::<StoreError>())
        .flat_map(|store_err| store_err.file_errors().iter().map(|f| f.to_string()))
        .collect();

    if json {
        let err_json = serde_json::json!({
            "error": format!("{:#}", e),
            "files": files,
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else {
        eprintln!("Error: {:#}", e);
        for file in &files {
            eprintln!("  {}", file);
        }
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    let invalid = e.chain().any(|cause| {
        cause.is::<LintFailed>()
            || cause.is::<TemplateError>()
            || matches!(cause.downcast_ref::<StoreError>(), Some(StoreError::Load(_)))
    });
    if invalid { EXIT_INVALID } else { 1 }
}
