use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use driftwatch::cli::{Cli, Commands};
use driftwatch::{WatchContext, commands};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "driftwatch=debug"
    } else {
        "driftwatch=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Completion needs no context; everything else resolves root and config.
    let context = match &cli.command {
        Commands::Completion { .. } => None,
        _ => Some(WatchContext::with_overrides(
            cli.root.clone(),
            cli.snapshot_file.clone(),
        )?),
    };

    match cli.command {
        Commands::Status {
            short,
            changes_only,
        } => {
            let ctx = context.unwrap();
            commands::status::execute(&ctx, short, changes_only)?;
        }
        Commands::Commit => {
            let ctx = context.unwrap();
            commands::commit::execute(&ctx)?;
        }
        Commands::Watch { interval } => {
            let ctx = context.unwrap();
            commands::watch::execute(&ctx, interval)?;
        }
        Commands::Inspect { target } => {
            let ctx = context.unwrap();
            commands::inspect::execute(&ctx, &target)?;
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
        }
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
