use crate::WatchContext;
use crate::output::ConsoleReporter;
use anyhow::Result;
use colored::Colorize;

pub fn execute(ctx: &WatchContext, short: bool, changes_only: bool) -> Result<()> {
    let engine = ctx.engine();
    let reporter = if short {
        ConsoleReporter::short()
    } else {
        ConsoleReporter::new()
    };

    if !short {
        println!("{}", "State of files since last snapshot:".bold());
    }

    let summary = engine.report(&reporter, !changes_only)?;

    if summary.changes() == 0 {
        super::print_info("No changes since last snapshot");
    } else if !short {
        println!(
            "\n{} added, {} edited, {} deleted",
            summary.added, summary.edited, summary.deleted
        );
    }

    Ok(())
}
