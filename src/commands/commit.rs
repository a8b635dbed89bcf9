use crate::WatchContext;
use anyhow::Result;
use chrono::Local;
use colored::Colorize;

pub fn execute(ctx: &WatchContext) -> Result<()> {
    let engine = ctx.engine();
    let snapshot = engine.commit()?;

    super::print_success(&format!(
        "Snapshot of {} files created at {}",
        snapshot.len(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    println!(
        "  {}: {}",
        "Stored".bold(),
        ctx.snapshot_path.display()
    );

    Ok(())
}
