use crate::WatchContext;
use crate::output::{ConsoleReporter, Reporter};
use crate::poller::Poller;
use anyhow::Result;
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub fn execute(ctx: &WatchContext, interval: Option<Duration>) -> Result<()> {
    let interval = interval.unwrap_or_else(|| ctx.config.interval());

    let engine = Arc::new(ctx.engine());
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::short());
    let mut poller = Poller::new(engine, reporter, interval);

    poller.start()?;
    super::print_info(&format!(
        "Watching {} every {} (press Enter to stop)",
        ctx.root.display(),
        humantime::format_duration(interval)
    ));

    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);

    poller.stop();
    super::print_info("Stopped watching");

    Ok(())
}
