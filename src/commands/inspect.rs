use crate::WatchContext;
use crate::inspect::{self, InspectTarget};
use crate::output::ConsoleReporter;
use anyhow::Result;

pub fn execute(ctx: &WatchContext, raw_target: &str) -> Result<()> {
    let target = InspectTarget::parse(raw_target)?;
    let reporter = ConsoleReporter::new();
    inspect::describe(&ctx.root, &target, &reporter)
}
