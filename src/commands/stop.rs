//! Stop command implementation.

use anyhow::{Context, Result};

use crate::pf;
use crate::runner::CommandRunner;

/// Disable forwarding and turn the packet filter off.
pub fn run(runner: &dyn CommandRunner) -> Result<()> {
    pf::disable(runner).context("Failed to disable packet filter")?;
    println!("Transparent proxy stopped.");
    Ok(())
}
