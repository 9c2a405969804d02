//! Restart command implementation.

use anyhow::Result;

use crate::commands::{start, stop};
use crate::fetcher::HttpFetch;
use crate::runner::CommandRunner;
use crate::store::Store;

/// Stop, then start.
pub fn run(store: &Store, fetcher: &dyn HttpFetch, runner: &dyn CommandRunner) -> Result<()> {
    stop::run(runner)?;
    start::run(store, fetcher, runner)
}
