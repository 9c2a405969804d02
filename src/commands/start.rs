//! Start command implementation.

use anyhow::{Context, Result};

use crate::commands::update;
use crate::fetcher::HttpFetch;
use crate::pf;
use crate::render::render_firewall_config;
use crate::runner::CommandRunner;
use crate::store::{Doc, Store};

/// Render both configs, then enable forwarding and load the packet filter.
///
/// The two renders are sequential and independent: a failure in the firewall
/// render leaves the already-written proxy-client config in place.
pub fn run(store: &Store, fetcher: &dyn HttpFetch, runner: &dyn CommandRunner) -> Result<()> {
    let config = update::refresh(store, fetcher)?;
    render_firewall_config(store, &config).context("Failed to render packet-filter config")?;

    pf::enable(runner, &store.doc_path(Doc::Pf)).context("Failed to enable packet filter")?;
    println!("Transparent proxy started.");
    Ok(())
}
