//! Subscribe command implementation.

use anyhow::{Context, Result};

use crate::config;
use crate::fetcher::{fetch_servers, HttpFetch};
use crate::render::render_server_config;
use crate::store::{Doc, Store};

/// Register a subscription link, then immediately fetch it and render the
/// proxy-client config.
pub fn run(link: &str, store: &Store, fetcher: &dyn HttpFetch) -> Result<()> {
    let config = config::register(store, link).context("Failed to register subscription")?;

    let servers = fetch_servers(fetcher, &config).context("Failed to fetch subscription")?;
    render_server_config(store, &config, &servers)
        .context("Failed to render proxy-client config")?;

    println!(
        "Subscribed. {} server(s) written to {}",
        servers.len(),
        store.doc_path(Doc::Ss).display()
    );
    Ok(())
}
