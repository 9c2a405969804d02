//! Update command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ClientConfig;
use crate::fetcher::{fetch_servers, HttpFetch};
use crate::render::render_server_config;
use crate::store::{Doc, Store};

/// Re-fetch the registered subscription and re-render the proxy-client
/// config. Shared by `update` and `start`.
pub fn refresh(store: &Store, fetcher: &dyn HttpFetch) -> Result<ClientConfig> {
    let config = ClientConfig::load(store)
        .context("No client config found; run 'tproxyctl subscribe <link>' first")?;
    if config.subscribe.is_empty() {
        anyhow::bail!("No subscription registered; run 'tproxyctl subscribe <link>' first");
    }

    let servers = fetch_servers(fetcher, &config).context("Failed to fetch subscription")?;
    render_server_config(store, &config, &servers)
        .context("Failed to render proxy-client config")?;

    info!("Updated {}", store.doc_path(Doc::Ss).display());
    Ok(config)
}

/// Run the update command.
pub fn run(store: &Store, fetcher: &dyn HttpFetch) -> Result<()> {
    refresh(store, fetcher)?;
    println!("Updated {}", store.doc_path(Doc::Ss).display());
    Ok(())
}
