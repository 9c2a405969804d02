//! Update-cidr command implementation.

use anyhow::{Context, Result};

use crate::cidr::download_cidr_list;
use crate::config::ClientConfig;
use crate::fetcher::HttpFetch;
use crate::store::Store;

/// Download the CIDR list named in the client config. The next firewall
/// render picks it up from the cidrs directory.
pub fn run(store: &Store, fetcher: &dyn HttpFetch) -> Result<()> {
    let config = ClientConfig::load(store)
        .context("No client config found; run 'tproxyctl subscribe <link>' first")?;

    let path = download_cidr_list(fetcher, &config, store).context("Failed to update CIDR list")?;
    println!("Saved CIDR list to {}", path.display());
    Ok(())
}
