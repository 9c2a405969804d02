//! CIDR list merging and download.
//!
//! The merged document decides which traffic bypasses the proxy. Merging is
//! purely textual: every regular file directly inside the CIDR directory is
//! concatenated, joined by a single newline. No address arithmetic happens
//! here; the packet filter consumes the ranges as written.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ClientConfig;
use crate::error::TproxyError;
use crate::fetcher::HttpFetch;
use crate::store::Store;

/// Merge every regular file directly inside `dir` into one document.
///
/// Files are taken in file-name order so repeated merges over the same
/// directory are byte-identical. Subdirectories are skipped; a missing
/// directory or unreadable file fails the merge.
pub fn merge_dir(dir: &Path) -> Result<String, TproxyError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if fs::metadata(&path)?.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut parts = Vec::with_capacity(paths.len());
    for path in &paths {
        parts.push(fs::read_to_string(path)?);
    }
    Ok(parts.join("\n"))
}

/// Download the CIDR list named in the client config into the CIDR
/// directory, where the next firewall render will merge it.
pub fn download_cidr_list(
    fetcher: &dyn HttpFetch,
    config: &ClientConfig,
    store: &Store,
) -> Result<PathBuf, TproxyError> {
    info!("Downloading CIDR list from {}", config.cidr_url);
    let content = fetcher.get_text(&config.cidr_url)?;

    let file_name = config
        .cidr_url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("cidr.txt");

    fs::create_dir_all(store.cidrs_dir())?;
    let path = store.cidrs_dir().join(file_name);
    fs::write(&path, content)?;

    info!("Saved CIDR list to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MockHttpFetch;
    use tempfile::TempDir;

    #[test]
    fn test_merge_joins_with_single_newline() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "1.2.3.0/24\n").unwrap();
        fs::write(dir.path().join("b.txt"), "5.6.7.0/24\n").unwrap();

        let merged = merge_dir(dir.path()).unwrap();
        assert_eq!(merged, "1.2.3.0/24\n\n5.6.7.0/24\n");
    }

    #[test]
    fn test_merge_is_sorted_by_file_name() {
        let dir = TempDir::new().unwrap();
        // Created out of name order on purpose.
        fs::write(dir.path().join("zz.txt"), "z").unwrap();
        fs::write(dir.path().join("aa.txt"), "a").unwrap();
        fs::write(dir.path().join("mm.txt"), "m").unwrap();

        assert_eq!(merge_dir(dir.path()).unwrap(), "a\nm\nz");
    }

    #[test]
    fn test_merge_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("list.txt"), "1.2.3.0/24\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/ignored.txt"), "9.9.9.0/24\n").unwrap();

        assert_eq!(merge_dir(dir.path()).unwrap(), "1.2.3.0/24\n");
    }

    #[test]
    fn test_merge_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(merge_dir(dir.path()).unwrap(), "");
    }

    #[test]
    fn test_merge_missing_dir_is_io_error() {
        let err = merge_dir(Path::new("/nonexistent/cidrs")).unwrap_err();
        assert!(matches!(err, TproxyError::Io(_)));
    }

    #[test]
    fn test_download_writes_into_cidr_dir() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let config = ClientConfig {
            subscribe: String::new(),
            ss_redir_port: 1080,
            pf_max_port: 65000,
            cidr_url: "https://example.com/lists/cn_cidr.txt".to_string(),
        };

        let mut mock = MockHttpFetch::new();
        mock.expect_get_text()
            .withf(|url| url == "https://example.com/lists/cn_cidr.txt")
            .returning(|_| Ok("10.0.0.0/8\n".to_string()));

        let path = download_cidr_list(&mock, &config, &store).unwrap();
        assert_eq!(path, store.cidrs_dir().join("cn_cidr.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "10.0.0.0/8\n");
    }

    #[test]
    fn test_download_propagates_network_error() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let config = ClientConfig {
            subscribe: String::new(),
            ss_redir_port: 1080,
            pf_max_port: 65000,
            cidr_url: "https://example.com/x".to_string(),
        };

        let mut mock = MockHttpFetch::new();
        mock.expect_get_text()
            .returning(|_| Err(TproxyError::Network("HTTP 404".to_string())));

        let err = download_cidr_list(&mock, &config, &store).unwrap_err();
        assert!(matches!(err, TproxyError::Network(_)));
    }
}
