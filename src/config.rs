//! Persisted client configuration.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TproxyError;
use crate::store::{Doc, Store, Template};

/// Default CIDR list downloaded by `update-cidr` when the stored config does
/// not override it.
pub const DEFAULT_CIDR_URL: &str =
    "https://raw.githubusercontent.com/missdeer/daily-weekly-build/refs/heads/cidr/cn_cidr.txt";

/// Settings persisted in the `config` document.
///
/// The document is created from the config template when a subscription link
/// is registered and overwritten wholesale on every re-registration. Fields
/// beyond these (template-defined defaults) survive registration because
/// registration edits the template as generic JSON rather than through this
/// struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Subscription URL the fetcher pulls the server list from.
    pub subscribe: String,

    /// Local transparent-redirect port the proxy client listens on.
    pub ss_redir_port: u16,

    /// Upper bound of the port range the packet-filter table covers.
    pub pf_max_port: u16,

    /// Source URL for `update-cidr`.
    #[serde(default = "default_cidr_url")]
    pub cidr_url: String,
}

fn default_cidr_url() -> String {
    DEFAULT_CIDR_URL.to_string()
}

impl ClientConfig {
    /// Load the persisted client config from the store.
    pub fn load(store: &Store) -> Result<Self, TproxyError> {
        let content = store.read_doc(Doc::Config)?;
        serde_json::from_str(&content).map_err(|e| {
            TproxyError::Template(format!(
                "{} is not a valid client config: {}",
                store.doc_path(Doc::Config).display(),
                e
            ))
        })
    }
}

/// Register a subscription link: rebuild the config document from its
/// template with `subscribe` set to the given URL.
///
/// The document is replaced wholesale; any previously edited field resets to
/// its template default. The template is edited as generic JSON so fields
/// this version does not know about survive registration.
pub fn register(store: &Store, link: &str) -> Result<ClientConfig, TproxyError> {
    let template = store.read_template(Template::Config)?;
    let mut doc: serde_json::Value = serde_json::from_str(&template)
        .map_err(|e| TproxyError::Template(format!("config template is not valid JSON: {}", e)))?;

    let root = doc
        .as_object_mut()
        .ok_or_else(|| TproxyError::Template("config template root is not an object".to_string()))?;
    root.insert(
        "subscribe".to_string(),
        serde_json::Value::String(link.to_string()),
    );

    let rendered = serde_json::to_string_pretty(&doc)
        .map_err(|e| TproxyError::Template(format!("cannot serialize client config: {}", e)))?;
    store.write_doc(Doc::Config, &rendered)?;
    info!(
        "Saved subscription to {}",
        store.doc_path(Doc::Config).display()
    );

    ClientConfig::load(store)
}
