//! Configuration rendering.
//!
//! Two render cycles share the same substitution discipline: load a template,
//! substitute literal placeholder tokens, write the document out wholesale.
//!
//! The server-config template carries its placeholder *inside a JSON string
//! value*, so that substitution has to run on the serialized text, after the
//! structural edit. That ordering is part of the output format and is kept
//! as-is for compatibility with existing templates.

use tracing::info;

use crate::cidr::merge_dir;
use crate::config::ClientConfig;
use crate::error::TproxyError;
use crate::link::ServerDescriptor;
use crate::store::{Doc, Store, Template};

/// Quoted placeholder for the redirect port in the server-config template.
const SS_REDIR_PORT_TOKEN: &str = "\"#{ss_redir_port}\"";

/// Placeholders in the packet-filter template.
const DIRECT_PATH_TOKEN: &str = "#{direct_path}";
const REDIR_PORT_TOKEN: &str = "#{redir_port}";
const MAX_PORT_TOKEN: &str = "#{max_port}";

/// Render the proxy-client config: the ss template with its `servers` field
/// replaced by the decoded descriptors, in subscription order.
pub fn render_server_config(
    store: &Store,
    config: &ClientConfig,
    servers: &[ServerDescriptor],
) -> Result<(), TproxyError> {
    let template = store.read_template(Template::Ss)?;
    let mut doc: serde_json::Value = serde_json::from_str(&template)
        .map_err(|e| TproxyError::Template(format!("ss template is not valid JSON: {}", e)))?;

    let root = doc
        .as_object_mut()
        .ok_or_else(|| TproxyError::Template("ss template root is not an object".to_string()))?;
    root.insert(
        "servers".to_string(),
        serde_json::to_value(servers)
            .map_err(|e| TproxyError::Template(format!("cannot serialize servers: {}", e)))?,
    );

    let rendered = serde_json::to_string_pretty(&doc)
        .map_err(|e| TproxyError::Template(format!("cannot serialize ss config: {}", e)))?;
    // Serialize first, substitute second: the quoted token becomes a bare
    // number in the written document.
    let rendered = rendered.replace(SS_REDIR_PORT_TOKEN, &config.ss_redir_port.to_string());

    store.write_doc(Doc::Ss, &rendered)?;
    info!(
        "Wrote {} ({} server(s))",
        store.doc_path(Doc::Ss).display(),
        servers.len()
    );
    Ok(())
}

/// Render the packet-filter config: merge the CIDR directory into the CIDR
/// document, then substitute its path and the configured ports into the pf
/// template.
pub fn render_firewall_config(store: &Store, config: &ClientConfig) -> Result<(), TproxyError> {
    let merged = merge_dir(store.cidrs_dir())?;
    store.write_doc(Doc::Cidr, &merged)?;

    let template = store.read_template(Template::Pf)?;
    let cidr_path = store.doc_path(Doc::Cidr);
    let rendered = template
        .replace(DIRECT_PATH_TOKEN, &cidr_path.display().to_string())
        .replace(REDIR_PORT_TOKEN, &config.ss_redir_port.to_string())
        .replace(MAX_PORT_TOKEN, &config.pf_max_port.to_string());

    store.write_doc(Doc::Pf, &rendered)?;
    info!("Wrote {}", store.doc_path(Doc::Pf).display());
    Ok(())
}
