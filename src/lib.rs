//! # tproxyctl - Transparent Proxy Manager for macOS
//!
//! Manages a local transparent-proxy setup end to end: ingest a subscription
//! link, decode the embedded proxy-server descriptors, render them into a
//! proxy-client configuration, render a pf firewall configuration from
//! templates and merged CIDR lists, and drive `sysctl`/`pfctl` to bring the
//! proxy up or down.
//!
//! ## Pipeline
//!
//! ```text
//! configs/config.json (subscription URL + ports)
//!     └── fetcher: GET + base64 decode + split into link lines
//!             └── link: ss:// line -> ServerDescriptor
//!                     └── render: descriptors into ss-config template
//!                             └── configs/ss-config.json
//! cidrs/*  ── cidr: newline-joined merge ──> configs/direct_cidr.txt
//!     └── render: path + ports into pf template ──> configs/pf.conf
//! ```
//!
//! Everything is synchronous and single-shot: one network attempt, no
//! retries, no background tasks. Concurrent invocations are not coordinated;
//! two instances racing on the output files is an operational constraint of
//! the tool, not something it guards against.
//!
//! ## Modules
//!
//! - [`cidr`] - CIDR list merging and download
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Persisted client configuration and registration
//! - [`fetcher`] - HTTP fetching and subscription decoding
//! - [`link`] - Subscription link decoding
//! - [`pf`] - Packet-filter and IP-forwarding control
//! - [`render`] - Configuration rendering
//! - [`runner`] - Command execution abstraction
//! - [`store`] - Template and generated-document store

pub mod cidr;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod link;
pub mod pf;
pub mod render;
pub mod runner;
pub mod store;

pub use cli::{Cli, Commands};
pub use error::TproxyError;
