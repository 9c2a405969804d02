//! Error types for tproxyctl.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TproxyError {
    #[error("Malformed subscription link: {0}")]
    MalformedLink(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Command failed: {0}")]
    Command(String),
}
