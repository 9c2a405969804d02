//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tproxyctl")]
#[command(author, version, about = "Manage a transparent proxy on macOS")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory holding templates/, configs/ and cidrs/
    #[arg(short, long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a subscription link and render the proxy-client config
    Subscribe {
        /// The ss:// subscription URL
        link: String,
    },

    /// Re-fetch the subscription and re-render the proxy-client config
    Update,

    /// Download the configured CIDR list into the cidrs directory
    UpdateCidr,

    /// Render all configs and bring the transparent proxy up
    Start,

    /// Tear the transparent proxy down
    Stop,

    /// Stop, then start
    Restart,

    /// Show version
    Version,
}
