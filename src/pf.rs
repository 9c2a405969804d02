//! Packet-filter and IP-forwarding control.
//!
//! Thin collaborator around `sysctl` and `pfctl`, invoked through `sudo` via
//! the [`CommandRunner`](crate::runner::CommandRunner) seam. The core
//! pipeline only hands this module a finished pf.conf path.

use std::path::Path;

use tracing::{info, warn};

use crate::error::TproxyError;
use crate::runner::{args_to_strings, run_checked, CommandRunner};

/// Enable IP forwarding, enable pf, flush its state and load the rendered
/// configuration.
pub fn enable(runner: &dyn CommandRunner, pf_conf: &Path) -> Result<(), TproxyError> {
    run_checked(runner, "sudo", &["sysctl", "-w", "net.inet.ip.forwarding=1"])?;
    enable_pf(runner)?;
    run_checked(runner, "sudo", &["pfctl", "-F", "all"])?;
    let pf_conf = pf_conf.display().to_string();
    run_checked(runner, "sudo", &["pfctl", "-f", &pf_conf])?;
    info!("Packet filter loaded from {}", pf_conf);
    Ok(())
}

/// Disable IP forwarding, flush pf and turn it off.
pub fn disable(runner: &dyn CommandRunner) -> Result<(), TproxyError> {
    run_checked(runner, "sudo", &["sysctl", "-w", "net.inet.ip.forwarding=0"])?;
    run_checked(runner, "sudo", &["pfctl", "-F", "all"])?;
    disable_pf(runner)?;
    info!("Packet filter disabled");
    Ok(())
}

/// `pfctl -e` exits non-zero when pf is already enabled; that is not a
/// failure of the run.
fn enable_pf(runner: &dyn CommandRunner) -> Result<(), TproxyError> {
    let output = runner.execute("sudo", &args_to_strings(&["pfctl", "-e"]))?;
    if !output.success {
        warn!("pfctl -e: {}", output.stderr.trim());
    }
    Ok(())
}

/// Same tolerance for `pfctl -d` on an already-disabled pf.
fn disable_pf(runner: &dyn CommandRunner) -> Result<(), TproxyError> {
    let output = runner.execute("sudo", &args_to_strings(&["pfctl", "-d"]))?;
    if !output.success {
        warn!("pfctl -d: {}", output.stderr.trim());
    }
    Ok(())
}
