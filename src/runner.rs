//! Command execution abstraction for testability.
//!
//! The start/stop sequences shell out to `sysctl` and `pfctl`; this trait
//! lets unit tests exercise those sequences without touching the system.

use std::process::{Command, Stdio};

use crate::error::TproxyError;

#[cfg(test)]
use mockall::automock;

/// Output from command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Whether the command exited with code 0.
    pub success: bool,
    pub code: Option<i32>,
}

/// Trait for command execution, allowing dependency injection for testing.
#[cfg_attr(test, automock)]
pub trait CommandRunner: Send + Sync {
    /// Execute a command with the given arguments and capture its output.
    fn execute(&self, cmd: &str, args: &[String]) -> Result<CommandOutput, TproxyError>;
}

/// Real implementation that runs actual system commands.
#[derive(Debug, Clone, Default)]
pub struct RealCommandRunner;

impl RealCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for RealCommandRunner {
    fn execute(&self, cmd: &str, args: &[String]) -> Result<CommandOutput, TproxyError> {
        let output = Command::new(cmd)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Run a command and fail with [`TproxyError::Command`] on a non-zero exit.
pub fn run_checked(
    runner: &dyn CommandRunner,
    cmd: &str,
    args: &[&str],
) -> Result<CommandOutput, TproxyError> {
    let output = runner.execute(cmd, &args_to_strings(args))?;
    if !output.success {
        return Err(TproxyError::Command(format!(
            "{} {} exited with {:?}: {}",
            cmd,
            args.join(" "),
            output.code,
            output.stderr.trim()
        )));
    }
    Ok(output)
}

/// Convert a slice of &str to Vec<String>.
///
/// mockall has trouble with `&[&str]` lifetimes, so the trait takes
/// `&[String]`.
pub fn args_to_strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
