//! Binary discovery and execution.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::EXIT_NOT_FOUND;

/// How long `<binary> --version` may take before it counts as unavailable.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// True when `binary` is on PATH and `<binary> --version` exits successfully
/// within [`PROBE_TIMEOUT`].
pub async fn is_available(binary: &str) -> bool {
    if which::which(binary).is_err() {
        tracing::debug!(binary, "not found on PATH");
        return false;
    }

    let probe = Command::new(binary)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status();

    match tokio::time::timeout(PROBE_TIMEOUT, probe).await {
        Ok(Ok(status)) => status.success(),
        Ok(Err(e)) => {
            tracing::debug!(binary, error = %e, "version probe failed");
            false
        }
        Err(_) => {
            tracing::debug!(binary, "version probe timed out");
            false
        }
    }
}

/// Run `program` with `args`, inheriting stdio, and return its exit code.
///
/// A program that cannot be started yields [`EXIT_NOT_FOUND`].
pub async fn run(program: &str, args: &[String]) -> i32 {
    tracing::debug!(program, ?args, "spawning");

    match Command::new(program).args(args).status().await {
        Ok(status) => exit_code(status),
        Err(e) => {
            tracing::warn!(program, error = %e, "failed to start");
            EXIT_NOT_FOUND
        }
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        assert!(!is_available("metaspec-no-such-binary").await);
    }

    #[tokio::test]
    async fn test_cargo_is_available() {
        assert!(is_available(env!("CARGO")).await);
    }

    #[tokio::test]
    async fn test_run_missing_binary() {
        assert_eq!(run("metaspec-no-such-binary", &[]).await, EXIT_NOT_FOUND);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_propagates_exit_code() {
        let args = ["-c".to_string(), "exit 3".to_string()];
        assert_eq!(run("sh", &args).await, 3);
    }
}
