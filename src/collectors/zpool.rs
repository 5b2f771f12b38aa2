use crate::error::CheckError;
use std::process::Command;

/// Run `sudo zpool list` across all pools and return the raw listing.
pub fn list_all() -> Result<String, CheckError> {
    run(&["zpool", "list"])
}

/// Run `sudo zpool list <pool>` for one pool.
pub fn list_pool(name: &str) -> Result<String, CheckError> {
    run(&["zpool", "list", name])
}

/// Invoke zpool under sudo and capture stdout.
///
/// Failure to launch and a non-zero exit are both reported as the same
/// privilege/invocation problem: either zpool is not installed or sudo
/// refused us. Parsing never starts on a failed command.
fn run(args: &[&str]) -> Result<String, CheckError> {
    let out = Command::new("sudo")
        .args(args)
        .output()
        .map_err(|e| invocation(args, &e.to_string()))?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        let reason = match stderr.trim() {
            ""    => format!("exit status {}", out.status),
            other => other.to_string(),
        };
        return Err(invocation(args, &reason));
    }

    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

fn invocation(args: &[&str], reason: &str) -> CheckError {
    CheckError::PrivilegeOrInvocation {
        command: format!("sudo {}", args.join(" ")),
        reason:  reason.to_string(),
    }
}
