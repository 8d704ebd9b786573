use std::{ffi::OsString, process::Stdio};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::{config::Config, error::AppError};

/// Runs the configured binary once with the connection flags prepended to
/// `args`, buffering stdout and stderr separately until the process exits.
///
/// Anything written to stderr turns the call into an error, whatever the exit
/// status. The stdout text is kept in [`AppError::output`] in that case.
#[tracing::instrument(skip_all, fields(binary = %cfg.binary.display()))]
pub async fn run(cfg: &Config, args: &[OsString]) -> Result<String, AppError> {
    let mut argv = cfg.connection_flags();
    argv.extend_from_slice(args);
    debug!(?argv, "Spawning");

    let output = Command::new(&cfg.binary)
        .args(&argv)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            let message = format!("Can't spawn {}: {e}", cfg.binary.display());
            warn!("{message}");
            AppError::with_output(&message, String::new())
        })?;

    debug!(status = %output.status);

    collect(
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

fn collect(stdout: String, stderr: String) -> Result<String, AppError> {
    if stderr.is_empty() {
        return Ok(stdout);
    }

    warn!("{}", stderr.trim_end());
    Err(AppError::with_output(&stderr, stdout))
}
