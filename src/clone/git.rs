// src/clone/git.rs
// =============================================================================
// Runs `git clone` as a subprocess.
//
// - stdout and stderr are captured, so a failure can show git's own message
// - GIT_TERMINAL_PROMPT=0 stops git from waiting on a credential prompt for
//   private or deleted repositories
// - The whole clone is bounded by a timeout and the child is killed if it
//   runs past it
// =============================================================================

use crate::error::CloneError;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Something that can clone a repository URL into a directory.
#[allow(async_fn_in_trait)]
pub trait GitClient {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), CloneError>;
}

/// The `git` executable found on PATH.
#[derive(Debug, Clone)]
pub struct SystemGit {
    timeout: Duration,
}

impl SystemGit {
    pub fn new(timeout: Duration) -> Self {
        SystemGit { timeout }
    }
}

impl GitClient for SystemGit {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), CloneError> {
        debug!(url, dest = %dest.display(), "spawning git clone");

        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .arg(url)
            .arg(dest)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => return Err(CloneError::TimedOut(self.timeout.as_secs())),
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => return Err(CloneError::GitNotFound),
            Ok(Err(e)) => return Err(CloneError::Io(e)),
            Ok(Ok(output)) => output,
        };

        if output.status.success() {
            return Ok(());
        }

        Err(CloneError::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
