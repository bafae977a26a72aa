//! Auto-push — a sequential wrapper over standard git commands.
//!
//! `status --porcelain` decides whether there is anything to do: a clean
//! tree reports "no changes" and performs no commit; a dirty tree gets
//! `add -A`, exactly one commit whose message carries the current date and
//! the changed-file count, and (when enabled) a `push`. No conflict
//! resolution, no retries — every failure maps to a [`VcsError`] the caller
//! treats as recoverable.

use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

use atelier_core::error::VcsError;

/// What an auto-push run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Clean tree: nothing staged, nothing committed
    NoChanges,
    /// One commit created; push skipped (disabled or not requested)
    Committed { files_changed: usize, message: String },
    /// One commit created and pushed to the remote
    Pushed { files_changed: usize, message: String },
}

/// Sequential git wrapper rooted at one working directory.
pub struct AutoPush {
    repo_dir: PathBuf,
    /// Run `git push` after committing
    push_enabled: bool,
    /// Create the commit at all (otherwise only report status)
    commit_enabled: bool,
}

impl AutoPush {
    pub fn new(repo_dir: impl Into<PathBuf>, push_enabled: bool, commit_enabled: bool) -> Self {
        Self { repo_dir: repo_dir.into(), push_enabled, commit_enabled }
    }

    /// Render the fixed commit-message template: current date plus
    /// changed-file count.
    pub fn commit_message(files_changed: usize) -> String {
        let date = Local::now().format("%Y-%m-%d %H:%M");
        format!("chore: auto-sync {date} ({files_changed} files changed)")
    }

    /// Run one git subcommand in the repo directory, capturing output.
    async fn git(&self, args: &[&str]) -> Result<String, VcsError> {
        debug!(args = ?args, "Running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| VcsError::CommandFailed {
                command: args.first().copied().unwrap_or("").to_string(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let reason = if stderr.trim().is_empty() { stdout.trim().into() } else { stderr.trim().to_string() };
            if reason.contains("not a git repository") {
                return Err(VcsError::NotARepository(self.repo_dir.display().to_string()));
            }
            return Err(VcsError::CommandFailed {
                command: args.first().copied().unwrap_or("").to_string(),
                reason,
            });
        }

        Ok(stdout)
    }

    /// Paths with uncommitted changes, from `git status --porcelain`.
    pub async fn changed_files(&self) -> Result<Vec<String>, VcsError> {
        let stdout = self.git(&["status", "--porcelain"]).await?;
        Ok(stdout
            .lines()
            .filter(|line| line.len() > 3)
            .map(|line| line[3..].trim().to_string())
            .collect())
    }

    /// The add/commit/push sequence.
    pub async fn run(&self) -> Result<PushOutcome, VcsError> {
        let changed = self.changed_files().await?;
        if changed.is_empty() {
            info!("Working tree clean, nothing to push");
            return Ok(PushOutcome::NoChanges);
        }

        info!(files = changed.len(), "Working tree dirty");
        if !self.commit_enabled {
            return Ok(PushOutcome::NoChanges);
        }

        self.git(&["add", "-A"]).await?;

        let message = Self::commit_message(changed.len());
        self.git(&["commit", "-m", &message]).await?;
        info!(message = %message, "Commit created");

        if !self.push_enabled {
            return Ok(PushOutcome::Committed { files_changed: changed.len(), message });
        }

        match self.git(&["push"]).await {
            Ok(_) => {
                info!("Pushed to remote");
                Ok(PushOutcome::Pushed { files_changed: changed.len(), message })
            }
            Err(e) => {
                // The commit already exists locally; surface the push
                // failure as its own error class.
                warn!(error = %e, "Push failed after commit");
                Err(VcsError::PushRejected(e.to_string()))
            }
        }
    }
}

/// Auto-push in the current working directory with the given toggles.
pub fn for_current_dir(push_enabled: bool, commit_enabled: bool) -> AutoPush {
    AutoPush::new(Path::new("."), push_enabled, commit_enabled)
}
