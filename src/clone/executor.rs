// src/clone/executor.rs
// =============================================================================
// Clones a batch of repositories, one after the other.
//
// For each `owner/name`:
//   git clone https://github.com/owner/name.git <target>/name
//
// By default the first failure ends the batch: later repos are never
// attempted. With FailurePolicy::KeepGoing the batch runs to the end and the
// failures are collected for a summary. A missing git binary ends the batch
// under either policy.
// =============================================================================

use super::git::GitClient;
use crate::cache::repo_basename;
use crate::error::CloneError;
use crate::github::repo_clone_url;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// What to do after a clone fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the batch at the first failure
    #[default]
    FailFast,
    /// Skip the failed repo and continue with the next one
    KeepGoing,
}

/// Outcome of a clone batch.
#[derive(Debug, Default)]
pub struct CloneReport {
    pub cloned: usize,
    pub total: usize,
    /// Failed identifiers with their error, in the order they happened
    pub failures: Vec<(String, CloneError)>,
    /// True when the batch stopped before trying every repo
    pub aborted: bool,
}

impl CloneReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// "N/M", the tally printed at the end of a run.
    pub fn tally(&self) -> String {
        format!("{}/{}", self.cloned, self.total)
    }
}

/// Clones every identifier in `repos` into `target_dir`.
///
/// `target_dir` is created first, including missing parents. Only a failure
/// to create it is returned as an error; clone failures end up in the report.
pub async fn clone_all<G: GitClient>(
    git: &G,
    repos: &[String],
    target_dir: &Path,
    policy: FailurePolicy,
) -> Result<CloneReport> {
    fs::create_dir_all(target_dir)
        .with_context(|| format!("failed to create '{}'", target_dir.display()))?;

    let mut report = CloneReport {
        total: repos.len(),
        ..Default::default()
    };

    for id in repos {
        let url = repo_clone_url(id);
        let dest = target_dir.join(repo_basename(id));

        println!("{} {} {}", "git clone".dimmed(), url, dest.display());

        match git.clone_repo(&url, &dest).await {
            Ok(()) => {
                println!("{} {}", "Successfully cloned".green(), id);
                report.cloned += 1;
            }
            Err(e) => {
                println!("{} {}: {}", "Error cloning".red().bold(), id, e);
                warn!(repo = %id, error = %e, "clone failed");

                let stop = policy == FailurePolicy::FailFast || e.is_fatal_for_batch();
                report.failures.push((id.clone(), e));
                if stop {
                    report.aborted = report.cloned + report.failures.len() < report.total;
                    break;
                }
            }
        }
    }

    info!(
        cloned = report.cloned,
        total = report.total,
        failed = report.failures.len(),
        "clone batch finished"
    );
    Ok(report)
}

/// Prints the end-of-run summary.
pub fn print_report(report: &CloneReport) {
    println!("\nCloned {} repos.", report.tally().bold());

    if report.aborted {
        let skipped = report.total - report.cloned - report.failures.len();
        println!("{} {} repo(s) not attempted", "Stopped early:".yellow(), skipped);
    }

    if !report.failures.is_empty() {
        println!("{}", "Failed:".red().bold());
        for (id, e) in &report.failures {
            println!("   - {id}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records every call; fails for URLs listed in `fail`.
    #[derive(Default)]
    struct FakeGit {
        fail: HashSet<String>,
        missing: bool,
        calls: RefCell<Vec<(String, PathBuf)>>,
    }

    impl FakeGit {
        fn failing(urls: &[&str]) -> Self {
            FakeGit {
                fail: urls.iter().map(|u| u.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl GitClient for FakeGit {
        async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), CloneError> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), dest.to_path_buf()));
            if self.missing {
                return Err(CloneError::GitNotFound);
            }
            if self.fail.contains(url) {
                return Err(CloneError::Failed {
                    code: Some(128),
                    stderr: "fatal: repository not found".to_string(),
                });
            }
            Ok(())
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_first_failure_aborts_batch() {
        let dir = TempDir::new().unwrap();
        let git = FakeGit::failing(&["https://github.com/a/repo1.git"]);

        let report = clone_all(&git, &ids(&["a/repo1", "a/repo2"]), dir.path(), FailurePolicy::FailFast)
            .await
            .unwrap();

        assert_eq!(report.tally(), "0/2");
        assert!(report.aborted);
        assert_eq!(git.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_all_succeed() {
        let dir = TempDir::new().unwrap();
        let git = FakeGit::default();

        let report = clone_all(&git, &ids(&["a/repo1", "a/repo2"]), dir.path(), FailurePolicy::FailFast)
            .await
            .unwrap();

        assert_eq!(report.tally(), "2/2");
        assert!(report.is_success());
        assert_eq!(
            *git.calls.borrow(),
            vec![
                ("https://github.com/a/repo1.git".to_string(), dir.path().join("repo1")),
                ("https://github.com/a/repo2.git".to_string(), dir.path().join("repo2")),
            ]
        );
    }

    #[tokio::test]
    async fn test_keep_going_collects_failures() {
        let dir = TempDir::new().unwrap();
        let git = FakeGit::failing(&["https://github.com/a/repo1.git"]);

        let report = clone_all(
            &git,
            &ids(&["a/repo1", "a/repo2", "a/repo3"]),
            dir.path(),
            FailurePolicy::KeepGoing,
        )
        .await
        .unwrap();

        assert_eq!(report.tally(), "2/3");
        assert!(!report.aborted);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "a/repo1");
        assert_eq!(git.calls.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_git_aborts_even_when_keep_going() {
        let dir = TempDir::new().unwrap();
        let git = FakeGit {
            missing: true,
            ..Default::default()
        };

        let report = clone_all(&git, &ids(&["a/repo1", "a/repo2"]), dir.path(), FailurePolicy::KeepGoing)
            .await
            .unwrap();

        assert_eq!(report.tally(), "0/2");
        assert!(report.aborted);
        assert!(matches!(report.failures[0].1, CloneError::GitNotFound));
        assert_eq!(git.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_creates_nested_target_dir() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("deep").join("er");
        let git = FakeGit::default();

        let report = clone_all(&git, &[], &target, FailurePolicy::FailFast).await.unwrap();

        assert!(target.is_dir());
        assert_eq!(report.tally(), "0/0");
    }
}
