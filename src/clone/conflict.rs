// src/clone/conflict.rs
// =============================================================================
// Finds selected repositories that are already cloned in the target
// directory.
//
// A subdirectory counts as "occupied" when it has a .git directory inside.
// A selected `owner/name` conflicts when a subdirectory called exactly
// `name` is occupied. No case folding, no fuzzy matching.
// =============================================================================

use crate::cache::repo_basename;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// The selection split by whether a local clone already exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Safe to clone, in selection order
    pub fetchable: Vec<String>,
    /// Basename already present as a git checkout, in selection order
    pub conflicting: Vec<String>,
}

/// Names of the immediate subdirectories of `dir` that contain `.git`.
///
/// A directory that does not exist yet has no occupied subdirectories.
pub fn existing_git_repos(dir: &Path) -> Result<HashSet<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read '{}'", dir.display()))
        }
    };

    let mut existing = HashSet::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_dir() && path.join(".git").is_dir() {
            existing.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }

    debug!(dir = %dir.display(), count = existing.len(), "existing git checkouts");
    Ok(existing)
}

/// Classifies each selected identifier against the occupied directory names.
pub fn partition(selection: &[String], occupied: &HashSet<String>) -> Partition {
    let (conflicting, fetchable): (Vec<String>, Vec<String>) = selection
        .iter()
        .cloned()
        .partition(|id| occupied.contains(repo_basename(id)));

    Partition {
        fetchable,
        conflicting,
    }
}

/// Scans `target_dir` and partitions the selection against it.
pub fn check_conflicts(selection: &[String], target_dir: &Path) -> Result<Partition> {
    let occupied = existing_git_repos(target_dir)?;
    Ok(partition(selection, &occupied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sel(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partition_by_basename() {
        let occupied: HashSet<String> = ["repo1".to_string()].into();
        let result = partition(&sel(&["a/repo1", "b/repo2"]), &occupied);

        assert_eq!(result.fetchable, sel(&["b/repo2"]));
        assert_eq!(result.conflicting, sel(&["a/repo1"]));
    }

    #[test]
    fn test_partition_is_case_sensitive() {
        let occupied: HashSet<String> = ["Repo1".to_string()].into();
        let result = partition(&sel(&["a/repo1"]), &occupied);

        assert_eq!(result.fetchable, sel(&["a/repo1"]));
        assert!(result.conflicting.is_empty());
    }

    #[test]
    fn test_only_git_checkouts_are_occupied() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("cloned/.git")).unwrap();
        fs::create_dir_all(dir.path().join("plain")).unwrap();
        // A .git *file* (worktree/submodule pointer) is not a .git directory
        fs::create_dir_all(dir.path().join("pointer")).unwrap();
        fs::write(dir.path().join("pointer/.git"), "gitdir: elsewhere").unwrap();
        fs::write(dir.path().join("file.txt"), "hi").unwrap();

        let existing = existing_git_repos(dir.path()).unwrap();
        assert_eq!(existing, HashSet::from(["cloned".to_string()]));
    }

    #[test]
    fn test_check_conflicts_on_disk() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("tokio/.git")).unwrap();
        fs::create_dir_all(dir.path().join("serde")).unwrap();

        let result =
            check_conflicts(&sel(&["tokio-rs/tokio", "serde-rs/serde"]), dir.path()).unwrap();

        assert_eq!(result.fetchable, sel(&["serde-rs/serde"]));
        assert_eq!(result.conflicting, sel(&["tokio-rs/tokio"]));
    }

    #[test]
    fn test_missing_target_dir_has_no_conflicts() {
        let dir = TempDir::new().unwrap();
        let result = check_conflicts(&sel(&["a/b"]), &dir.path().join("not-yet")).unwrap();
        assert_eq!(result.fetchable, sel(&["a/b"]));
    }
}
