// src/error.rs
// =============================================================================
// Typed errors for the places where the caller needs to know *which* thing
// went wrong, not just that something did.
//
// Most of the app uses anyhow::Result and attaches context as errors bubble
// up. These enums cover the cases where behavior branches on the kind:
// - ConfigError: a required environment variable is missing (fatal)
// - CacheError: cache file missing vs malformed (both fatal, different text)
// - FetchError: a page request failed (ends pagination, not the program)
// - CloneError: git failed, is missing, or hung
//
// Rust concepts:
// - thiserror: derive macro that writes the Display and Error impls for us
// - #[from]: automatic conversion so the ? operator works
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// A required setting could not be read at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("environment variable {0} is empty")]
    EmptyEnv(&'static str),

    #[error("no GitHub username given (use --user or set GHS_USER)")]
    MissingUser,

    #[error("could not determine a cache directory; pass --cache explicitly")]
    NoCacheDir,
}

/// Reading the star list cache failed.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache file does not exist. Configuration class: the user either
    /// pointed us at the wrong file or never ran a refresh.
    #[error("JSON file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not valid JSON of the expected shape.
    #[error("invalid JSON format in '{}': {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single page request failed. Pagination stops, already collected
/// entries are kept.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Cloning one repository failed.
#[derive(Debug, Error)]
pub enum CloneError {
    /// git ran and exited non-zero. `stderr` is what it printed.
    #[error("git exited with {}: {stderr}", describe_exit(.code))]
    Failed { code: Option<i32>, stderr: String },

    #[error("'git' command not found")]
    GitNotFound,

    #[error("git clone timed out after {0}s")]
    TimedOut(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "a signal".to_string(),
    }
}

impl CloneError {
    /// Whether the rest of the batch can still make sense after this error.
    /// A missing git binary fails every remaining item the same way.
    pub fn is_fatal_for_batch(&self) -> bool {
        matches!(self, CloneError::GitNotFound)
    }
}
