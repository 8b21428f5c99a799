// src/config.rs
// =============================================================================
// Run configuration, built once in main from the CLI and the environment and
// handed to whatever needs it. Nothing here is global.
//
// The one hard requirement is PATH_MNT: the default download root offered by
// the directory prompt. Without it we stop before touching the network.
// =============================================================================

use crate::cli::Cli;
use crate::clone::FailurePolicy;
use crate::error::ConfigError;
use crate::picker::MatchMode;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the default download root.
pub const DOWNLOAD_ROOT_ENV: &str = "PATH_MNT";

#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub cache_path: PathBuf,
    pub download_root: PathBuf,
    pub clone_timeout: Duration,
    pub match_mode: MatchMode,
    pub failure_policy: FailurePolicy,
}

impl Config {
    /// Builds the config from parsed arguments and the process environment.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let download_root = std::env::var(DOWNLOAD_ROOT_ENV).ok();
        Self::from_parts(cli, download_root, dirs::cache_dir())
    }

    // Split out so tests don't have to mutate the real environment
    fn from_parts(
        cli: &Cli,
        download_root: Option<String>,
        cache_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let download_root = require_non_empty(DOWNLOAD_ROOT_ENV, download_root)?;

        let username = cli.user.trim();
        if username.is_empty() {
            return Err(ConfigError::MissingUser);
        }

        let cache_path = match &cli.cache {
            Some(path) => path.clone(),
            None => cache_dir
                .ok_or(ConfigError::NoCacheDir)?
                .join("ghs")
                .join(format!("{username}_stars.json")),
        };

        Ok(Config {
            username: username.to_string(),
            cache_path,
            download_root: PathBuf::from(download_root),
            clone_timeout: Duration::from_secs(cli.clone_timeout),
            match_mode: if cli.exact {
                MatchMode::Exact
            } else {
                MatchMode::Fuzzy
            },
            failure_policy: if cli.keep_going {
                FailurePolicy::KeepGoing
            } else {
                FailurePolicy::FailFast
            },
        })
    }
}

fn require_non_empty(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        None => Err(ConfigError::MissingEnv(name)),
        Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyEnv(name)),
        Some(v) => Ok(v),
    }
}
