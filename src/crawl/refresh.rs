// src/crawl/refresh.rs
// =============================================================================
// Rebuilds the star list cache from scratch.
//
// Every list on the stars tab gets an entry, including lists that come back
// empty, so the cache mirrors what GitHub shows. The file is always
// rewritten, even when nothing could be fetched.
// =============================================================================

use super::paginate::{fetch_list, fetch_list_names};
use crate::cache::{write_cache, StarLists};
use crate::github::StarSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Scrapes every star list and writes the result to `cache_path`.
pub async fn refresh_cache<S: StarSource>(source: &S, cache_path: &Path) -> Result<StarLists> {
    println!("{}", "Refreshing star lists...".bold());

    let names = fetch_list_names(source).await;
    if names.is_empty() {
        println!("{}", "No star lists found".yellow());
    }

    let mut lists = StarLists::new();
    for name in names {
        println!("\n{} {}", "List:".cyan(), name.bold());

        let repos = fetch_list(source, &name).await;
        if repos.is_empty() {
            println!("   {}", "No repositories found in this list".yellow());
        } else {
            println!("   {} repo(s)", repos.len());
        }
        lists.insert(name, repos);
    }

    write_cache(cache_path, &lists)
        .with_context(|| format!("failed to write cache '{}'", cache_path.display()))?;

    info!(
        path = %cache_path.display(),
        lists = lists.len(),
        repos = lists.repo_count(),
        "cache refreshed"
    );
    Ok(lists)
}
