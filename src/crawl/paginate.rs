// src/crawl/paginate.rs
// =============================================================================
// This module pages through a single star list.
//
// How it works:
// 1. Start at page 1
// 2. Fetch the page and collect its repository cards
// 3. Stop if the page was empty, has no "next" control, or the next control
//    is disabled
// 4. Otherwise wait a second and fetch the next page
//
// A failed request (bad status or transport error) also stops the loop.
// Repos from earlier pages are kept either way.
// =============================================================================

use crate::cache::Repo;
use crate::github::StarSource;
use std::time::Duration;
use tracing::{debug, warn};

/// Pause between two page requests of the same list.
pub const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Fetches the names of all star lists.
///
/// A failed request is logged and treated as "no lists". The caller carries
/// on with whatever it got.
pub async fn fetch_list_names<S: StarSource>(source: &S) -> Vec<String> {
    match source.list_names().await {
        Ok(names) => {
            debug!(count = names.len(), "found star lists");
            names
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch star lists");
            Vec::new()
        }
    }
}

/// Collects every repository in one star list, across all of its pages.
pub async fn fetch_list<S: StarSource>(source: &S, list: &str) -> Vec<Repo> {
    let mut repos = Vec::new();
    let mut page = 1;

    loop {
        let fetched = match source.list_page(list, page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(list, page, error = %e, "failed to fetch page");
                break;
            }
        };

        if fetched.repos.is_empty() {
            debug!(list, page, "empty page, stopping");
            break;
        }

        debug!(list, page, count = fetched.repos.len(), "fetched page");
        repos.extend(fetched.repos);

        if !fetched.has_next {
            break;
        }

        page += 1;
        // Polite crawling: don't hammer github.com
        tokio::time::sleep(PAGE_DELAY).await;
    }

    repos
}
