// src/crawl/mod.rs
// =============================================================================
// This module walks a user's star lists and turns them into a cache file.
//
// Features:
// - Pages through each list until GitHub says there is no next page
// - Polite crawling: a fixed one second pause between pages
// - Any failed request ends that list (or the list index) without
//   throwing away what was already collected
// - Refreshing replaces the cache file wholesale
//
// Everything runs one request at a time. There is no retry anywhere.
// =============================================================================

mod paginate;
mod refresh;

pub use refresh::refresh_cache;
