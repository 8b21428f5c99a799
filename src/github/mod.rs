// src/github/mod.rs
// =============================================================================
// This module is everything that knows what GitHub's star list pages look
// like.
//
// The rest of the app only talks to the StarSource trait:
// - list_names(): which star lists does the user have?
// - list_page(): one page of repositories from one list
//
// If GitHub changes its markup, html.rs is the file to fix. Nothing in the
// crawl/ or clone/ modules needs to change.
//
// Submodules:
// - html: Parses the profile page and list pages with CSS selectors
// - source: The StarSource trait and its reqwest-backed implementation
// =============================================================================

mod html;
mod source;

// Only fakes in other modules' tests need to build pages by hand
#[cfg(test)]
pub use html::ListPage;
pub use source::{GithubStars, StarSource};

/// Base of every GitHub URL we build.
pub const GITHUB_URL: &str = "https://github.com/";

/// Browser page for a repository identifier (`owner/name`).
pub fn repo_html_url(id: &str) -> String {
    format!("{GITHUB_URL}{id}")
}

/// HTTPS clone URL for a repository identifier (`owner/name`).
pub fn repo_clone_url(id: &str) -> String {
    format!("{GITHUB_URL}{id}.git")
}
