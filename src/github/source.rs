// src/github/source.rs
// =============================================================================
// This module fetches star list pages over HTTP.
//
// Strategy:
// - One reqwest Client for the whole run (connection pooling, one UA header)
// - The profile stars tab gives us the list names
// - Each list is paged with ?page=N until GitHub runs out
//
// Why not the GitHub API?
// - Star lists are not exposed through the REST API
// - Scraping the public pages needs no token
//
// Rust concepts:
// - Traits: StarSource lets tests feed canned pages instead of the network
// - async fn in traits: stable since Rust 1.75
// =============================================================================

use super::html::{parse_list_names, parse_list_page, ListPage};
use super::GITHUB_URL;
use crate::error::FetchError;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

// GitHub serves a stripped-down page to unknown clients
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where star lists come from.
///
/// The pagination loop in `crawl` only ever calls these two methods, so a
/// change in GitHub's markup stays inside the implementation.
#[allow(async_fn_in_trait)]
pub trait StarSource {
    /// Names of all star lists, in page order.
    async fn list_names(&self) -> Result<Vec<String>, FetchError>;

    /// One page of a list. Pages are numbered from 1.
    async fn list_page(&self, list: &str, page: u32) -> Result<ListPage, FetchError>;
}

/// Star lists of one GitHub user, scraped from github.com.
pub struct GithubStars {
    client: Client,
    username: String,
    base: Url,
}

impl GithubStars {
    pub fn new(username: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("failed to create HTTP client")?;

        let base = Url::parse(GITHUB_URL).context("invalid GitHub base URL")?;

        Ok(GithubStars {
            client,
            username: username.to_string(),
            base,
        })
    }

    /// https://github.com/<user>?tab=stars
    fn stars_tab_url(&self) -> Url {
        let mut url = self.base.clone();
        url.set_path(&self.username);
        url.query_pairs_mut().append_pair("tab", "stars");
        url
    }

    /// https://github.com/stars/<user>/lists/<list>?page=<page>
    fn list_page_url(&self, list: &str, page: u32) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("stars/{}/lists/{}", self.username, list));
        url.query_pairs_mut()
            .append_pair("page", &page.to_string());
        url
    }

    async fn fetch_html(&self, url: Url) -> Result<String, FetchError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl StarSource for GithubStars {
    async fn list_names(&self) -> Result<Vec<String>, FetchError> {
        let html = self.fetch_html(self.stars_tab_url()).await?;
        Ok(parse_list_names(&html, &self.username))
    }

    async fn list_page(&self, list: &str, page: u32) -> Result<ListPage, FetchError> {
        let html = self.fetch_html(self.list_page_url(list, page)).await?;
        Ok(parse_list_page(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_tab_url() {
        let source = GithubStars::new("zuble").unwrap();
        assert_eq!(
            source.stars_tab_url().as_str(),
            "https://github.com/zuble?tab=stars"
        );
    }

    #[test]
    fn test_list_page_url() {
        let source = GithubStars::new("zuble").unwrap();
        assert_eq!(
            source.list_page_url("rust-tools", 3).as_str(),
            "https://github.com/stars/zuble/lists/rust-tools?page=3"
        );
    }
}
