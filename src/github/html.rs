// src/github/html.rs
// =============================================================================
// This module pulls star list data out of GitHub's HTML.
//
// Two kinds of pages are parsed:
// - The profile stars tab (https://github.com/<user>?tab=stars), which links
//   to every list as /stars/<user>/lists/<name>
// - A list page (https://github.com/stars/<user>/lists/<name>?page=N), which
//   holds one card per repository inside #user-list-repositories
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// None of this is a public API. The selectors below are whatever GitHub
// happens to render today.
// =============================================================================

use crate::cache::{Repo, NO_DESCRIPTION};
use scraper::{ElementRef, Html, Selector};

/// The repositories on one page of a star list, plus whether GitHub offers
/// a next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub repos: Vec<Repo>,
    pub has_next: bool,
}

// Our selectors are constants and known to be valid, so a parse failure
// is a programmer error
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Extracts star list names from the user's stars tab.
///
/// Every anchor whose `href` contains `/stars/<user>/lists/` names a list;
/// the name is whatever follows that prefix. Names are returned in page
/// order, without duplicates (GitHub may link the same list twice).
pub fn parse_list_names(html: &str, username: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = selector("a[href]");
    let prefix = format!("/stars/{username}/lists/");

    let mut names: Vec<String> = Vec::new();
    for element in document.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(pos) = href.find(&prefix) else {
            continue;
        };

        // Drop any query string or fragment that rides along
        let name = href[pos + prefix.len()..]
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    names
}

/// Parses one page of a star list.
///
/// Repository cards are the direct `div` children of
/// `#user-list-repositories`. A page without that container yields no repos
/// and no next page.
pub fn parse_list_page(html: &str) -> ListPage {
    let document = Html::parse_document(html);
    let cards = selector("#user-list-repositories > div");

    let repos = document.select(&cards).filter_map(parse_card).collect();

    ListPage {
        repos,
        has_next: has_next_page(&document),
    }
}

// Reads one repository card. Cards without a heading link are skipped.
fn parse_card(card: ElementRef) -> Option<Repo> {
    let link = selector("h3 a[href]");
    let desc = selector("p.col-9");

    let href = card.select(&link).next()?.value().attr("href")?;
    // "/tokio-rs/tokio" -> "tokio-rs/tokio"
    let id = href.strip_prefix('/').unwrap_or(href);
    if id.is_empty() {
        return None;
    }

    let description = card
        .select(&desc)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    Some(Repo::new(id, description))
}

// The pagination block has a .next_page control. On the last page it is
// either missing or rendered disabled.
fn has_next_page(document: &Html) -> bool {
    let pagination = selector("div.pagination");
    let next = selector(".next_page");

    let Some(block) = document.select(&pagination).next() else {
        return false;
    };
    let Some(button) = block.select(&next).next() else {
        return false;
    };

    let element = button.value();
    let disabled = element.classes().any(|c| c == "disabled")
        || element.attr("aria-disabled") == Some("true");

    !disabled
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why "> div" in the card selector?
//    - Cards contain nested divs of their own
//    - Only the direct children of the container are cards
//
// 2. Why check both the class and aria-disabled?
//    - GitHub has rendered the disabled "Next" both ways over time
//    - Either one means there is nothing more to fetch
// -----------------------------------------------------------------------------
