// src/picker/choice.rs
// =============================================================================
// What the picker shows and how a query matches it.
//
// - Each choice reads "[list] owner/name | description"
// - Fuzzy mode scores with the skim algorithm over the whole line
// - Exact mode is a case-insensitive substring test
// - A query starting with ' flips the current mode for that query (fzf style)
// =============================================================================

use crate::cache::{Repo, StarLists};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::HashSet;
use std::fmt;

/// How the picker matches what the user types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Fuzzy,
    /// Case-insensitive substring
    Exact,
}

impl MatchMode {
    pub fn toggled(self) -> Self {
        match self {
            MatchMode::Fuzzy => MatchMode::Exact,
            MatchMode::Exact => MatchMode::Fuzzy,
        }
    }
}

/// One line in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub list: String,
    pub repo: Repo,
}

impl Choice {
    /// "[list] owner/name", what the user mostly reads and searches
    pub fn label(&self) -> String {
        format!("[{}] {}", self.list, self.repo.id)
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.label(), self.repo.description)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.label(), self.repo.description)
    }
}

/// One choice per repo per list, lists in cache order.
pub fn build_choices(lists: &StarLists) -> Vec<Choice> {
    lists
        .iter()
        .flat_map(|list| {
            list.repos.iter().map(|repo| Choice {
                list: list.name.clone(),
                repo: repo.clone(),
            })
        })
        .collect()
}

/// Scores picker lines against the current query.
pub struct ChoiceMatcher {
    mode: MatchMode,
    fuzzy: SkimMatcherV2,
}

impl ChoiceMatcher {
    pub fn new(mode: MatchMode) -> Self {
        ChoiceMatcher {
            mode,
            fuzzy: SkimMatcherV2::default(),
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Switches between fuzzy and exact for every query from now on.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// `None` hides the choice. Higher scores sort first.
    pub fn score(&self, input: &str, choice: &Choice) -> Option<i64> {
        let (mode, query) = match input.strip_prefix('\'') {
            Some(rest) => (self.mode.toggled(), rest),
            None => (self.mode, input),
        };
        let query = query.trim();
        if query.is_empty() {
            return Some(0);
        }

        let haystack = choice.search_text();
        match mode {
            MatchMode::Fuzzy => self.fuzzy.fuzzy_match(&haystack, query),
            MatchMode::Exact => haystack
                .to_lowercase()
                .contains(&query.to_lowercase())
                .then_some(0),
        }
    }
}

/// Identifiers of the picked choices, first occurrence wins.
///
/// The same repo can sit in two lists; it is still cloned only once.
pub fn dedup_ids<'a>(picked: impl IntoIterator<Item = &'a Choice>) -> Vec<String> {
    let mut seen = HashSet::new();
    picked
        .into_iter()
        .map(|choice| choice.repo.id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn lists() -> StarLists {
        let mut lists = StarLists::new();
        lists.insert(
            "rust",
            vec![
                Repo::new("tokio-rs/tokio", "A runtime for writing reliable network applications"),
                Repo::new("BurntSushi/ripgrep", "recursively searches directories"),
            ],
        );
        lists.insert(
            "cli",
            vec![Repo::new("BurntSushi/ripgrep", "recursively searches directories")],
        );
        lists
    }

    fn find<'a>(choices: &'a [Choice], list: &str, id: &str) -> &'a Choice {
        choices
            .iter()
            .find(|c| c.list == list && c.repo.id == id)
            .unwrap()
    }

    #[test]
    fn test_build_choices_labels_with_list() {
        let choices = build_choices(&lists());
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0].label(), "[rust] tokio-rs/tokio");
        assert_eq!(choices[2].label(), "[cli] BurntSushi/ripgrep");
        assert_eq!(
            choices[1].to_string(),
            "[rust] BurntSushi/ripgrep | recursively searches directories"
        );
    }

    #[test]
    fn test_fuzzy_matches_label_and_description() {
        let choices = build_choices(&lists());
        let matcher = ChoiceMatcher::new(MatchMode::Fuzzy);
        let tokio = find(&choices, "rust", "tokio-rs/tokio");

        assert!(matcher.score("tkio", tokio).is_some());
        assert!(matcher.score("reliable", tokio).is_some());
        assert!(matcher.score("zzz", tokio).is_none());
        assert_eq!(matcher.score("", tokio), Some(0));
    }

    #[test]
    fn test_exact_mode_needs_substring() {
        let choices = build_choices(&lists());
        let matcher = ChoiceMatcher::new(MatchMode::Exact);
        let tokio = find(&choices, "rust", "tokio-rs/tokio");

        assert!(matcher.score("tkio", tokio).is_none());
        assert!(matcher.score("TOKIO", tokio).is_some());
        assert!(matcher.score("[rust]", tokio).is_some());
    }

    #[test]
    fn test_quote_prefix_toggles_mode() {
        let choices = build_choices(&lists());
        let tokio = find(&choices, "rust", "tokio-rs/tokio");

        let fuzzy = ChoiceMatcher::new(MatchMode::Fuzzy);
        assert!(fuzzy.score("'tkio", tokio).is_none());
        assert!(fuzzy.score("'tokio", tokio).is_some());

        let exact = ChoiceMatcher::new(MatchMode::Exact);
        assert!(exact.score("'tkio", tokio).is_some());
    }

    #[test]
    fn test_toggle_mode_sticks() {
        let choices = build_choices(&lists());
        let tokio = find(&choices, "rust", "tokio-rs/tokio");

        let mut matcher = ChoiceMatcher::new(MatchMode::Fuzzy);
        matcher.toggle_mode();
        assert_eq!(matcher.mode(), MatchMode::Exact);
        assert!(matcher.score("tkio", tokio).is_none());

        matcher.toggle_mode();
        assert!(matcher.score("tkio", tokio).is_some());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let choices = build_choices(&lists());
        let picked = [&choices[1], &choices[0], &choices[2]];

        assert_eq!(
            dedup_ids(picked),
            vec!["BurntSushi/ripgrep".to_string(), "tokio-rs/tokio".to_string()]
        );
    }
}
