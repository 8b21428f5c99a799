// src/picker/mod.rs
// =============================================================================
// The interactive side of the app: picking repos, choosing a directory, and
// confirming that conflicting repos may be skipped.
//
// The repo picker is a full-screen list over every repo in every list. It
// filters as you type, lets you toggle many repos, switch between fuzzy and
// exact matching, and open the highlighted repo on GitHub without leaving.
// Esc cancels, which the caller treats as a normal exit.
//
// Submodules:
// - choice: Picker lines, fuzzy/exact matching, deduplication
// - state: Key handling and selection, no terminal involved
// - view: ratatui drawing and the crossterm event loop
// - prompt: Target directory and skip-conflicts prompts, opening repo pages
// =============================================================================

mod choice;
mod prompt;
mod state;
mod view;

pub use choice::MatchMode;
pub use prompt::{confirm_skip, open_in_browser, open_repo_page, prompt_target_dir};

use crate::cache::StarLists;
use anyhow::Result;
use choice::build_choices;
use colored::Colorize;
use state::PickerState;
use tracing::debug;

/// What the user did with the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Distinct identifiers, in list order
    Picked(Vec<String>),
    Cancelled,
}

fn print_banner(lists: &StarLists) {
    let names: Vec<&str> = lists.names().collect();
    println!("{} {}", "STAR LISTS:".bold(), names.join(", ").cyan());
}

/// Shows the picker and returns the chosen identifiers.
pub fn select_repos(lists: &StarLists, mode: MatchMode) -> Result<Selection> {
    let choices = build_choices(lists);
    if choices.is_empty() {
        debug!("cache has no repos, nothing to pick");
        return Ok(Selection::Picked(Vec::new()));
    }

    print_banner(lists);

    let mut state = PickerState::new(choices, mode);
    let selection = view::run(&mut state)?;
    debug!(?selection, "picker closed");
    Ok(selection)
}
