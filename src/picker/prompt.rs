// src/picker/prompt.rs
// =============================================================================
// The plain line prompts around the picker, plus opening repo pages.
//
// Both prompts treat esc and ctrl-c as "no", never as an error.
// =============================================================================

use crate::github::repo_html_url;
use anyhow::{Context, Result};
use colored::Colorize;
use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, InquireError, Text};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Asks where to clone to, starting from `default`.
///
/// Returns `None` when the user cancels or clears the input.
pub fn prompt_target_dir(default: &Path) -> Result<Option<PathBuf>> {
    let default = default.display().to_string();
    let validator = |input: &str| -> Result<Validation, CustomUserError> {
        if input.trim().is_empty() || Path::new(input.trim()).is_dir() {
            Ok(Validation::Valid)
        } else {
            Ok(Validation::Invalid("Input is not a directory".into()))
        }
    };

    let answer = Text::new("Enter path to download:")
        .with_default(&default)
        .with_validator(validator)
        .prompt();

    match answer {
        Ok(path) if path.trim().is_empty() => Ok(None),
        Ok(path) => Ok(Some(PathBuf::from(path.trim()))),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("directory prompt failed"),
    }
}

/// Asks whether to go ahead without the conflicting repos. Defaults to no.
pub fn confirm_skip(conflicts: usize) -> Result<bool> {
    let answer = Confirm::new(&format!("skip {conflicts} conflicting repos?"))
        .with_default(false)
        .prompt();

    match answer {
        Ok(yes) => Ok(yes),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(e).context("confirmation prompt failed"),
    }
}

/// Opens one repository's GitHub page in the default browser and returns
/// the URL. Prints nothing, so the picker can call it mid-session.
pub fn open_repo_page(id: &str) -> std::io::Result<String> {
    let url = repo_html_url(id);
    open::that(&url)?;
    Ok(url)
}

/// Opens each repository's GitHub page in the default browser.
///
/// Returns how many were opened.
pub fn open_in_browser(ids: &[String]) -> usize {
    let mut opened = 0;
    for id in ids {
        println!("{} {}", "Opening".dimmed(), repo_html_url(id));
        match open_repo_page(id) {
            Ok(_) => opened += 1,
            Err(e) => {
                warn!(%id, error = %e, "failed to open browser");
                println!("{} {}: {}", "Error opening".red().bold(), id, e);
            }
        }
    }
    opened
}
