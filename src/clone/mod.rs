// src/clone/mod.rs
// =============================================================================
// This module gets the selected repositories onto disk.
//
// Submodules:
// - conflict: Splits the selection into "clone it" and "already here"
// - git: The GitClient trait and the real `git clone` subprocess
// - executor: Runs the clones one by one and keeps the tally
// =============================================================================

mod conflict;
mod executor;
mod git;

pub use conflict::check_conflicts;
pub use executor::{clone_all, print_report, FailurePolicy};
pub use git::SystemGit;
