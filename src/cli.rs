// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There are no subcommands: one run is always
//   refresh (if asked or needed) -> pick -> check conflicts -> clone
// and the flags below tweak individual steps.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "ghs",
    version,
    about = "Pick repos from your GitHub star lists and clone them",
    long_about = "ghs scrapes your GitHub star lists into a local JSON cache, lets you fuzzy-search \
                  and multi-select repositories from it, and clones the ones you pick. \
                  Repos that are already cloned in the target directory are skipped."
)]
pub struct Cli {
    /// Directory to clone into (prompted for when omitted)
    ///
    /// This is an optional positional argument
    #[arg(value_name = "TARGET_DIR", conflicts_with = "cwd")]
    pub target_dir: Option<PathBuf>,

    /// Re-scrape all star lists and overwrite the cache before picking
    #[arg(short, long)]
    pub update: bool,

    /// Clone into the current working directory instead of prompting
    #[arg(short, long)]
    pub cwd: bool,

    /// GitHub username whose star lists are scraped
    #[arg(short = 'U', long, env = "GHS_USER")]
    pub user: String,

    /// Cache file (default: <cache dir>/ghs/<user>_stars.json)
    #[arg(long, env = "GHS_CACHE", value_name = "FILE")]
    pub cache: Option<PathBuf>,

    /// Start the picker in exact (substring) match mode
    ///
    /// Ctrl-E switches mode inside the picker; a query starting with '
    /// switches it for that query alone
    #[arg(short, long)]
    pub exact: bool,

    /// Keep cloning after a failure instead of stopping the batch
    #[arg(short, long)]
    pub keep_going: bool,

    /// Open all picked repos in the browser instead of cloning them
    ///
    /// Ctrl-O in the picker opens just the highlighted repo
    #[arg(short, long)]
    pub open: bool,

    /// Give up on a single clone after this many seconds
    #[arg(
        long,
        default_value_t = 600,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub clone_timeout: u64,

    /// Enable debug logging (RUST_LOG also works)
    #[arg(short, long)]
    pub verbose: bool,
}
