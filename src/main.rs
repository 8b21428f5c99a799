// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Build the run configuration (fails fast if PATH_MNT is missing)
// 3. Refresh the star list cache if asked to, or if there is none yet
// 4. Let the user pick repos, then clone them (or open them in the browser)
// 5. Exit with proper code (0 = success or cancelled, 1 = a clone failed,
//    2 = error)
//
// Everything runs one step at a time. The tokio runtime is only there
// because reqwest and the git subprocess are async.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cache; // src/cache.rs - star list model and JSON cache
mod cli; // src/cli.rs - command-line parsing
mod clone; // src/clone/ - conflict check and git clone
mod config; // src/config.rs - run configuration
mod crawl; // src/crawl/ - paging through star lists
mod error; // src/error.rs - typed errors
mod github; // src/github/ - GitHub HTML scraping
mod picker; // src/picker/ - repo picker and prompts

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use clone::SystemGit;
use colored::Colorize;
use config::Config;
use picker::Selection;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
const EXIT_CLONE_FAILED: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            debug!(error = ?e, "run failed");
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins if set; --verbose turns on debug output for this crate.
// Logs go to stderr so they don't interleave with the picker on stdout.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ghs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = Config::from_cli(&cli)?;
    debug!(?config, "configuration loaded");

    if cli.update || !config.cache_path.exists() {
        let source = github::GithubStars::new(&config.username)?;
        crawl::refresh_cache(&source, &config.cache_path).await?;
    }

    let lists = cache::read_cache(&config.cache_path)?;

    let selected = match picker::select_repos(&lists, config.match_mode)? {
        Selection::Picked(ids) => ids,
        Selection::Cancelled => {
            println!("Selection cancelled.");
            return Ok(EXIT_OK);
        }
    };

    if selected.is_empty() {
        println!("No repos selected. Exiting.");
        return Ok(EXIT_OK);
    }
    info!(count = selected.len(), "repos selected");

    if cli.open {
        let opened = picker::open_in_browser(&selected);
        println!("\nOpened {}/{} repos.", opened, selected.len());
        return Ok(EXIT_OK);
    }

    let Some(target_dir) = resolve_target_dir(&cli, &config)? else {
        println!("Target directory cannot be empty. Exiting.");
        return Ok(EXIT_OK);
    };

    handle_clone(&config, &selected, &target_dir).await
}

// --cwd, then the positional argument, then ask
fn resolve_target_dir(cli: &Cli, config: &Config) -> Result<Option<PathBuf>> {
    if cli.cwd {
        return Ok(Some(std::env::current_dir()?));
    }
    if let Some(dir) = &cli.target_dir {
        return Ok(Some(dir.clone()));
    }
    picker::prompt_target_dir(&config.download_root)
}

// Checks for repos that are already there, asks about them, then clones
// the rest
async fn handle_clone(config: &Config, selected: &[String], target_dir: &Path) -> Result<i32> {
    let partition = clone::check_conflicts(selected, target_dir)?;

    if !partition.conflicting.is_empty() {
        println!(
            "\n{} {}:",
            "Selected repos already exist @".yellow(),
            target_dir.display()
        );
        for id in &partition.conflicting {
            println!(" - {id}");
        }

        if !picker::confirm_skip(partition.conflicting.len())? {
            println!("Cloning cancelled by user.");
            return Ok(EXIT_OK);
        }
    }

    if partition.fetchable.is_empty() {
        println!("No repos left to clone after conflict check.");
        return Ok(EXIT_OK);
    }

    println!(
        "\nProceeding to clone {} repos...",
        partition.fetchable.len()
    );
    let git = SystemGit::new(config.clone_timeout);
    let report =
        clone::clone_all(&git, &partition.fetchable, target_dir, config.failure_policy).await?;
    clone::print_report(&report);

    if report.is_success() {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_CLONE_FAILED)
    }
}
