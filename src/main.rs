//! Main entry point for the `storep` CLI application.
//!
//! `storep` generates a point-in-time storage audit of a filesystem
//! subtree: a depth-organized markdown report plus optional JSON and
//! CSV snapshots, for operators who need to know what a shared volume
//! holds without prior knowledge of its contents.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Sets up glob-based exclusion rules and the rayon thread pool
//! - Delegates traversal to [`scan_tree`] and size resolution to
//!   [`resolve_sizes`]
//! - Hands the finished model to the selected renderers
//!
//! # Output Modes
//! - Markdown report (`Data_Report.md`, always)
//! - JSON snapshot via `--json`
//! - CSV export via `--csv <file.csv>`
//!
//! # Flags of Interest
//! - `--depth N`: Limit the report to N directory levels (scan always
//!   runs to full depth)
//! - `--exclude PATTERN`: Skip matching subtrees
//! - `--profile`: Show phase timings after the run

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use storep::metrics::{PhaseTimer, ProfileData, print_profile_summary, rss_after_phase};
use storep::utils::{build_exclude_matcher, expand_exclude_patterns, human_readable_size};
use storep::{Args, output, resolve_sizes, scan_tree};

/// Sets up the thread pool configuration based on CLI arguments.
fn setup_thread_pool(args: &Args) -> Result<()> {
    if let Some(n_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()
            .context("Failed to configure thread pool")?;
        println!("Using {} CPU thread(s)", n_threads);
    } else {
        println!("Using all {} available CPU threads", num_cpus::get());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Print banner
    println!(
        r#"
------------------------------------------------------------------
     _____ _____ _____ _____ _____ _____
    |   __|_   _|     | __  |   __|  _  |
    |__   | | | |  |  |    -|   __|   __|
    |_____| |_| |_____|__|__|_____|__|
            folder content report generator
------------------------------------------------------------------
"#
    );

    // Parse args -> setup_thread_pool -> scan_tree -> resolve_sizes -> renderers
    setup_thread_pool(&args)?;

    let expanded_patterns = expand_exclude_patterns(&args.exclude);
    let exclude_matcher = build_exclude_matcher(&expanded_patterns)?;

    let mut profile = ProfileData::new();

    let timer = PhaseTimer::new("Walk");
    let mut model = scan_tree(&args.folder, &args, &exclude_matcher)?;
    profile.add_phase(timer.finish());

    let timer = PhaseTimer::new("Aggregate");
    resolve_sizes(&mut model);
    profile.add_phase(timer.finish());

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!(
                "Failed to create output folder {}",
                args.output_folder.display()
            )
        })?;
    }

    let timer = PhaseTimer::new("Render");
    let report_path = output::render_markdown(&model, &args)?;
    println!("Markdown report written to: {}", report_path.display());

    if args.json {
        let snapshot_path = output::render_json(&model, &args)?;
        println!("JSON snapshot written to: {}", snapshot_path.display());
    }

    if args.csv.is_some() {
        output::render_csv(&model, &args)?;
    }
    profile.add_phase(timer.finish());

    println!(
        "Scanned {} folders down to depth {}, total size {}",
        model.record_count(),
        model.max_depth,
        human_readable_size(model.total_size())
    );

    if args.profile {
        profile.memory_peak = rss_after_phase();
        print_profile_summary(&profile);
    }

    Ok(())
}
