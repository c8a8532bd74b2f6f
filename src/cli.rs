//! CLI interface definitions for the `storep` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`CsvRow`]: the flat per-directory record used for CSV export
//!
//! The `Args` struct is used in `main.rs` and the renderers to control
//! behavior such as exclusion rules, the render-side depth cap, and
//! which output files get written.
//!
//! # Example
//!
//! ```bash
//! storep /data/shared ./report --json --depth 2 --exclude .git node_modules
//! ```
//!
//! # Dependencies
//! - [`clap`] for argument parsing and help generation

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the `storep` report generator.
///
/// The two positional paths mirror the tool's one-shot flow: scan the
/// base folder, write the report files into the output folder. All
/// remaining flags tune the scan or select additional output formats.
#[derive(Parser, Debug)]
#[command(name = "storep", author = "Sam Green", version, about)]
pub struct Args {
    /// Base folder that shall be scanned
    pub folder: PathBuf,

    /// Output folder for the generated report files (created if absent)
    pub output_folder: PathBuf,

    /// Also write a report.json snapshot of the full tree model
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write a flat CSV export of all directory records to FILE
    #[arg(long, value_name = "FILE")]
    pub csv: Option<String>,

    /// Limit the markdown report to directories up to N levels deep
    /// (the scan itself always runs to full depth)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Exclude entries with matching names (e.g., '.git', 'node_modules')
    #[arg(long, value_name = "PATTERN", num_args = 1.., action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Limit the number of CPU threads used (default: use all available)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Enable performance profiling and show timing summary
    #[arg(long, default_value_t = false)]
    pub profile: bool,
}

/// A single record of output (used for CSV serialization).
///
/// # Fields
/// * `depth` - Depth level of the directory, root is 0
/// * `path` - Full path to the directory
/// * `files` - Number of direct file entries
/// * `subfolders` - Number of direct subfolder entries
/// * `own_size_bytes` - Sum of direct non-symlink file sizes
/// * `total_size_bytes` - Resolved cumulative subtree size
/// * `total_size_human` - Human-readable subtree size (e.g., "1.2 MB")
#[derive(Debug, serde::Serialize)]
pub struct CsvRow {
    pub depth: usize,
    pub path: String,
    pub files: usize,
    pub subfolders: usize,
    pub own_size_bytes: u64,
    pub total_size_bytes: u64,
    pub total_size_human: String,
}
