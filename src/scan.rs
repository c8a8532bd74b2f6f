//! File system scanning module for `storep`.
//!
//! This module implements the first of the two core passes:
//! - Recursive directory traversal using `WalkDir`, never following
//!   symlinked directories
//! - One skeleton [`DirRecord`] per visited directory, bucketed by
//!   depth level relative to the scan root
//! - Child-name bookkeeping: real subdirectories and symlinks whose
//!   target is a directory are recorded as folder names, everything
//!   else as file names
//! - Filtering via glob-based exclude rules
//! - Progress spinner via `indicatif`
//!
//! The main entry point is [`scan_tree`], which returns a [`TreeModel`]
//! with counts and child names fixed but no sizes; those are filled by
//! the aggregation pass, which must visit deeper levels first and
//! therefore cannot run inside this top-down walk.
//!
//! Error policy: a missing root aborts with [`ScanError::RootNotFound`]
//! before any traversal begins. Entries that become unreadable during
//! the walk are skipped, never fatal.

use crate::cli::Args;
use crate::data::{DirRecord, TreeModel};
use crate::utils::path_depth;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors produced by the scanner pass.
///
/// `RootNotFound` is the only fatal condition in the core; everything
/// else degrades to a sentinel during aggregation.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("root folder '{}' does not exist or is not a folder", .0.display())]
    RootNotFound(PathBuf),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Walks the tree once and builds the depth-bucketed record skeletons.
///
/// Every directory reachable from `root` through real subdirectories
/// gets a [`DirRecord`] at its depth level. Symlinked directories are
/// listed in their parent's folder names but never descended into, so
/// the walk cannot re-enter a directory under a different name.
///
/// # Arguments
/// * `root` - The root path to start scanning from
/// * `args` - Command line arguments controlling scan behavior
/// * `exclude_matcher` - Compiled glob patterns for excluding entries
///
/// # Returns
/// * `Result<TreeModel, ScanError>` - The skeleton model on success
///
/// # Errors
/// Returns [`ScanError::RootNotFound`] if the root path does not exist
/// or does not designate a directory.
pub fn scan_tree(
    root: &Path,
    args: &Args,
    exclude_matcher: &globset::GlobSet,
) -> Result<TreeModel, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    // Setup a spinner to indicate scanning progress in the terminal
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner} Scanning folders... [{elapsed}]")
            .context("Failed to set progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut model = TreeModel::new();

    let walker = walkdir::WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            !exclude_matcher.is_match(e.path())
                && !e
                    .path()
                    .components()
                    .any(|c| args.exclude.iter().any(|x| c.as_os_str() == OsStr::new(x)))
        });

    for entry in walker {
        pb.tick();
        // Unreadable entries are skipped; the scan stays resilient to
        // filesystem mutation and permission holes
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();
        let depth = path_depth(root, path);
        let is_real_dir = entry.file_type().is_dir();

        if is_real_dir {
            model.insert(DirRecord::new(path.to_path_buf(), depth));
        }

        // The root has no parent record to register with
        if depth == 0 {
            continue;
        }

        let Some(parent) = path.parent() else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().to_string();

        if let Some(parent_record) = model
            .levels
            .get_mut(depth - 1)
            .and_then(|level| level.get_mut(parent))
        {
            if is_real_dir || is_symlink_to_dir(&entry) {
                parent_record.folder_names.push(name);
                parent_record.subfolder_count += 1;
            } else {
                parent_record.file_names.push(name);
                parent_record.file_count += 1;
            }
        }
    }

    pb.finish_with_message("Scan complete");

    Ok(model)
}

/// Whether a non-traversed entry is a symlink pointing at a directory.
///
/// Such entries belong in the parent's folder list (they will resolve
/// to the SYMLINK sentinel during aggregation) but get no record of
/// their own and are never walked.
fn is_symlink_to_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_symlink()
        && fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false)
}
