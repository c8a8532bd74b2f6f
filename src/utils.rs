//! Utility functions for the `storep` audit tool.
//!
//! This module provides:
//! - Size/mod-time classification of a single file entry
//! - Human-readable byte-size formatting (1024-based, capped at PB)
//! - Sentinel-aware rendering of size and timestamp values
//! - Directory depth calculation relative to the scan root
//! - Glob-based exclusion pattern parsing
//!
//! The classification and formatting helpers are shared between the
//! aggregation pass and every renderer, so the sentinel handling lives
//! in exactly one place.

use crate::data::{ModTimeValue, SizeValue};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::Path;

/// Unit labels for human-readable sizes, one per power of 1024.
const SIZE_UNITS: [&str; 6] = ["b", "KB", "MB", "GB", "TB", "PB"];

/// Classifies a single file entry, resolving its size and modification
/// time or degrading to a sentinel.
///
/// The missing check runs first: an entry that no longer resolves to a
/// regular file (deleted, replaced by a directory, or a broken
/// symlink) reports `Missing`. Entries that resolve but are symbolic
/// links report `Symlink` and are excluded from all totals.
///
/// # Arguments
/// * `path` - The file entry path to classify
///
/// # Returns
/// * `(SizeValue, ModTimeValue)` - Size and modification time; both
///   carry the same sentinel when the entry itself cannot be resolved
pub fn classify_file(path: &Path) -> (SizeValue, ModTimeValue) {
    // fs::metadata follows symlinks, so this is the "still resolves to
    // a regular file" check
    let meta = match fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        _ => return (SizeValue::Missing, ModTimeValue::Missing),
    };

    let is_symlink = path
        .symlink_metadata()
        .map(|m| m.is_symlink())
        .unwrap_or(false);
    if is_symlink {
        return (SizeValue::Symlink, ModTimeValue::Symlink);
    }

    let mod_time = match meta.modified() {
        Ok(t) => ModTimeValue::Resolved(DateTime::<Utc>::from(t)),
        Err(_) => ModTimeValue::Missing,
    };
    (SizeValue::Resolved(meta.len()), mod_time)
}

/// Formats a byte count as a human-readable size string.
///
/// Divides by 1024 while the value is at least 1024, stepping through
/// b, KB, MB, GB, TB and PB. Values of a petabyte and beyond all stay
/// in PB. The final quotient is rounded to 3 decimal digits, with
/// trailing zeros trimmed.
///
/// # Examples
/// * `0` formats as `"0 b"`
/// * `1023` formats as `"1023 b"`
/// * `1024` formats as `"1 KB"`
/// * `1048575` formats as `"1023.999 KB"`
pub fn human_readable_size(size_in_bytes: u64) -> String {
    let mut size = size_in_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{} {}", round_to_3_digits(size), SIZE_UNITS[unit])
}

/// Rounds to 3 decimal digits and trims trailing zeros, so whole
/// quotients print without a fraction ("1", not "1.000").
fn round_to_3_digits(value: f64) -> String {
    let mut text = format!("{:.3}", value);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Renders a size value, special-casing the sentinels before any
/// numeric formatting.
pub fn format_size_value(value: &SizeValue) -> String {
    match value {
        SizeValue::Resolved(bytes) => human_readable_size(*bytes),
        SizeValue::Symlink => "SYMLINK".to_string(),
        SizeValue::Missing => "MISSING".to_string(),
    }
}

/// Renders a modification time value, special-casing the sentinels.
pub fn format_mod_time_value(value: &ModTimeValue) -> String {
    match value {
        ModTimeValue::Resolved(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        ModTimeValue::Symlink => "SYMLINK".to_string(),
        ModTimeValue::Missing => "MISSING".to_string(),
    }
}

/// Calculates how many path components lie between `root` and `path`.
/// This is used to determine directory depth relative to the scan root.
pub fn path_depth(root: &Path, path: &Path) -> usize {
    path.strip_prefix(root)
        .map(|p| p.components().count())
        .unwrap_or(0)
}

/// Expands exclude patterns into common glob forms:
/// For example, "node_modules" becomes:
///   - `**/node_modules`
///   - `**/node_modules/**`
///     unless the pattern already includes glob symbols or extensions.
pub fn expand_exclude_patterns(patterns: &[String]) -> Vec<String> {
    let mut expanded = Vec::new();

    for pat in patterns {
        let pat = pat.trim();
        if pat.contains('*') || pat.ends_with('/') || pat.contains('.') {
            expanded.push(pat.to_string());
        } else {
            expanded.push(format!("**/{}", pat));
            expanded.push(format!("**/{}/**", pat));
        }
    }

    expanded
}

/// Compiles a list of glob patterns into a `GlobSet` matcher,
/// which can be used to test paths efficiently.
pub fn build_exclude_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build glob set")
}
