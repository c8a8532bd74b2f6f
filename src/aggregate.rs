//! Bottom-up size aggregation for the scanned tree model.
//!
//! This module implements the second core pass. Given the scanner's
//! depth-bucketed skeleton, it resolves:
//! - Per-file sizes and modification times (or SYMLINK/MISSING
//!   sentinels) via the shared classification helper
//! - Each directory's own size (direct, non-symlink, non-missing
//!   files only)
//! - Each subfolder's cumulative subtree total, looked up from the
//!   already-resolved child record
//!
//! Depth levels are processed deepest first, because a directory's
//! subfolder sizes depend on its children's fully-resolved totals.
//! Records within one level are independent and resolve in parallel
//! via `rayon`; the level loop itself is the barrier that keeps the
//! depth-ordering invariant. Resolved subtree totals accumulate in a
//! `DashMap` shared across levels.
//!
//! No operation here is retried and none is fatal: any per-entry
//! failure degrades to a sentinel and the scan continues.

use crate::data::{DirRecord, ModTimeValue, SizeValue, TreeModel};
use crate::utils::classify_file;
use dashmap::DashMap;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Field values computed for one record during a level pass, applied
/// to the model after the parallel iteration finishes.
struct ResolvedParts {
    own_size: u64,
    file_sizes: BTreeMap<String, SizeValue>,
    file_mod_times: BTreeMap<String, ModTimeValue>,
    folder_sizes: BTreeMap<String, SizeValue>,
}

/// Resolves all sizes and modification times in the model, deepest
/// depth level first.
///
/// After this pass the model is complete and treated as read-only;
/// every renderer consumes it as-is.
pub fn resolve_sizes(model: &mut TreeModel) {
    let subtree_totals: DashMap<PathBuf, u64> = DashMap::new();

    for depth in (0..model.levels.len()).rev() {
        let resolved: Vec<(PathBuf, ResolvedParts)> = model.levels[depth]
            .par_iter()
            .map(|(path, record)| {
                let parts = resolve_record(path, record, &subtree_totals);
                let total =
                    parts.own_size + parts.folder_sizes.values().map(SizeValue::bytes).sum::<u64>();
                subtree_totals.insert(path.clone(), total);
                (path.clone(), parts)
            })
            .collect();

        let level = &mut model.levels[depth];
        for (path, parts) in resolved {
            if let Some(record) = level.get_mut(&path) {
                record.own_size = parts.own_size;
                record.file_sizes = parts.file_sizes;
                record.file_mod_times = parts.file_mod_times;
                record.folder_sizes = parts.folder_sizes;
            }
        }
    }
}

/// Resolves the per-child detail of a single directory record.
fn resolve_record(
    dir_path: &Path,
    record: &DirRecord,
    subtree_totals: &DashMap<PathBuf, u64>,
) -> ResolvedParts {
    let mut own_size = 0u64;
    let mut file_sizes = BTreeMap::new();
    let mut file_mod_times = BTreeMap::new();

    for name in &record.file_names {
        let (size, mod_time) = classify_file(&dir_path.join(name));
        // Sentinels report 0 bytes, so only real files accumulate
        own_size += size.bytes();
        file_sizes.insert(name.clone(), size);
        file_mod_times.insert(name.clone(), mod_time);
    }

    let mut folder_sizes = BTreeMap::new();
    for name in &record.folder_names {
        folder_sizes.insert(name.clone(), classify_folder(&dir_path.join(name), subtree_totals));
    }

    ResolvedParts {
        own_size,
        file_sizes,
        file_mod_times,
        folder_sizes,
    }
}

/// Classifies one subfolder entry.
///
/// Symlinks are checked first: a symlinked directory was never walked,
/// so it has no record and must not fall through to MISSING. A real
/// subfolder resolves to its subtree total, already computed when the
/// deeper level was processed. Anything without a record (deleted
/// mid-scan, or unreadable) reports MISSING.
fn classify_folder(path: &Path, subtree_totals: &DashMap<PathBuf, u64>) -> SizeValue {
    let is_symlink = path
        .symlink_metadata()
        .map(|m| m.is_symlink())
        .unwrap_or(false);
    if is_symlink {
        return SizeValue::Symlink;
    }

    match subtree_totals.get(path) {
        Some(total) => SizeValue::Resolved(*total),
        None => SizeValue::Missing,
    }
}
