//! Data structures for the storage audit model.
//!
//! This module defines the core data structures produced by the scanner
//! and aggregator and consumed by every renderer:
//!
//! - [`SizeValue`] / [`ModTimeValue`]: per-entry values that carry the
//!   SYMLINK and MISSING sentinels as explicit variants instead of
//!   overloading the numeric domain
//! - [`DirRecord`]: one record per visited directory (counts, child
//!   names, per-child detail, own size)
//! - [`TreeModel`]: the depth-indexed collection of records, built once
//!   per invocation and read-only after aggregation
//!
//! All types derive `Serialize`/`Deserialize` so the `--json` snapshot
//! round-trips without information loss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The size of a single child entry.
///
/// # Variants
/// * `Resolved` - a real byte count
/// * `Symlink` - the entry is a symbolic link; it is listed but never
///   counted toward any total
/// * `Missing` - the entry disappeared between enumeration and size
///   resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeValue {
    Resolved(u64),
    Symlink,
    Missing,
}

impl SizeValue {
    /// Returns the byte count for resolved sizes, 0 for sentinels.
    ///
    /// Symlinks and missing entries contribute zero to every total,
    /// so summing over `bytes()` is always safe.
    pub fn bytes(&self) -> u64 {
        match self {
            SizeValue::Resolved(n) => *n,
            SizeValue::Symlink | SizeValue::Missing => 0,
        }
    }

    /// Whether this value carries a real byte count.
    pub fn is_resolved(&self) -> bool {
        matches!(self, SizeValue::Resolved(_))
    }
}

/// The modification time of a single child entry, with the same
/// sentinel semantics as [`SizeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModTimeValue {
    Resolved(DateTime<Utc>),
    Symlink,
    Missing,
}

/// One record per directory visited by the scanner.
///
/// The name lists preserve filesystem enumeration order (not stable
/// across runs); the per-name maps carry the resolved detail filled in
/// by the aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirRecord {
    /// Path of this directory, unique key within the model.
    pub path: PathBuf,
    /// Distance in path segments from the scan root; root is 0.
    pub depth: usize,
    /// Number of direct file entries counted at scan time.
    pub file_count: usize,
    /// Number of direct subfolder entries counted at scan time.
    pub subfolder_count: usize,
    /// Sum of sizes of direct, non-symlink, non-missing files.
    pub own_size: u64,
    /// Direct file entry names in enumeration order.
    pub file_names: Vec<String>,
    /// Direct subfolder names in enumeration order.
    pub folder_names: Vec<String>,
    /// Per-file size detail, keyed by entry name.
    pub file_sizes: BTreeMap<String, SizeValue>,
    /// Per-file modification time detail, keyed by entry name.
    pub file_mod_times: BTreeMap<String, ModTimeValue>,
    /// Resolved subtree total per subfolder name.
    pub folder_sizes: BTreeMap<String, SizeValue>,
}

impl DirRecord {
    /// Creates an empty skeleton record for the scanner pass.
    ///
    /// Counts and name lists are filled during the walk; sizes and
    /// modification times stay empty until the aggregation pass.
    pub fn new(path: PathBuf, depth: usize) -> Self {
        Self {
            path,
            depth,
            file_count: 0,
            subfolder_count: 0,
            own_size: 0,
            file_names: Vec::new(),
            folder_names: Vec::new(),
            file_sizes: BTreeMap::new(),
            file_mod_times: BTreeMap::new(),
            folder_sizes: BTreeMap::new(),
        }
    }

    /// Cumulative subtree total: own size plus every resolved
    /// subfolder total. Symlinked and missing subfolders contribute 0.
    pub fn total_size(&self) -> u64 {
        self.own_size + self.folder_sizes.values().map(SizeValue::bytes).sum::<u64>()
    }
}

/// The depth-indexed tree model.
///
/// `levels[d]` maps directory paths to their records at depth `d`.
/// An explicit vector of ordered maps keeps structural metadata
/// (`max_depth`) out of the per-path key space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeModel {
    pub levels: Vec<BTreeMap<PathBuf, DirRecord>>,
    pub max_depth: usize,
}

impl TreeModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            max_depth: 0,
        }
    }

    /// Inserts a record at its depth level, growing the level vector
    /// and raising `max_depth` as needed.
    pub fn insert(&mut self, record: DirRecord) {
        let depth = record.depth;
        while self.levels.len() <= depth {
            self.levels.push(BTreeMap::new());
        }
        if depth > self.max_depth {
            self.max_depth = depth;
        }
        self.levels[depth].insert(record.path.clone(), record);
    }

    /// Looks up the record for `path` at the given depth level.
    pub fn get(&self, depth: usize, path: &Path) -> Option<&DirRecord> {
        self.levels.get(depth).and_then(|level| level.get(path))
    }

    /// The scan root's record (the single entry at depth 0).
    pub fn root(&self) -> Option<&DirRecord> {
        self.levels.first().and_then(|level| level.values().next())
    }

    /// Resolved total size of the entire scanned subtree.
    pub fn total_size(&self) -> u64 {
        self.root().map(DirRecord::total_size).unwrap_or(0)
    }

    /// Number of directory records across all depth levels.
    pub fn record_count(&self) -> usize {
        self.levels.iter().map(BTreeMap::len).sum()
    }

    /// Iterates all records, shallowest level first.
    pub fn records(&self) -> impl Iterator<Item = &DirRecord> {
        self.levels.iter().flat_map(BTreeMap::values)
    }
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_size_value_bytes() {
        assert_eq!(SizeValue::Resolved(1024).bytes(), 1024);
        assert_eq!(SizeValue::Symlink.bytes(), 0);
        assert_eq!(SizeValue::Missing.bytes(), 0);
        assert!(SizeValue::Resolved(0).is_resolved());
        assert!(!SizeValue::Symlink.is_resolved());
    }

    #[test]
    fn test_record_total_size() {
        let mut record = DirRecord::new(PathBuf::from("/data"), 0);
        record.own_size = 100;
        record
            .folder_sizes
            .insert("a".to_string(), SizeValue::Resolved(50));
        record
            .folder_sizes
            .insert("b".to_string(), SizeValue::Symlink);
        record
            .folder_sizes
            .insert("c".to_string(), SizeValue::Missing);

        // Sentinels contribute nothing
        assert_eq!(record.total_size(), 150);
    }

    #[test]
    fn test_model_insert_tracks_max_depth() {
        let mut model = TreeModel::new();
        model.insert(DirRecord::new(PathBuf::from("/data"), 0));
        model.insert(DirRecord::new(PathBuf::from("/data/a/b"), 2));
        model.insert(DirRecord::new(PathBuf::from("/data/a"), 1));

        assert_eq!(model.max_depth, 2);
        assert_eq!(model.levels.len(), 3);
        assert_eq!(model.record_count(), 3);
        assert_eq!(model.root().unwrap().path, PathBuf::from("/data"));
    }

    #[test]
    fn test_sentinel_serialization_is_distinguishable() {
        let resolved = serde_json::to_string(&SizeValue::Resolved(42)).unwrap();
        let symlink = serde_json::to_string(&SizeValue::Symlink).unwrap();
        let missing = serde_json::to_string(&SizeValue::Missing).unwrap();

        assert_eq!(resolved, r#"{"resolved":42}"#);
        assert_eq!(symlink, r#""symlink""#);
        assert_eq!(missing, r#""missing""#);

        let back: SizeValue = serde_json::from_str(&resolved).unwrap();
        assert_eq!(back, SizeValue::Resolved(42));
    }
}
