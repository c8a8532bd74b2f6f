//! JSON snapshot renderer.
//!
//! Writes `report.json`: a pretty-printed, lossless serialization of
//! the whole [`TreeModel`], keyed by depth level and then by path.
//! The SYMLINK and MISSING sentinels stay distinguishable values
//! (tagged variants), never coerced into numbers, so the snapshot can
//! be read back into an identical model.

use crate::cli::Args;
use crate::data::TreeModel;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// File name of the generated snapshot inside the output folder.
pub const SNAPSHOT_FILE_NAME: &str = "report.json";

/// Renders the JSON snapshot into the output folder.
///
/// # Arguments
/// * `model` - The fully-resolved tree model
/// * `args` - Command line arguments (output folder)
///
/// # Returns
/// * `Result<PathBuf>` - Path of the written snapshot file
pub fn render(model: &TreeModel, args: &Args) -> Result<PathBuf> {
    let snapshot_path = args.output_folder.join(SNAPSHOT_FILE_NAME);
    let json =
        serde_json::to_string_pretty(model).context("Failed to serialize the tree model")?;
    fs::write(&snapshot_path, json)
        .with_context(|| format!("Failed to write {}", snapshot_path.display()))?;
    Ok(snapshot_path)
}
