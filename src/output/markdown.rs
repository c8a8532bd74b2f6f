//! Markdown report renderer.
//!
//! Builds the depth-organized `Data_Report.md` from a fully-resolved
//! [`TreeModel`]: a title and generation timestamp, a table of
//! contents, then one section per directory, grouped by depth level.
//! Each section lists the folder's counts and totals plus a files
//! table (Name | Size | Last modified) and a folders table
//! (Name | Total Size).
//!
//! The renderer honors the `--depth` cap and emits a note when the
//! scanned tree is deeper than the report shows. It contains no
//! domain logic: sentinels arrive pre-classified and sizes
//! pre-resolved; everything here is formatting.

use crate::cli::Args;
use crate::data::{DirRecord, ModTimeValue, SizeValue, TreeModel};
use crate::utils::{format_mod_time_value, format_size_value, human_readable_size};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// File name of the generated report inside the output folder.
pub const REPORT_FILE_NAME: &str = "Data_Report.md";

/// Renders the markdown report into the output folder.
///
/// # Arguments
/// * `model` - The fully-resolved tree model
/// * `args` - Command line arguments (output folder and depth cap)
///
/// # Returns
/// * `Result<PathBuf>` - Path of the written report file
pub fn render(model: &TreeModel, args: &Args) -> Result<PathBuf> {
    let report_path = args.output_folder.join(REPORT_FILE_NAME);
    let document = build_document(model, args.depth)?;
    fs::write(&report_path, document)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;
    Ok(report_path)
}

/// Builds the full report document as a string.
fn build_document(model: &TreeModel, depth_cap: Option<usize>) -> Result<String> {
    let cap = depth_cap
        .map(|d| d.min(model.max_depth))
        .unwrap_or(model.max_depth);

    let mut doc = String::new();

    let base = model
        .root()
        .map(|r| r.path.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    writeln!(doc, "# Storage Report on {}", base)?;
    writeln!(doc)?;
    writeln!(
        doc,
        "This is an auto-generated storage report giving detailed info on files and folders inside the base folder."
    )?;
    writeln!(doc)?;
    writeln!(
        doc,
        "Report generated {}",
        chrono::Local::now().format("%d.%m.%Y %H:%M:%S")
    )?;
    writeln!(doc)?;

    write_contents_list(&mut doc, model, cap)?;

    if cap < model.max_depth {
        writeln!(
            doc,
            "> Note: this report is truncated at depth {}; the scanned tree reaches depth {}.",
            cap, model.max_depth
        )?;
        writeln!(doc)?;
    }

    for level in model.levels.iter().take(cap + 1) {
        for record in level.values() {
            write_section(&mut doc, record)?;
        }
    }

    Ok(doc)
}

/// Writes the table of contents, one link per rendered section.
fn write_contents_list(doc: &mut String, model: &TreeModel, cap: usize) -> Result<()> {
    writeln!(doc, "## Contents")?;
    writeln!(doc)?;
    for level in model.levels.iter().take(cap + 1) {
        for record in level.values() {
            let title = section_title(record);
            writeln!(doc, "- [{}](#{})", title, slugify(&title))?;
        }
    }
    writeln!(doc)?;
    Ok(())
}

/// Writes one per-directory section with its counts and tables.
fn write_section(doc: &mut String, record: &DirRecord) -> Result<()> {
    writeln!(doc, "## {}", section_title(record))?;
    writeln!(doc)?;
    writeln!(
        doc,
        "This folder contains {} files and {} sub-folders.",
        record.file_count, record.subfolder_count
    )?;
    writeln!(doc)?;
    writeln!(doc, "Total size in bytes: {}", record.total_size())?;
    writeln!(doc)?;
    writeln!(
        doc,
        "Total size: {}",
        human_readable_size(record.total_size())
    )?;
    writeln!(doc)?;

    if record.file_count > 0 {
        writeln!(doc, "### Files")?;
        writeln!(doc)?;
        writeln!(doc, "| Name | Size | Last modified |")?;
        writeln!(doc, "| --- | --- | --- |")?;
        for name in &record.file_names {
            let size = record
                .file_sizes
                .get(name)
                .copied()
                .unwrap_or(SizeValue::Missing);
            let mod_time = record
                .file_mod_times
                .get(name)
                .copied()
                .unwrap_or(ModTimeValue::Missing);
            writeln!(
                doc,
                "| {} | {} | {} |",
                name,
                format_size_value(&size),
                format_mod_time_value(&mod_time)
            )?;
        }
        writeln!(doc)?;
    }

    if record.subfolder_count > 0 {
        writeln!(doc, "### Folders")?;
        writeln!(doc)?;
        writeln!(doc, "| Name | Total Size |")?;
        writeln!(doc, "| --- | --- |")?;
        for name in &record.folder_names {
            let size = record
                .folder_sizes
                .get(name)
                .copied()
                .unwrap_or(SizeValue::Missing);
            writeln!(doc, "| {} | {} |", name, format_size_value(&size))?;
        }
        writeln!(doc)?;
    }

    Ok(())
}

/// Section heading for a directory record.
fn section_title(record: &DirRecord) -> String {
    if record.depth == 0 {
        format!("Content of the base folder {}", record.path.display())
    } else {
        format!("Content of sub-folder {}", record.path.display())
    }
}

/// GitHub-style anchor slug for a heading: lowercased, spaces become
/// hyphens, everything except alphanumerics and hyphens is dropped.
fn slugify(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}
