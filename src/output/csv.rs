//! CSV output formatter for directory records.
//!
//! This module provides functionality to export the resolved tree
//! model as one flat CSV row per directory, for further processing or
//! analysis outside the markdown report.

use crate::cli::{Args, CsvRow};
use crate::data::TreeModel;
use crate::utils::human_readable_size;
use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::io;

/// Renders all directory records to CSV format.
///
/// Rows are emitted shallowest depth level first, in path order within
/// each level. Writes to the `--csv` file when given, stdout otherwise.
///
/// # Arguments
/// * `model` - The fully-resolved tree model
/// * `args` - Command line arguments that control output formatting
///
/// # Returns
/// * `Result<()>` - Ok if rendering succeeded, Err if there was an issue
pub fn render(model: &TreeModel, args: &Args) -> Result<()> {
    let writer: Box<dyn io::Write> = if let Some(output_file) = &args.csv {
        Box::new(File::create(output_file)?)
    } else {
        Box::new(io::stdout())
    };

    let mut csv_writer = Writer::from_writer(writer);

    for record in model.records() {
        let row = CsvRow {
            depth: record.depth,
            path: record.path.display().to_string(),
            files: record.file_count,
            subfolders: record.subfolder_count,
            own_size_bytes: record.own_size,
            total_size_bytes: record.total_size(),
            total_size_human: human_readable_size(record.total_size()),
        };
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;

    if let Some(output_file) = &args.csv {
        eprintln!("CSV output written to: {}", output_file);
    }

    Ok(())
}
