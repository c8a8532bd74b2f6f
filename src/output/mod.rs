//! Modular output system for the `storep` application.
//!
//! This module provides the renderers that consume the finished tree
//! model. Every renderer receives the model read-only; the core never
//! depends on any of them.
//!
//! # Available Renderers
//!
//! - **Markdown**: The depth-organized human-readable report
//! - **JSON**: Lossless machine-readable snapshot of the whole model
//! - **CSV**: Flat per-directory export for data analysis

pub mod csv;
pub mod json;
pub mod markdown;

// Re-export the main render functions for convenience

/// CSV output renderer function.
///
/// See [`csv::render`] for full documentation.
pub use csv::render as render_csv;

/// JSON snapshot renderer function.
///
/// See [`json::render`] for full documentation.
pub use json::render as render_json;

/// Markdown report renderer function.
///
/// See [`markdown::render`] for full documentation.
pub use markdown::render as render_markdown;
