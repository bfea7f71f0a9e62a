//! Output formatting for engine results.
//!
//! This module handles rendering results for callers:
//! - [`format`] - JSON and YAML serialization
//! - [`csv`] - CSV export of subnet records
//! - [`terminal`] - Terminal output with colors

mod csv;
mod format;
mod terminal;

pub use csv::{escape_csv_field, subnets_to_csv, CSV_HEADER};
pub use format::{render, OutputFormat};
pub use terminal::{format_field, render_tree};
