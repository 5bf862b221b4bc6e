//! Report generation for analysis results
//!
//! The analysis produces two tables: one row per target configuration with its market
//! coverage, and one row per unified card with its eligibility for each configuration.
//! [`Report::build`] assembles both as plain data; the generators render them.
//!
//! # Implementation Model
//!
//! Three generators are provided:
//! - **CSV**: One document per table, with RFC-style escaping
//! - **Console**: Box-drawn tables with optional ANSI colors, eliding long descriptions to
//!   fit the terminal
//! - **JSON**: Both tables in one machine-readable document
//!
//! Cell formatting (percentages with two decimals, empty cells for absent values, Yes/No
//! membership) lives in the `common` module so the CSV and console output agree.

mod common;
mod console;
mod csv;
mod json;
mod rows;

pub use console::generate as generate_console;
pub use csv::{CARDS_FILE, CONFIGURATIONS_FILE, generate_cards as generate_cards_csv, generate_configurations as generate_configurations_csv};
pub use json::generate as generate_json;
pub use rows::{CardRow, ConfigurationRow, Report};
