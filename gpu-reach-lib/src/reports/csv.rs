use super::Report;
use super::common::Grid;
use crate::Result;
use core::fmt::Write;
use std::borrow::Cow;

pub const CONFIGURATIONS_FILE: &str = "target_configurations.csv";
pub const CARDS_FILE: &str = "all_cards.csv";

/// Write the target configuration table as CSV.
pub fn generate_configurations<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    write_grid(&Grid::configurations(report), writer)
}

/// Write the all-cards table as CSV.
pub fn generate_cards<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    write_grid(&Grid::cards(report), writer)
}

fn write_grid<W: Write>(grid: &Grid, writer: &mut W) -> Result<()> {
    write_line(&grid.headers, writer)?;
    for row in &grid.rows {
        write_line(row, writer)?;
    }
    Ok(())
}

fn write_line<W: Write>(cells: &[String], writer: &mut W) -> Result<()> {
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "{}", escape_csv(cell))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
