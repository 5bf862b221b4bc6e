use super::Report;
use super::common::{CARD_DESCRIPTION_COLUMN, CONFIGURATION_DESCRIPTION_COLUMN, Grid};
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

/// Narrowest a description column is squeezed to before giving up on fitting the terminal.
const MIN_ELIDED_WIDTH: usize = 12;

pub fn generate<W: Write>(report: &Report, use_colors: bool, writer: &mut W) -> Result<()> {
    generate_with_width(report, use_colors, get_terminal_width(), writer)
}

fn generate_with_width<W: Write>(report: &Report, use_colors: bool, max_width: Option<usize>, writer: &mut W) -> Result<()> {
    write_title("Target configurations", use_colors, writer)?;
    write_table(&Grid::configurations(report), CONFIGURATION_DESCRIPTION_COLUMN, use_colors, max_width, writer)?;
    writeln!(writer)?;
    write_title("All cards", use_colors, writer)?;
    write_table(&Grid::cards(report), CARD_DESCRIPTION_COLUMN, use_colors, max_width, writer)
}

/// Get the terminal width, or `None` when output isn't going to a terminal
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| usize::from(w))
}

fn write_title<W: Write>(title: &str, use_colors: bool, writer: &mut W) -> Result<()> {
    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }
    Ok(())
}

fn write_table<W: Write>(grid: &Grid, elide_column: usize, use_colors: bool, max_width: Option<usize>, writer: &mut W) -> Result<()> {
    let mut widths: Vec<usize> = grid.headers.iter().map(|h| text_width(h)).collect();
    for row in &grid.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(text_width(cell));
        }
    }

    // Each column takes its width plus "│ " and " ", and the line ends with one more "│".
    if let Some(max_width) = max_width
        && let Some(column_width) = widths.get(elide_column).copied()
    {
        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        if total > max_width {
            let excess = total - max_width;
            widths[elide_column] = column_width.saturating_sub(excess).max(MIN_ELIDED_WIDTH.min(column_width));
        }
    }

    write_border(&widths, '┌', '┬', '┐', writer)?;
    write_row(&grid.headers, &widths, writer, |text| {
        if use_colors { text.bold().to_string() } else { text.to_string() }
    })?;
    write_border(&widths, '├', '┼', '┤', writer)?;
    for row in &grid.rows {
        write_row(row, &widths, writer, |text| colorize_cell(text, use_colors))?;
    }
    write_border(&widths, '└', '┴', '┘', writer)
}

fn write_border<W: Write>(widths: &[usize], left: char, middle: char, right: char, writer: &mut W) -> Result<()> {
    write!(writer, "{left}")?;
    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            write!(writer, "{middle}")?;
        }
        write!(writer, "{}", "─".repeat(width + 2))?;
    }
    writeln!(writer, "{right}")?;
    Ok(())
}

fn write_row<W: Write>(cells: &[String], widths: &[usize], writer: &mut W, style: impl Fn(&str) -> String) -> Result<()> {
    for (cell, &width) in cells.iter().zip(widths) {
        let text = elide(cell, width);
        let padding = width - text_width(&text);
        write!(writer, "│ {}{} ", style(&text), " ".repeat(padding))?;
    }
    writeln!(writer, "│")?;
    Ok(())
}

fn colorize_cell(text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }

    match text {
        "Yes" => text.green().to_string(),
        "No" => text.dimmed().to_string(),
        _ => text.to_string(),
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Shorten text to `width` characters, marking the cut with an ellipsis.
fn elide(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }

    if width == 0 {
        return String::new();
    }

    let mut shortened: String = text.chars().take(width - 1).collect();
    shortened.push('…');
    shortened
}
