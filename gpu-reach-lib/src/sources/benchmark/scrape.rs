use super::BenchmarkEntry;
use crate::Result;
use ohno::bail;
use regex::Regex;
use std::sync::LazyLock;

const LOG_TARGET: &str = "     bench";

static ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<tr\b[^>]*>(.*?)</tr>").expect("invalid regex"));
static CELL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<td\b[^>]*>(.*?)</td>").expect("invalid regex"));
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("invalid regex"));

const NAME_CELL: usize = 1;
const G3D_CELL: usize = 2;
const G2D_CELL: usize = 3;

/// Extract benchmark entries from the mega page's table.
///
/// Rows are `<tr>` elements whose `<td>` cells are `[_, name, g3d, g2d, ...]`. Rows without
/// enough cells (headers use `<th>`) are ignored, as are rows whose scores aren't numbers,
/// which the site uses for cards it hasn't scored.
///
/// # Errors
///
/// Fails if the page yields no entries at all, which means the page layout changed.
pub fn parse_page(html: &str) -> Result<Vec<BenchmarkEntry>> {
    let mut entries = Vec::new();

    for row in ROW_REGEX.captures_iter(html) {
        let cells: Vec<String> = CELL_REGEX.captures_iter(&row[1]).map(|cell| cell_text(&cell[1])).collect();
        if cells.len() <= G2D_CELL {
            continue;
        }

        let name = &cells[NAME_CELL];
        if name.is_empty() {
            continue;
        }

        let (Some(g3d_score), Some(g2d_score)) = (parse_score(&cells[G3D_CELL]), parse_score(&cells[G2D_CELL])) else {
            log::debug!(target: LOG_TARGET, "Skipping '{name}': unparsable scores '{}' / '{}'", cells[G3D_CELL], cells[G2D_CELL]);
            continue;
        };

        entries.push(BenchmarkEntry {
            display_name: name.clone(),
            g3d_score,
            g2d_score,
        });
    }

    if entries.is_empty() {
        bail!("no benchmark rows found in page");
    }

    Ok(entries)
}

fn cell_text(raw: &str) -> String {
    let text = TAG_REGEX.replace_all(raw, "");
    decode_entities(text.trim())
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Parse a score with `,` thousands separators.
fn parse_score(text: &str) -> Option<u64> {
    text.replace(',', "").trim().parse().ok()
}
