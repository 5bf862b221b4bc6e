//! Cell formatting shared by the tabular report generators.

use super::{CardRow, ConfigurationRow, Report};

pub const CONFIGURATION_HEADERS: [&str; 5] = [
    "Configuration",
    "GPU Name",
    "GPU description",
    "Market coverage",
    "G3D mark (performance metric)",
];

pub const CARD_HEADERS: [&str; 4] = ["Configuration", "GPU Description", "Popularity", "G3D mark (performance metric)"];

/// Column holding the long architecture summary in each table.
pub const CONFIGURATION_DESCRIPTION_COLUMN: usize = 2;
pub const CARD_DESCRIPTION_COLUMN: usize = 1;

/// A fully formatted table: headers plus rows of cell text. Absent values are empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn configurations(report: &Report) -> Self {
        Self {
            headers: CONFIGURATION_HEADERS.iter().map(ToString::to_string).collect(),
            rows: report.configurations.iter().map(configuration_cells).collect(),
        }
    }

    pub fn cards(report: &Report) -> Self {
        Self {
            headers: CARD_HEADERS
                .iter()
                .map(ToString::to_string)
                .chain(report.configuration_names.iter().cloned())
                .collect(),
            rows: report.cards.iter().map(card_cells).collect(),
        }
    }
}

fn configuration_cells(row: &ConfigurationRow) -> Vec<String> {
    vec![
        row.configuration.clone(),
        row.gpu_name.clone(),
        row.description.clone().unwrap_or_default(),
        row.market_coverage.map(format_percentage).unwrap_or_default(),
        row.g3d_score.map(|s| s.to_string()).unwrap_or_default(),
    ]
}

fn card_cells(row: &CardRow) -> Vec<String> {
    let mut cells = vec![
        row.card_id.clone(),
        row.description.clone().unwrap_or_default(),
        row.popularity.map(format_percentage).unwrap_or_default(),
        row.g3d_score.map(|s| s.to_string()).unwrap_or_default(),
    ];
    cells.extend(row.eligibility.iter().map(|&eligible| format_eligibility(eligible).to_string()));
    cells
}

/// Format a fraction as a percentage with two decimals, e.g. `0.0345` as `3.45%`.
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

pub const fn format_eligibility(eligible: bool) -> &'static str {
    if eligible { "Yes" } else { "No" }
}
