use super::Report;
use crate::Result;
use core::fmt::Write;
use serde_json::json;

/// Write both tables as one JSON document.
///
/// Absent values are `null`; shares are fractions rather than formatted percentages.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let configurations: Vec<_> = report
        .configurations
        .iter()
        .map(|row| {
            json!({
                "configuration": row.configuration,
                "gpu_name": row.gpu_name,
                "description": row.description,
                "market_coverage": row.market_coverage,
                "g3d_score": row.g3d_score,
            })
        })
        .collect();

    let cards: Vec<_> = report
        .cards
        .iter()
        .map(|row| {
            let eligible_for: Vec<&str> = report
                .configuration_names
                .iter()
                .zip(&row.eligibility)
                .filter(|(_, eligible)| **eligible)
                .map(|(name, _)| name.as_str())
                .collect();

            json!({
                "card_id": row.card_id,
                "description": row.description,
                "popularity": row.popularity,
                "g3d_score": row.g3d_score,
                "eligible_for": eligible_for,
            })
        })
        .collect();

    let output = json!({
        "configurations": configurations,
        "cards": cards,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
