use crate::analysis::{Analysis, TargetConfiguration};
use crate::cards::CardTable;
use core::cmp::Reverse;

/// One line of the target configuration table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationRow {
    pub configuration: String,
    pub gpu_name: String,
    pub description: Option<String>,

    /// Fraction of the market meeting the bar. `None` if the configuration was skipped.
    pub market_coverage: Option<f64>,
    pub g3d_score: Option<u64>,
}

/// One line of the all-cards table.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRow {
    pub card_id: String,
    pub description: Option<String>,
    pub popularity: Option<f64>,
    pub g3d_score: Option<u64>,

    /// Eligible-set membership, one entry per configuration in [`Report::configuration_names`] order.
    pub eligibility: Vec<bool>,
}

/// Both output tables, ready to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub configuration_names: Vec<String>,
    pub configurations: Vec<ConfigurationRow>,
    pub cards: Vec<CardRow>,
}

impl Report {
    /// Build the report tables.
    ///
    /// Configurations appear in name order. Cards are sorted by G3D score, highest first, with
    /// unbenchmarked cards treated as scoring 0 and ties broken by card id.
    #[must_use]
    pub fn build(configs: &[TargetConfiguration], table: &CardTable, analysis: &Analysis) -> Self {
        let mut configs: Vec<&TargetConfiguration> = configs.iter().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));

        let configurations = configs
            .iter()
            .map(|config| {
                let card = table.get(config.reference_card_id.as_str());
                ConfigurationRow {
                    configuration: config.name.clone(),
                    gpu_name: config.reference_card_id.to_string(),
                    description: card.and_then(|c| c.description()),
                    market_coverage: card.and(analysis.get(&config.name)).map(|result| result.aggregated_market_share),
                    g3d_score: card.and_then(|c| c.g3d_score()),
                }
            })
            .collect();

        let mut cards: Vec<CardRow> = table
            .iter()
            .map(|card| CardRow {
                card_id: card.id().to_string(),
                description: card.description(),
                popularity: card.popularity().map(|p| p.share),
                g3d_score: card.g3d_score(),
                eligibility: configs.iter().map(|config| analysis.is_eligible(&config.name, card.id())).collect(),
            })
            .collect();

        // The table iterates in id order and the sort is stable, so equal scores stay in id order.
        cards.sort_by_key(|row| Reverse(row.g3d_score.unwrap_or(0)));

        Self {
            configuration_names: configs.iter().map(|config| config.name.clone()).collect(),
            configurations,
            cards,
        }
    }
}
