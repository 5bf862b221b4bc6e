use super::PopularityTable;
use crate::Result;
use crate::sources::http;
use csv::ReaderBuilder;
use ohno::{EnrichableExt, IntoAppError, bail};
use std::io::Read;
use std::time::Instant;

const LOG_TARGET: &str = "popularity";

/// Category label of the survey's graphics card rows.
const VIDEO_CARD_CATEGORY: &str = "Video Card Description";

const DATE_COLUMN: usize = 0;
const CATEGORY_COLUMN: usize = 1;
const NAME_COLUMN: usize = 2;
const SHARE_COLUMN: usize = 4;

/// Download the survey CSV and build the popularity table for one survey month.
pub async fn fetch(client: &reqwest::Client, url: &str, survey_date: &str) -> Result<PopularityTable> {
    log::info!(target: LOG_TARGET, "Downloading hardware survey from '{url}'");
    let start = Instant::now();

    let text = http::get_text(client, url).await?;
    let table = parse(text.as_bytes(), survey_date).map_err(|e| e.enrich_with(|| format!("parsing hardware survey from {url}")))?;

    log::info!(
        target: LOG_TARGET,
        "Read {} graphics card entries for {survey_date} in {:.3}s",
        table.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(table)
}

/// Parse survey CSV rows of the form `date,category,name,change,share`.
///
/// Only graphics card rows for `survey_date` with a non-empty name are kept. Shares are
/// fractions of the surveyed population. A malformed or out-of-range share fails the whole parse.
pub fn parse(reader: impl Read, survey_date: &str) -> Result<PopularityTable> {
    let mut csv_reader = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(reader);
    let mut table = PopularityTable::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record.into_app_err_with(|| format!("reading survey row {}", index + 1))?;

        let field = |column: usize| record.get(column).unwrap_or_default();
        if field(DATE_COLUMN) != survey_date || field(CATEGORY_COLUMN) != VIDEO_CARD_CATEGORY || field(NAME_COLUMN).is_empty() {
            continue;
        }

        let name = field(NAME_COLUMN);
        let share = field(SHARE_COLUMN)
            .trim()
            .parse::<f64>()
            .into_app_err_with(|| format!("invalid share '{}' for '{name}' in survey row {}", field(SHARE_COLUMN), index + 1))?;
        if !(0.0..=1.0).contains(&share) {
            bail!("share {share} for '{name}' in survey row {} is outside 0..=1", index + 1);
        }

        table.insert(name, share);
    }

    Ok(table)
}
