use super::ArchitectureEntry;
use crate::Result;
use crate::sources::http;
use ohno::{IntoAppError, app_err};
use serde::Deserialize;

const LOG_TARGET: &str = "      arch";

pub const ARCHITECTURE_DB_URL: &str = "https://db.thegpu.guru/graphql";

/// The server caps search results at this many hits.
const MAX_SEARCH_RESULTS: usize = 10;

/// Fetches a single card from an architecture database.
pub trait ArchitectureFetch {
    /// Look up `name` exactly as the database spells it.
    ///
    /// Returns `Ok(None)` when the database answered but has no card with that exact name.
    fn fetch(&self, name: &str) -> impl Future<Output = Result<Option<ArchitectureEntry>>>;
}

/// Queries the architecture database's GraphQL endpoint.
///
/// The search is a substring search, so the query asks for the maximum number of hits and
/// the exact name is picked out of them.
#[derive(Debug, Clone)]
pub struct GraphQlFetcher {
    client: reqwest::Client,
    url: String,
}

impl GraphQlFetcher {
    #[must_use]
    pub fn new(client: reqwest::Client, url: Option<&str>) -> Self {
        Self {
            client,
            url: url.unwrap_or(ARCHITECTURE_DB_URL).to_string(),
        }
    }
}

impl ArchitectureFetch for GraphQlFetcher {
    async fn fetch(&self, name: &str) -> Result<Option<ArchitectureEntry>> {
        log::debug!(target: LOG_TARGET, "Querying architecture database for '{name}'");

        let text = http::post_text(&self.client, &self.url, "application/graphql", search_query(name)).await?;
        let response: SearchResponse =
            serde_json::from_str(&text).into_app_err_with(|| format!("parsing architecture database response for '{name}'"))?;

        let Some(node) = response.data.search.edges.into_iter().map(|edge| edge.node).find(|node| node.name.as_deref() == Some(name)) else {
            return Ok(None);
        };

        node.into_entry().map(Some)
    }
}

fn search_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        r#"{{
  search(query:"{escaped}",type:CARD,first:{MAX_SEARCH_RESULTS}) {{
    edges {{
      node {{
        ... on Card {{
          name,
          computeUnitCount,
          aluCount,
          singlePrecisionPerformance,
          baseFrequency,
          turboFrequency,
          memoryBusWidth,
          memoryFrequency,
          memorySize,
          memoryType,
          releaseDate,
          vendor,
          asic {{ name }}
        }}
      }}
    }}
  }}
}}"#
    )
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: SearchData,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    search: Search,
}

#[derive(Debug, Deserialize)]
struct Search {
    #[serde(default)]
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: Node,
}

/// One search hit. Hits that are not cards come back as empty objects, so everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Node {
    name: Option<String>,
    compute_unit_count: Option<Numeric>,
    alu_count: Option<Numeric>,
    single_precision_performance: Option<Numeric>,
    base_frequency: Option<Numeric>,
    turbo_frequency: Option<Numeric>,
    memory_bus_width: Option<Numeric>,
    memory_frequency: Option<Numeric>,
    memory_size: Option<Numeric>,
    memory_type: Option<String>,
    release_date: Option<String>,
    vendor: Option<String>,
    asic: Option<Asic>,
}

#[derive(Debug, Deserialize)]
struct Asic {
    name: String,
}

/// The database serializes some numbers as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(serde_json::Number),
    Text(String),
}

impl Numeric {
    fn as_u64(&self, field: &str) -> Result<u64> {
        match self {
            Self::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(whole_number))
                .ok_or_else(|| app_err!("field '{field}' is not an unsigned integer: {n}")),
            Self::Text(s) => s
                .trim()
                .parse::<u64>()
                .into_app_err_with(|| format!("field '{field}' is not an unsigned integer: '{s}'")),
        }
    }

    fn as_f64(&self, field: &str) -> Result<f64> {
        match self {
            Self::Number(n) => n.as_f64().ok_or_else(|| app_err!("field '{field}' is not a number: {n}")),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .into_app_err_with(|| format!("field '{field}' is not a number: '{s}'")),
        }
    }
}

/// Accept floats like `28.0` for integer fields, as long as they are exact.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "value is checked to be a non-negative whole number within u64 range"
)]
fn whole_number(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64).then_some(value as u64)
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| app_err!("architecture database entry is missing field '{field}'"))
}

impl Node {
    fn into_entry(self) -> Result<ArchitectureEntry> {
        let display_name = required(self.name, "name")?;

        let entry = ArchitectureEntry {
            compute_unit_count: required(self.compute_unit_count, "computeUnitCount")?.as_u64("computeUnitCount")?,
            alu_count: required(self.alu_count, "aluCount")?.as_u64("aluCount")?,
            single_precision_tflops: required(self.single_precision_performance, "singlePrecisionPerformance")?
                .as_f64("singlePrecisionPerformance")?,
            base_freq_hz: required(self.base_frequency, "baseFrequency")?.as_u64("baseFrequency")?,
            turbo_freq_hz: self.turbo_frequency.map(|t| t.as_u64("turboFrequency")).transpose()?,
            memory_bus_bits: required(self.memory_bus_width, "memoryBusWidth")?.as_u64("memoryBusWidth")?,
            memory_freq_hz: required(self.memory_frequency, "memoryFrequency")?.as_f64("memoryFrequency")?,
            memory_bytes: required(self.memory_size, "memorySize")?.as_u64("memorySize")?,
            memory_type: required(self.memory_type, "memoryType")?,
            release_date: required(self.release_date, "releaseDate")?,
            vendor: required(self.vendor, "vendor")?,
            asic_name: required(self.asic, "asic")?.name,
            display_name,
        };

        Ok(entry)
    }
}
