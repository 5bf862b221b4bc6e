use crate::Result;
use crate::sources::architecture::ARCHITECTURE_DB_URL;
use crate::sources::benchmark::BENCHMARK_URL;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "gpu-reach.toml";

const SURVEY_URL: &str = "https://raw.githubusercontent.com/jdegene/steamHWsurvey/refs/heads/master/shs.csv";
const SURVEY_DATE: &str = "2025-08-01";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where to download the hardware survey CSV from
    #[serde(default = "default_survey_url")]
    pub survey_url: String,

    /// The survey month to analyze, as `YYYY-MM-DD`
    #[serde(default = "default_survey_date")]
    pub survey_date: String,

    /// Survey entries removed, with renormalization, before analysis
    #[serde(default = "default_excluded_categories")]
    pub excluded_categories: Vec<String>,

    /// GraphQL endpoint of the architecture database
    #[serde(default = "default_architecture_url")]
    pub architecture_url: String,

    /// Benchmark mega page to scrape
    #[serde(default = "default_benchmark_url")]
    pub benchmark_url: String,

    /// Duration to keep the benchmark snapshot before re-downloading
    #[serde(default = "default_benchmark_cache_ttl", with = "humantime_serde")]
    pub benchmark_cache_ttl: Duration,
}

fn default_survey_url() -> String {
    SURVEY_URL.to_string()
}

fn default_survey_date() -> String {
    SURVEY_DATE.to_string()
}

fn default_excluded_categories() -> Vec<String> {
    vec!["Other".to_string()]
}

fn default_architecture_url() -> String {
    ARCHITECTURE_DB_URL.to_string()
}

fn default_benchmark_url() -> String {
    BENCHMARK_URL.to_string()
}

const fn default_benchmark_cache_ttl() -> Duration {
    Duration::from_hours(30 * 24)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// With no explicit path, `gpu-reach.toml` in `base_dir` is used if present.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading gpu-reach configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path: Utf8PathBuf = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading gpu-reach configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Check values that deserialize fine but can't be used.
    pub fn validate(&self) -> Result<()> {
        if NaiveDate::parse_from_str(&self.survey_date, "%Y-%m-%d").is_err() {
            bail!("survey_date must be a date in YYYY-MM-DD form, got '{}'", self.survey_date);
        }

        for (field, value) in [
            ("survey_url", &self.survey_url),
            ("architecture_url", &self.architecture_url),
            ("benchmark_url", &self.benchmark_url),
        ] {
            if value.trim().is_empty() {
                bail!("{field} must not be empty");
            }
        }

        let mut seen = BTreeSet::new();
        for category in &self.excluded_categories {
            if !seen.insert(category.as_str()) {
                bail!("excluded category '{category}' is listed more than once");
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
