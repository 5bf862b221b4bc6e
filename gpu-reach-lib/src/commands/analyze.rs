use super::Host;
use super::ProgressReporter;
use super::common::{ColorMode, LogLevel, cache_dir, init_logging};
use super::config::Config;
use crate::Result;
use crate::analysis::{Analysis, TargetConfiguration, analyze, load_targets};
use crate::cards::{Progress, unify};
use crate::reports::{
    CARDS_FILE, CONFIGURATIONS_FILE, Report, generate_cards_csv, generate_configurations_csv, generate_console, generate_json,
};
use crate::sources::architecture::{ArchitectureCache, ArchitectureDb, GraphQlFetcher};
use crate::sources::benchmark::BenchmarkLoader;
use crate::sources::{http, popularity};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Args;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::{Write, stderr, stdout};
use std::path::Path;

const LOG_TARGET: &str = "   analyze";

/// File in the cache directory holding architecture lookups
const ARCHITECTURE_CACHE_FILE: &str = "architecture.json";

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file mapping each target configuration name to its reference card
    #[arg(long, short = 't', value_name = "PATH")]
    pub targets: Utf8PathBuf,

    /// Path to configuration file (default is `gpu-reach.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where fetched source data is cached
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Write `target_configurations.csv` and `all_cards.csv` into this directory
    #[arg(long, value_name = "DIR", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Write both tables to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Print both tables to the console. This is the default when no other report is requested
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Ignore cached data and fetch everything fresh
    #[arg(long)]
    pub ignore_cached: bool,
}

/// Run the whole pipeline: fetch the sources, unify them, analyze each target, and write the reports.
pub async fn analyze_gpus<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_deref())?;
    let targets = load_targets(&args.targets)?;
    let cache_dir = cache_dir(args.cache_dir.as_deref())?;

    let progress = ProgressReporter::new(
        args.log_level == LogLevel::None,
        Duration::from_millis(300),
        args.color.use_colors(&stderr()),
    );
    let outcome = build_report(&config, &targets, &cache_dir, args.ignore_cached, &progress).await;
    progress.done();
    let (report, analysis) = outcome?;

    if analysis.skipped_count() > 0 {
        let _ = writeln!(host.error(), "Skipped {} target configuration(s)", analysis.skipped_count());
        for target in &targets {
            if let Some(reason) = analysis.skip_reason(&target.name) {
                let _ = writeln!(host.error(), "  '{}' ({}): {reason}", target.name, target.reference_card_id);
            }
        }
    }

    write_reports(host, args, &report)
}

async fn build_report(
    config: &Config,
    targets: &[TargetConfiguration],
    cache_dir: &Path,
    ignore_cached: bool,
    progress: &dyn Progress,
) -> Result<(Report, Analysis)> {
    let client = http::client()?;

    progress.set_phase("Surveying");
    progress.set_indeterminate(Box::new(|| "downloading the hardware survey".to_string()));
    let mut popularity = popularity::fetch(&client, &config.survey_url, &config.survey_date).await?;
    for category in &config.excluded_categories {
        let _ = popularity.remove_category(category)?;
    }

    progress.set_phase("Benchmarks");
    progress.set_indeterminate(Box::new(|| "loading benchmark scores".to_string()));
    let loader = BenchmarkLoader::new(
        client.clone(),
        Some(config.benchmark_url.as_str()),
        Some(cache_dir),
        config.benchmark_cache_ttl,
        ignore_cached,
    );
    let mut benchmarks = loader.load(Utc::now()).await?;

    let cache = ArchitectureCache::open(cache_dir.join(ARCHITECTURE_CACHE_FILE), ignore_cached);
    let mut architecture = ArchitectureDb::new(cache, GraphQlFetcher::new(client, Some(config.architecture_url.as_str())));

    let table = unify(&mut popularity, &mut architecture, &mut benchmarks, progress).await?;
    log::info!(
        target: LOG_TARGET,
        "Queried the architecture database {} time(s), {} cards and {} unknown names now cached",
        architecture.fetch_count(),
        architecture.cache().card_count(),
        architecture.cache().unknown_count()
    );

    let analysis = analyze(targets, &table);
    let report = Report::build(targets, &table, &analysis);
    Ok((report, analysis))
}

/// Render every requested report before touching the filesystem, so a run leaves either all
/// of its files behind or none of them.
fn write_reports<H: Host>(host: &mut H, args: &AnalyzeArgs, report: &Report) -> Result<()> {
    let mut files = Vec::new();

    if let Some(dir) = &args.csv {
        let mut configurations = String::new();
        generate_configurations_csv(report, &mut configurations)?;
        files.push((dir.join(CONFIGURATIONS_FILE), configurations));

        let mut cards = String::new();
        generate_cards_csv(report, &mut cards)?;
        files.push((dir.join(CARDS_FILE), cards));
    }

    if let Some(path) = &args.json {
        let mut json = String::new();
        generate_json(report, &mut json)?;
        files.push((path.clone(), json));
    }

    let generating_reports = args.csv.is_some() || args.json.is_some();
    let console_output = if args.console || !generating_reports {
        let mut console_output = String::new();
        generate_console(report, args.color.use_colors(&stdout()), &mut console_output)?;
        Some(console_output)
    } else {
        None
    };

    if let Some(dir) = &args.csv {
        fs::create_dir_all(dir).into_app_err_with(|| format!("creating report directory '{dir}'"))?;
    }
    write_files(&files)?;

    if let Some(console_output) = console_output {
        let _ = write!(host.output(), "{console_output}");
    }

    Ok(())
}

/// Write every file, removing the ones already written if any write fails.
fn write_files(files: &[(Utf8PathBuf, String)]) -> Result<()> {
    let mut written: Vec<&Utf8Path> = Vec::with_capacity(files.len());

    for (path, contents) in files {
        if let Err(e) = write_file(path, contents) {
            for partial in written {
                if let Err(remove_err) = fs::remove_file(partial) {
                    log::warn!(target: LOG_TARGET, "Could not remove partial report '{partial}': {remove_err}");
                }
            }
            return Err(e);
        }
        written.push(path.as_path());
    }

    Ok(())
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<()> {
    fs::write(path, contents).into_app_err_with(|| format!("writing report '{path}'"))?;
    log::info!(target: LOG_TARGET, "Wrote '{path}'");
    Ok(())
}
