//! Command dispatch logic for gpu-reach

use super::{AnalyzeArgs, InitArgs, ValidateArgs, analyze_gpus, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gpu-reach", version, author, long_about = None)]
#[command(about = "Estimate what share of the GPU market meets each target configuration")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the survey, architecture, and benchmark data and report market coverage per target
    Analyze(Box<AnalyzeArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file and target list
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        Command::Analyze(analyze_args) => analyze_gpus(host, analyze_args).await,
        Command::Init(init_args) => init_config(host, init_args),
        Command::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_requires_targets() {
        assert!(Cli::try_parse_from(["gpu-reach", "analyze"]).is_err());
    }

    #[test]
    fn analyze_parses_report_options() {
        let cli = Cli::try_parse_from([
            "gpu-reach",
            "analyze",
            "--targets",
            "targets.json",
            "--csv",
            "out",
            "--console",
            "--color",
            "never",
            "--ignore-cached",
        ])
        .unwrap();

        let Command::Analyze(args) = cli.command else {
            panic!("expected the analyze command");
        };
        assert_eq!(args.targets.as_str(), "targets.json");
        assert_eq!(args.csv.as_deref().map(camino::Utf8Path::as_str), Some("out"));
        assert!(args.console);
        assert!(args.ignore_cached);
        assert!(args.json.is_none());
    }
}
