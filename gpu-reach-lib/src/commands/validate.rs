use super::Host;
use super::config::Config;
use crate::Result;
use crate::analysis::load_targets;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `gpu-reach.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Target configuration list to check as well
    #[arg(long, short = 't', value_name = "PATH")]
    pub targets: Option<Utf8PathBuf>,
}

/// Load the configuration file and, if given, the target list.
///
/// Returns how many target configurations were read.
fn validate_inner(base_dir: &Utf8Path, args: &ValidateArgs) -> Result<Option<usize>> {
    let _ = Config::load(base_dir, args.config.as_deref())?;

    match &args.targets {
        Some(path) => Ok(Some(load_targets(path)?.len())),
        None => Ok(None),
    }
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    validate_in(host, Utf8Path::new("."), args)
}

fn validate_in<H: Host>(host: &mut H, base_dir: &Utf8Path, args: &ValidateArgs) -> Result<()> {
    match validate_inner(base_dir, args) {
        Ok(target_count) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = &args.config {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration unless gpu-reach.toml is present");
            }
            if let (Some(path), Some(count)) = (&args.targets, target_count) {
                let _ = writeln!(host.output(), "Target list '{path}' defines {count} configuration(s)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
