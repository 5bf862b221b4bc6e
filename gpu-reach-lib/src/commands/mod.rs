//! Command-line interface and orchestration for gpu-reach
//!
//! This module implements the CLI commands and drives the other modules to go from
//! remote data sources to finished reports. It handles argument parsing, configuration
//! management, and the high-level workflow.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **analyze**: Fetch the three sources, unify them into one card table, evaluate every
//!   target configuration, and write the reports
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file and, optionally, a target list
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. `analyze` then:
//!
//! 1. Loads the configuration and the target list
//! 2. Downloads the survey and removes the excluded categories
//! 3. Loads the benchmark snapshot, downloading it when the cached copy is stale
//! 4. Unifies the sources, querying the architecture database for cards not yet cached
//! 5. Analyzes each target and renders the CSV, JSON, and console reports
//!
//! Output goes through the [`Host`] trait so tests can capture it.

mod analyze;
mod common;
mod config;
mod host;
mod init;
mod progress_reporter;
mod run;
mod validate;

pub use analyze::{AnalyzeArgs, analyze_gpus};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
