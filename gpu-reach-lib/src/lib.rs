#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for gpu-reach
//!
//! This library cross-references three independently sourced GPU datasets (a hardware
//! survey's market share, an architecture database, and a synthetic benchmark) to work out
//! what fraction of the installed market meets each target configuration's performance bar.
//!
//! # Module Organization
//!
//! - [`naming`]: Rule tables translating each source's product names to canonical card ids
//! - [`sources`]: Adapters for the popularity, architecture, and benchmark sources
//! - [`cards`]: Canonical card ids and the unified card table
//! - [`analysis`]: Target configurations, eligibility, and market-share aggregation
//! - [`reports`]: Report rows and their CSV, console, and JSON renderings
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod analysis;
pub mod cards;
mod commands;
pub mod naming;
pub mod reports;
pub mod sources;

pub use crate::commands::{Host, run};
