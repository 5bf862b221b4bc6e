//! Eligibility and market-share analysis
//!
//! For each [`TargetConfiguration`], the reference card's G3D score sets the bar. Every
//! benchmarked card at or above the bar is eligible (ties included, so the reference card is
//! always eligible for itself), and the configuration's market coverage is the summed
//! popularity share of its eligible cards.
//!
//! Configurations whose reference card can't be resolved to a score are skipped rather than
//! failing the run; [`resolve`] makes that branch explicit through [`Resolution`].

mod eligibility;
mod target;

pub use eligibility::{Analysis, EligibilityResult, Resolution, SkipReason, analyze, eligible_cards, evaluate, market_share, resolve};
pub use target::{TargetConfiguration, load_targets, parse_targets};
