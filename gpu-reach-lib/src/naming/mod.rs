//! Translation between each source's product names and canonical card ids
//!
//! The three sources have no shared key. The hardware survey's names serve as canonical
//! ids; the architecture database and the benchmark table each have their own convention,
//! described by an ordered [`NameRule`] table.
//!
//! # Evaluation Model
//!
//! Going from a canonical id to a source name ([`NameMapper::to_source`]):
//! 1. An [`NameRule::Alias`] matching the id wins outright.
//! 2. Otherwise the first [`NameRule::Prefix`] or [`NameRule::Strip`] whose canonical prefix
//!    matches rewrites the prefix.
//! 3. Every [`NameRule::Token`] rewrite is applied, whether or not a prefix rule matched.
//!
//! Going from a source name to a canonical id ([`NameMapper::to_canonical`]) mirrors this:
//! aliases first, then the first [`NameRule::Prefix`] or [`NameRule::Verbatim`] whose source
//! prefix matches. Token rewrites are undone only after a [`NameRule::Prefix`] match, so
//! unprefixed names keep their tokens on the way back.
//!
//! Names no rule covers pass through unchanged. Such names will usually fail to join
//! across sources, which is expected rather than an error.

mod rules;

pub use rules::{ARCHITECTURE_RULES, BENCHMARK_RULES, NameRule};

use crate::cards::CardId;

/// Maps names between canonical id space and a single source's naming convention.
#[derive(Debug, Clone, Copy)]
pub struct NameMapper {
    rules: &'static [NameRule],
}

/// Mapper for the architecture database.
pub const ARCHITECTURE: NameMapper = NameMapper::new(ARCHITECTURE_RULES);

/// Mapper for the benchmark table.
pub const BENCHMARK: NameMapper = NameMapper::new(BENCHMARK_RULES);

impl NameMapper {
    #[must_use]
    pub const fn new(rules: &'static [NameRule]) -> Self {
        Self { rules }
    }

    /// Translate a canonical id into the name the source uses for it.
    #[must_use]
    pub fn to_source(&self, card_id: &CardId) -> String {
        let id = card_id.as_str();

        for rule in self.rules {
            if let NameRule::Alias { canonical, source } = *rule
                && canonical == id
            {
                return source.to_string();
            }
        }

        let mut name = self
            .rules
            .iter()
            .find_map(|rule| match *rule {
                NameRule::Prefix { canonical, source } => id.strip_prefix(canonical).map(|rest| format!("{source}{rest}")),
                NameRule::Strip { canonical } => id.strip_prefix(canonical).map(str::to_string),
                _ => None,
            })
            .unwrap_or_else(|| id.to_string());

        for rule in self.rules {
            if let NameRule::Token { canonical, source } = *rule {
                name = name.replace(canonical, source);
            }
        }
        name
    }

    /// Translate a source's name into canonical id space.
    #[must_use]
    pub fn to_canonical(&self, name: &str) -> CardId {
        for rule in self.rules {
            if let NameRule::Alias { canonical, source } = *rule
                && source == name
            {
                return CardId::new(canonical);
            }
        }

        for rule in self.rules {
            match *rule {
                NameRule::Verbatim { source } if name.starts_with(source) => return CardId::new(name),
                NameRule::Prefix { canonical, source } => {
                    if let Some(rest) = name.strip_prefix(source) {
                        return CardId::new(self.untokenize(format!("{canonical}{rest}")));
                    }
                }
                _ => {}
            }
        }

        CardId::new(name)
    }

    fn untokenize(&self, mut name: String) -> String {
        for rule in self.rules {
            if let NameRule::Token { canonical, source } = *rule {
                name = name.replace(source, canonical);
            }
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CardId {
        CardId::new(s)
    }

    fn assert_round_trip(mapper: &NameMapper, canonical: &str, expected_source: &str) {
        let source = mapper.to_source(&id(canonical));
        assert_eq!(source, expected_source, "forward mapping of '{canonical}'");
        assert_eq!(mapper.to_canonical(&source), id(canonical), "reverse mapping of '{source}'");
    }

    #[test]
    fn architecture_edition_overrides_round_trip() {
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce RTX 2060", "RTX 2060 (Founders Edition)");
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce RTX 2070", "RTX 2070 (Reference)");
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce RTX 2080", "RTX 2080 (Reference)");
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce RTX 2080 Ti", "RTX 2080 Ti (Reference)");
    }

    #[test]
    fn architecture_vendor_prefix_round_trip() {
        assert_round_trip(&ARCHITECTURE, "AMD Radeon RX 580", "RX 580");
        assert_round_trip(&ARCHITECTURE, "AMD Radeon RX 6600 XT", "RX 6600 XT");
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce GTX 1060", "GTX 1060");
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce RTX 3060 Ti", "RTX 3060 Ti");
    }

    #[test]
    fn architecture_super_casing_round_trip() {
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce RTX 2070 SUPER", "RTX 2070 Super");
        assert_round_trip(&ARCHITECTURE, "NVIDIA GeForce GTX 1660 SUPER", "GTX 1660 Super");
    }

    #[test]
    fn architecture_override_does_not_capture_variants() {
        assert_eq!(ARCHITECTURE.to_source(&id("NVIDIA GeForce RTX 2060 SUPER")), "RTX 2060 Super");
        assert_eq!(ARCHITECTURE.to_source(&id("NVIDIA GeForce RTX 2080 SUPER")), "RTX 2080 Super");
    }

    #[test]
    fn architecture_strip_is_forward_only() {
        assert_eq!(ARCHITECTURE.to_source(&id("AMD Radeon Vega 8")), "Vega 8");
        assert_eq!(ARCHITECTURE.to_source(&id("NVIDIA GeForce MX250")), "MX250");
        assert_eq!(ARCHITECTURE.to_canonical("Vega 8"), id("Vega 8"));
    }

    #[test]
    fn architecture_unmapped_names_pass_through() {
        assert_eq!(ARCHITECTURE.to_source(&id("Intel Iris Xe Graphics")), "Intel Iris Xe Graphics");
        assert_eq!(ARCHITECTURE.to_canonical("Arc A770"), id("Arc A770"));
    }

    #[test]
    fn architecture_super_token_applies_without_a_prefix_match() {
        assert_eq!(ARCHITECTURE.to_source(&id("Quadro RTX 4000 SUPER")), "Quadro RTX 4000 Super");
        assert_eq!(ARCHITECTURE.to_source(&id("SUPER Graphics")), "Super Graphics");
    }

    #[test]
    fn architecture_super_token_is_restored_only_after_a_prefix_match() {
        assert_eq!(ARCHITECTURE.to_canonical("RTX 4070 Super"), id("NVIDIA GeForce RTX 4070 SUPER"));
        assert_eq!(ARCHITECTURE.to_canonical("Quadro RTX 4000 Super"), id("Quadro RTX 4000 Super"));
    }

    #[test]
    fn benchmark_vendor_prefix_round_trip() {
        assert_round_trip(&BENCHMARK, "NVIDIA GeForce RTX 3060", "GeForce RTX 3060");
        assert_round_trip(&BENCHMARK, "NVIDIA GeForce GTX 1650 SUPER", "GeForce GTX 1650 SUPER");
        assert_round_trip(&BENCHMARK, "AMD Radeon RX 580", "Radeon RX 580");
        assert_round_trip(&BENCHMARK, "Intel HD Graphics 620", "Intel HD 620");
    }

    #[test]
    fn benchmark_full_intel_names_are_already_canonical() {
        assert_eq!(BENCHMARK.to_canonical("Intel HD Graphics 4000"), id("Intel HD Graphics 4000"));
    }

    #[test]
    fn benchmark_unmapped_names_pass_through() {
        assert_eq!(BENCHMARK.to_source(&id("Intel UHD Graphics 630")), "Intel UHD Graphics 630");
        assert_eq!(BENCHMARK.to_canonical("Quadro P1000"), id("Quadro P1000"));
    }
}
