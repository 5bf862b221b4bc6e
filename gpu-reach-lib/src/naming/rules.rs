//! Naming-convention rule tables for each source.
//!
//! Each table is evaluated in order. New naming exceptions are added here as data; the
//! evaluation logic in [`super::NameMapper`] doesn't change.

/// A single translation rule between canonical card ids and a source's product names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// Pins one canonical id to one exact source name, taking precedence over every other rule.
    Alias { canonical: &'static str, source: &'static str },

    /// Swaps a leading `canonical` prefix for a leading `source` prefix, and back.
    Prefix { canonical: &'static str, source: &'static str },

    /// Drops a leading prefix from canonical ids. Source names carry no trace of the prefix,
    /// so the reverse direction leaves such names unchanged.
    Strip { canonical: &'static str },

    /// Source names starting with this prefix are already canonical ids. Stops later
    /// prefix rules from rewriting them in the reverse direction; ignored going forward.
    Verbatim { source: &'static str },

    /// Rewrites a token anywhere in a non-aliased name going forward. The reverse direction
    /// restores it only after a [`NameRule::Prefix`] match.
    Token { canonical: &'static str, source: &'static str },
}

/// Rules for the architecture database, which names cards without vendor branding and lists
/// several editions of some early RTX cards.
pub const ARCHITECTURE_RULES: &[NameRule] = &[
    // The database has no Reference listing for the 2060; the Founders Edition is closest.
    NameRule::Alias {
        canonical: "NVIDIA GeForce RTX 2060",
        source: "RTX 2060 (Founders Edition)",
    },
    NameRule::Alias {
        canonical: "NVIDIA GeForce RTX 2070",
        source: "RTX 2070 (Reference)",
    },
    NameRule::Alias {
        canonical: "NVIDIA GeForce RTX 2080",
        source: "RTX 2080 (Reference)",
    },
    NameRule::Alias {
        canonical: "NVIDIA GeForce RTX 2080 Ti",
        source: "RTX 2080 Ti (Reference)",
    },
    NameRule::Prefix {
        canonical: "AMD Radeon RX ",
        source: "RX ",
    },
    NameRule::Prefix {
        canonical: "NVIDIA GeForce GTX ",
        source: "GTX ",
    },
    NameRule::Prefix {
        canonical: "NVIDIA GeForce RTX ",
        source: "RTX ",
    },
    NameRule::Strip { canonical: "AMD Radeon " },
    NameRule::Strip { canonical: "NVIDIA GeForce " },
    NameRule::Token {
        canonical: "SUPER",
        source: "Super",
    },
];

/// Rules for the benchmark table, which shortens vendor prefixes.
pub const BENCHMARK_RULES: &[NameRule] = &[
    NameRule::Verbatim { source: "Intel HD Graphics " },
    NameRule::Prefix {
        canonical: "NVIDIA GeForce ",
        source: "GeForce ",
    },
    NameRule::Prefix {
        canonical: "AMD Radeon ",
        source: "Radeon ",
    },
    NameRule::Prefix {
        canonical: "Intel HD Graphics ",
        source: "Intel HD ",
    },
];
