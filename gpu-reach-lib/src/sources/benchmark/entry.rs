use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Benchmark scores of one card, named as the benchmark site names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub display_name: String,

    /// Aggregate 3D score. Higher is faster; this is the eligibility metric.
    pub g3d_score: u64,

    /// Aggregate 2D score. Carried for reports only.
    pub g2d_score: u64,
}

impl Display for BenchmarkEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: G3D mark {}, G2D mark {}", self.display_name, self.g3d_score, self.g2d_score)
    }
}
