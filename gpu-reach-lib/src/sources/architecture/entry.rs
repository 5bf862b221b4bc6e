use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Architectural specifications of one card, as listed by the architecture database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureEntry {
    pub display_name: String,
    pub compute_unit_count: u64,
    pub alu_count: u64,
    pub single_precision_tflops: f64,
    pub base_freq_hz: u64,
    pub turbo_freq_hz: Option<u64>,
    pub memory_bus_bits: u64,
    pub memory_freq_hz: f64,
    pub memory_bytes: u64,
    pub memory_type: String,
    pub release_date: String,
    pub vendor: String,
    pub asic_name: String,
}

impl ArchitectureEntry {
    /// Memory size in GiB, rounded to two decimals.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "memory sizes are far below 2^52 bytes")]
    pub fn memory_gib(&self) -> f64 {
        (self.memory_bytes as f64 / BYTES_PER_GIB * 100.0).round() / 100.0
    }

    /// One-line summary used in reports, e.g. `Compute: 12.74 SP TFLOPs, VRAM: 12.0 GB GDDR6`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Compute: {} SP TFLOPs, VRAM: {} GB {}",
            format_decimal(self.single_precision_tflops),
            format_decimal(self.memory_gib()),
            self.memory_type
        )
    }
}

impl Display for ArchitectureEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}, {} CUs, {} ALUs, {} SP TFLOPs, base {} Hz",
            self.display_name,
            self.compute_unit_count,
            self.alu_count,
            format_decimal(self.single_precision_tflops),
            self.base_freq_hz
        )?;
        if let Some(turbo) = self.turbo_freq_hz {
            write!(f, " / turbo {turbo} Hz")?;
        }
        write!(
            f,
            ", {} bits, mem {} Hz, {} bytes {}, released {}, vendor {}, ASIC {}",
            self.memory_bus_bits,
            format_decimal(self.memory_freq_hz),
            self.memory_bytes,
            self.memory_type,
            self.release_date,
            self.vendor,
            self.asic_name
        )
    }
}

/// Shortest decimal form of a value, always keeping at least one fractional digit.
fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}
